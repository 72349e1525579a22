use crate::error::{Result, ViewerError};
use clap::Parser;
use galaxy_field::{GeneratorConfig, DEFAULT_CLUSTER_SIZE, DEFAULT_COUNT, DEFAULT_VOID_THRESHOLD};

/// Default window width in physical pixels.
pub const DEFAULT_WIDTH: u32 = 1920;
/// Default window height in physical pixels.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// `galaxy_viewer` - renders a procedurally generated field of galaxy clusters.
///
/// The field is generated once at startup, uploaded to a static GPU vertex
/// buffer and spun slowly in front of a fixed camera. Press `F` to toggle
/// fullscreen, Escape or close the window to quit.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of points (galaxies) to generate.
    #[arg(long, env = "GALAXY_COUNT", default_value_t = DEFAULT_COUNT)]
    pub count: u32,

    /// Initial window width in physical pixels.
    #[arg(long, env = "GALAXY_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Initial window height in physical pixels.
    #[arg(long, env = "GALAXY_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Points scattered around each cluster center.
    #[arg(long, env = "GALAXY_CLUSTER_SIZE", default_value_t = DEFAULT_CLUSTER_SIZE)]
    pub cluster_size: u32,

    /// Every cluster whose index is a multiple of this value is spread
    /// uniformly over the whole field instead of around its center.
    #[arg(long, env = "GALAXY_VOID_THRESHOLD", default_value_t = DEFAULT_VOID_THRESHOLD)]
    pub void_threshold: u32,

    /// Seed for the generator. A fresh field is drawn on every run when unset.
    #[arg(long, env = "GALAXY_SEED")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cluster_size: DEFAULT_CLUSTER_SIZE,
            void_threshold: DEFAULT_VOID_THRESHOLD,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ViewerError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        self.generator().validate()?;
        Ok(())
    }

    /// Initial window size. Pixels are physical so the surface matches the
    /// requested resolution on scaled displays.
    pub fn window_size(&self) -> winit::dpi::PhysicalSize<u32> {
        winit::dpi::PhysicalSize::new(self.width, self.height)
    }

    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            count: self.count,
            cluster_size: self.cluster_size,
            void_threshold: self.void_threshold,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cfg = Config::try_parse_from(["galaxy_viewer"]).unwrap();
        assert_eq!(cfg.count, 200_000);
        assert_eq!((cfg.width, cfg.height), (1920, 1080));
        assert_eq!(cfg.cluster_size, 100);
        assert_eq!(cfg.void_threshold, 1000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_matches_cli_defaults() {
        let parsed = Config::try_parse_from(["galaxy_viewer"]).unwrap();
        let default = Config::default();
        assert_eq!(
            (parsed.count, parsed.width, parsed.height),
            (default.count, default.width, default.height)
        );
        assert_eq!(parsed.generator(), default.generator());
        assert_eq!(default.generator(), GeneratorConfig::default());
    }

    #[test]
    fn parses_overrides() {
        let cfg = Config::try_parse_from([
            "galaxy_viewer",
            "--count",
            "5000",
            "--width",
            "800",
            "--height",
            "600",
            "--seed",
            "17",
        ])
        .unwrap();
        assert_eq!(cfg.count, 5000);
        assert_eq!((cfg.width, cfg.height), (800, 600));

        let gen = cfg.generator();
        assert_eq!(gen.count, 5000);
        assert_eq!(gen.seed, Some(17));
    }

    #[test]
    fn window_size_is_in_physical_pixels() {
        let size = Config::default().window_size();
        assert_eq!((size.width, size.height), (1920, 1080));

        // A 2x scale factor must not double the requested resolution.
        let logical = size.to_logical::<u32>(2.0);
        assert_eq!((logical.width, logical.height), (960, 540));
    }

    #[test]
    fn rejects_zero_window() {
        let cfg = Config {
            height: 0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ViewerError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_cluster_size() {
        let cfg = Config {
            cluster_size: 0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ViewerError::InvalidConfig(_))));
    }

    #[test]
    fn zero_count_is_allowed() {
        let cfg = Config {
            count: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
