//! Procedural galaxy field generator.

use crate::point::{Point, PointCloud};
use crate::FieldError;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half-extent of the cube cluster centers and void points are drawn from.
pub const FIELD_EXTENT: f32 = 100.0;
/// Half-extent of the scatter around a cluster center.
pub const CLUSTER_SPREAD: f32 = 10.0;

/// Default number of points in a field.
pub const DEFAULT_COUNT: u32 = 200_000;
/// Default points per cluster.
pub const DEFAULT_CLUSTER_SIZE: u32 = 100;
/// Default void cluster stride.
pub const DEFAULT_VOID_THRESHOLD: u32 = 1000;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const GRAY: [f32; 3] = [0.5, 0.5, 0.5];
const PINK: [f32; 3] = [0.98, 0.0, 0.603];
const BABY_BLUE: [f32; 3] = [0.54, 0.81, 0.94];

/// Inputs for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Total number of points.
    pub count: u32,
    /// Points per cluster.
    pub cluster_size: u32,
    /// Every cluster whose index is a multiple of this is a void cluster.
    pub void_threshold: u32,
    /// RNG seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            cluster_size: DEFAULT_CLUSTER_SIZE,
            void_threshold: DEFAULT_VOID_THRESHOLD,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_count(count: u32) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.cluster_size == 0 {
            return Err(FieldError::InvalidConfig(
                "cluster_size must be greater than zero".into(),
            ));
        }
        if self.void_threshold == 0 {
            return Err(FieldError::InvalidConfig(
                "void_threshold must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Number of clusters, counting a trailing partial cluster.
    pub fn cluster_count(&self) -> u32 {
        self.count.div_ceil(self.cluster_size.max(1))
    }

    #[inline]
    pub fn is_void_cluster(&self, cluster: u32) -> bool {
        cluster % self.void_threshold == 0
    }
}

/// Base color for point `i`. Buckets 7..=9 are left black.
#[inline]
pub fn base_color(i: u32) -> [f32; 3] {
    match i % 10 {
        0 | 1 => WHITE,
        2..=4 => GRAY,
        5 => PINK,
        6 => BABY_BLUE,
        _ => [0.0; 3],
    }
}

/// Generates a cloud using `config.seed`, or entropy when unset.
pub fn generate(config: &GeneratorConfig) -> Result<PointCloud, FieldError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(config, &mut rng)
}

/// Generates a cloud drawing every random value from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<PointCloud, FieldError> {
    let (points, _centers) = generate_points(config, rng)?;
    Ok(PointCloud::from_points(points))
}

/// Builds the points and returns the cluster centers used for them.
pub(crate) fn generate_points<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(Vec<Point>, Vec<[f32; 3]>), FieldError> {
    config.validate()?;

    let field = Uniform::new_inclusive(-FIELD_EXTENT, FIELD_EXTENT);
    let spread = Uniform::new_inclusive(-CLUSTER_SPREAD, CLUSTER_SPREAD);
    let brightness = Uniform::new_inclusive(0.5f32, 1.0);

    // Centers are drawn up front, before any point.
    let centers: Vec<[f32; 3]> = (0..config.cluster_count())
        .map(|_| [rng.sample(field), rng.sample(field), rng.sample(field)])
        .collect();

    let mut points = Vec::with_capacity(config.count as usize);
    for i in 0..config.count {
        let cluster = i / config.cluster_size;

        let position = if config.is_void_cluster(cluster) {
            [rng.sample(field), rng.sample(field), rng.sample(field)]
        } else {
            let c = centers[cluster as usize];
            [
                c[0] + rng.sample(spread),
                c[1] + rng.sample(spread),
                c[2] + rng.sample(spread),
            ]
        };

        let b = rng.sample(brightness);
        let base = base_color(i);
        let color = [base[0] * b, base[1] * b, base[2] * b];

        points.push(Point { position, color });
    }

    Ok((points, centers))
}
