use crate::error::{Result, ViewerError};
use std::sync::Arc;
use winit::window::Window;

/// Device and queue shared by every GPU component.
pub struct GfxContext {
    pub adapter: wgpu::Adapter,
    pub device:  wgpu::Device,
    pub queue:   wgpu::Queue,
}

impl GfxContext {
    /// Picks a high-performance adapter (compatible with `surface` when given)
    /// and opens a device on it.
    pub async fn new(instance: &wgpu::Instance, surface: Option<&wgpu::Surface<'_>>) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference:       wgpu::PowerPreference::HighPerformance,
                compatible_surface:     surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| ViewerError::Device("no suitable GPU adapter".into()))?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label:             Some("Galaxy Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits:   wgpu::Limits::default(),
                },
                None, // no trace
            )
            .await
            .map_err(|e| ViewerError::Device(format!("request_device failed: {e}")))?;

        Ok(Self { adapter, device, queue })
    }

    /// A context with no presentation surface, for offscreen rendering.
    pub async fn headless() -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        Self::new(&instance, None).await
    }
}

/// The window's swap chain.
pub struct WindowSurface {
    pub surface: wgpu::Surface<'static>,
    pub config:  wgpu::SurfaceConfiguration,
    pub size:    winit::dpi::PhysicalSize<u32>,
}

impl WindowSurface {
    /// Creates the surface for `window`. Must be configured with [`Self::configure`]
    /// once a device exists.
    pub fn create(instance: &wgpu::Instance, window: Arc<Window>) -> Result<wgpu::Surface<'static>> {
        // The surface must outlive the window; `Arc` guarantees this.
        instance
            .create_surface(window)
            .map_err(|e| ViewerError::Device(format!("create_surface failed: {e}")))
    }

    pub fn configure(
        surface: wgpu::Surface<'static>,
        gfx: &GfxContext,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(&gfx.adapter);

        // Colors are written as given; a linear swap chain keeps them unconverted.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| ViewerError::Device("surface reports no formats".into()))?;

        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width:                         size.width.max(1),
            height:                        size.height.max(1),
            present_mode:                  wgpu::PresentMode::Fifo, // V-sync
            alpha_mode,
            view_formats:                  vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gfx.device, &config);
        log::info!("Surface configured: {:?} {}x{}", format, config.width, config.height);

        Ok(Self { surface, config, size })
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Resizes the swap chain when the window size changes.
    pub fn resize(&mut self, device: &wgpu::Device, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(device, &self.config);
        }
    }

    /// Re-applies the current configuration after the swap chain went stale.
    pub fn reconfigure(&self, device: &wgpu::Device) {
        self.surface.configure(device, &self.config);
    }
}
