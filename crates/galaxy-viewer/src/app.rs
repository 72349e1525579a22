use crate::{
    camera::Camera,
    config::Config,
    data::{types::PointBuffer, upload_point_cloud},
    error::{Result, ViewerError},
    input::{KeyAction, Keyboard},
    renderer::{
        context::{GfxContext, WindowSurface},
        PointRenderer, RenderContext,
    },
    timing::{FpsCounter, FramePacer},
};
use galaxy_field::generate;
use std::{sync::Arc, time::Instant};
use winit::{
    event::WindowEvent,
    window::{Fullscreen, Window},
};

/// Lifecycle of the viewer. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Initializing,
    Running,
    ShuttingDown,
}

impl AppState {
    /// `Initializing -> Running`; any other state is kept.
    pub fn start(self) -> Self {
        match self {
            Self::Initializing => Self::Running,
            other => other,
        }
    }

    /// Every state may shut down; `ShuttingDown` is terminal.
    pub fn shut_down(self) -> Self {
        Self::ShuttingDown
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

pub struct App {
    pub window: Arc<Window>,
    pub ctx: RenderContext,
    pub surface: WindowSurface,
    pub renderer: PointRenderer,
    pub points: PointBuffer,
    keyboard: Keyboard,
    pacer: FramePacer,
    fps: FpsCounter,
    state: AppState,
}

impl App {
    /// Generates the field, opens the device on `window` and uploads the points.
    pub async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let mut state = AppState::Initializing;

        // Reject bad input before any device interaction.
        config.validate()?;

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = WindowSurface::create(&instance, window.clone())?;
        let gfx = GfxContext::new(&instance, Some(&surface)).await?;

        let size = window.inner_size();
        let surface = WindowSurface::configure(surface, &gfx, size)?;

        let ctx = RenderContext {
            gfx,
            camera: Camera::new(size.width, size.height),
        };
        let renderer = PointRenderer::new(&ctx, surface.format(), size.width, size.height);

        let started = Instant::now();
        let cloud = generate(&config.generator())?;
        log::info!(
            "Generated {} points in {} clusters ({:.1} ms)",
            cloud.len(),
            config.generator().cluster_count(),
            started.elapsed().as_secs_f64() * 1e3
        );

        let points = upload_point_cloud(&ctx.gfx.device, &cloud)?;
        // The GPU copy is authoritative from here on.
        drop(cloud);

        state = state.start();
        log::info!("Viewer running; press F for fullscreen, Esc to quit");

        Ok(Self {
            window,
            ctx,
            surface,
            renderer,
            points,
            keyboard: Keyboard::default(),
            pacer: FramePacer::default(),
            fps: FpsCounter::new(Instant::now()),
            state,
        })
    }

    #[inline]
    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn shut_down(&mut self) {
        if self.state != AppState::ShuttingDown {
            log::info!("Shutting down");
        }
        self.state = self.state.shut_down();
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface.resize(&self.ctx.gfx.device, new_size);
            self.renderer
                .resize(&self.ctx.gfx.device, new_size.width, new_size.height);
            self.ctx.camera.set_aspect(new_size.width, new_size.height);
            log::debug!("Resized to {}x{}", new_size.width, new_size.height);
        }
    }

    pub fn toggle_fullscreen(&self) {
        let next = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        log::info!("Fullscreen {}", if next.is_some() { "on" } else { "off" });
        self.window.set_fullscreen(next);
    }

    /// Applies one window event other than `RedrawRequested`.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shut_down(),
            WindowEvent::KeyboardInput { event, .. } => match self.keyboard.handle(event) {
                KeyAction::ToggleFullscreen => self.toggle_fullscreen(),
                KeyAction::Quit => self.shut_down(),
                KeyAction::None => {}
            },
            WindowEvent::Resized(size) => self.resize(*size),
            _ => {}
        }
    }

    /// Whether the pacer allows another frame at `now`.
    #[inline]
    pub fn frame_due(&self, now: Instant) -> bool {
        self.state.is_running() && self.pacer.is_due(now)
    }

    #[inline]
    pub fn next_frame_deadline(&self) -> Option<Instant> {
        self.pacer.next_deadline()
    }

    /// Spins the scene one step, draws it and presents.
    pub fn redraw(&mut self, now: Instant) -> Result<()> {
        if !self.state.is_running() {
            return Ok(());
        }
        self.pacer.mark_frame(now);
        self.ctx.camera.advance();

        let frame = match self.surface.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out; skipping frame");
                return Ok(());
            }
            Err(err @ (wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost)) => {
                log::warn!("Surface {err:?}; reconfiguring");
                self.surface.reconfigure(&self.ctx.gfx.device);
                return Ok(());
            }
            Err(err) => return Err(ViewerError::Render(format!("acquire frame: {err}"))),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render_frame(&self.ctx, &view, &self.points, self.points.len)?;

        self.window.pre_present_notify();
        frame.present();

        if let Some(fps) = self.fps.tick(Instant::now()) {
            println!("FPS: {fps}");
        }
        Ok(())
    }
}
