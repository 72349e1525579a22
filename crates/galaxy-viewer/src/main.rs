//! Entry point for the Galaxy Viewer application.

use anyhow::Result;
use clap::Parser;
use galaxy_viewer::{
    app::{App, AppState},
    config::Config,
    error::ViewerError,
};
use std::{sync::Arc, time::Instant};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logging; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = Config::parse();
    log::info!("Starting with {:?}", config);
    config.validate()?;

    // Create the event loop and window.
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("3D Galaxies")
            .with_inner_size(config.window_size())
            .build(&event_loop)?,
    );

    // Initialise the application (async → sync).
    let mut app = pollster::block_on(App::new(window.clone(), &config))?;
    let mut fatal: Option<ViewerError> = None;

    // Run the winit event loop.
    event_loop.run(|event, elwt| {
        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                match event {
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = app.redraw(Instant::now()) {
                            log::error!("{err}");
                            fatal = Some(err);
                            app.shut_down();
                        }
                    }
                    other => app.handle_event(&other),
                }
            }
            Event::AboutToWait => {
                // Frame pacing: block until the next slot, then ask for a redraw.
                let now = Instant::now();
                if app.frame_due(now) {
                    window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = app.next_frame_deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                }
            }
            _ => {}
        }

        if app.state() == AppState::ShuttingDown {
            elwt.exit();
        }
    })?;

    // GPU resources go before the window they were created for.
    drop(app);

    match fatal {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
