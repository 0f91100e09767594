use anyhow::Result;
use config::Config;
use logging::{init_logging, LoggingConfig};
use renderer::Renderer;
use winit::event_loop::EventLoop;

mod buffer;
mod config;
mod context;
mod debug;
mod layout;
mod logging;
mod mesh;
mod mode;
mod renderer;
mod shader;
mod vertex_array;

fn main() -> Result<()> {
    let config = Config::parse();

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..Default::default()
    });

    let event_loop = EventLoop::new()?;
    log::info!("Event loop initialized.");

    let mut renderer = Renderer::new(config);
    event_loop.run_app(&mut renderer)?;

    match renderer.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
