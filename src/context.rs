use std::{error::Error as StdError, num::NonZeroU32};

use anyhow::{Context as AnyhowContext, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{Display, DisplayApiPreference},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::GlWindow;
use log::{debug, info};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle},
    window::Window,
};

use crate::{config::Config as AppConfig, debug};

const WINDOW_FAILED: &str = "Failed to Create a Window.";

/// Window, GL surface and current GL context, plus the loaded function table.
///
/// Field order matters: the function table and surface go before the context,
/// and the window is dropped last.
pub struct Context {
    pub gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    pub window: Window,
}

impl Context {
    pub fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

        // WGL can only pick a modern config against an existing window.
        #[cfg(windows)]
        let early_window = Some(
            event_loop
                .create_window(window_attributes.clone())
                .window_step("opening the window")?,
        );
        #[cfg(not(windows))]
        let early_window: Option<Window> = None;

        let raw_window_handle = early_window
            .as_ref()
            .and_then(|window| window.window_handle().ok())
            .map(|handle| handle.as_raw());

        let raw_display_handle = event_loop
            .display_handle()
            .window_step("querying the display handle")?
            .as_raw();
        let gl_display =
            unsafe { Display::new(raw_display_handle, display_preference(raw_window_handle)) }
                .window_step("connecting to the GL display")?;

        let mut template = ConfigTemplateBuilder::new();
        if let Some(handle) = raw_window_handle {
            template = template.compatible_with_native_window(handle);
        }
        let configs = unsafe { gl_display.find_configs(template.build()) }
            .window_step("listing GL configs")?;
        let gl_config = fewest_samples(configs, |config| config.num_samples())
            .context("the display offered no GL configs")
            .context(WINDOW_FAILED)?;
        debug!(
            "Picked GL config: {} samples, hardware accelerated: {}",
            gl_config.num_samples(),
            gl_config.hardware_accelerated()
        );

        let window = match early_window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, window_attributes, &gl_config)
                .window_step("opening the window")?,
        };
        info!("Created a Window.");

        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(window.window_handle().ok().map(|handle| handle.as_raw()));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .window_step("creating an OpenGL 3.3 core context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .window_step("describing the window surface")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .window_step("creating the window surface")?;

        let context = not_current
            .make_current(&surface)
            .window_step("making the GL context current")?;

        if config.vsync {
            surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))?;
        }

        let mut gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name).cast())
        };
        debug::install(&mut gl);

        Ok(Self {
            gl,
            surface,
            context,
            window,
        })
    }

    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.surface.resize(&self.context, width, height);
        }
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("Couldn't present the frame")
    }
}

#[cfg(target_os = "macos")]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(windows)]
fn display_preference(window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(window)
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::GlxThenEgl(Box::new(winit::platform::x11::register_xlib_error_hook))
}

/// Multisampling buys nothing for a single flat quad, so prefer the leanest config.
fn fewest_samples<T>(
    candidates: impl Iterator<Item = T>,
    samples: impl Fn(&T) -> u8,
) -> Option<T> {
    candidates.min_by_key(|candidate| samples(candidate))
}

/// Tags a failed setup step with the window-creation failure message.
trait WindowStep<T> {
    fn window_step(self, step: &'static str) -> Result<T>;
}

impl<T, E> WindowStep<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn window_step(self, step: &'static str) -> Result<T> {
        self.context(step).context(WINDOW_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn no_candidates_is_none_not_a_panic() {
        assert_eq!(fewest_samples(std::iter::empty::<u8>(), |&s| s), None);
    }

    #[test]
    fn picks_the_fewest_samples() {
        let picked = fewest_samples([4u8, 0, 8, 2].into_iter(), |&s| s);
        assert_eq!(picked, Some(0));
    }

    #[test]
    fn failed_steps_report_window_failure() {
        let err = Err::<(), _>(io::Error::other("no display"))
            .window_step("creating an OpenGL 3.3 core context")
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.starts_with(WINDOW_FAILED), "{message}");
        assert!(message.contains("creating an OpenGL 3.3 core context"), "{message}");
        assert!(message.contains("no display"), "{message}");
    }
}
