use glow::HasContext;
use log::Level;

#[cfg(not(debug_assertions))]
pub const DEBUG_ENABLED: bool = false;
#[cfg(debug_assertions)]
pub const DEBUG_ENABLED: bool = true;

/// Routes driver debug messages into the logger. Does nothing in release
/// builds or when the context lacks `KHR_debug`.
pub fn install(gl: &mut glow::Context) {
    if !DEBUG_ENABLED {
        return;
    }

    if !gl.supports_debug() {
        log::debug!("GL debug output not supported by this context");
        return;
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(gl_debug_callback);
    }
}

fn gl_debug_callback(_source: u32, message_type: u32, id: u32, severity: u32, message: &str) {
    log::log!(
        target: "gl",
        severity_level(severity),
        "{} ({}): {}",
        type_str(message_type),
        id,
        message
    );
}

fn severity_level(severity: u32) -> Level {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => Level::Error,
        glow::DEBUG_SEVERITY_MEDIUM => Level::Warn,
        glow::DEBUG_SEVERITY_LOW => Level::Info,
        _ => Level::Debug,
    }
}

fn type_str(message_type: u32) -> &'static str {
    match message_type {
        glow::DEBUG_TYPE_ERROR => "ERROR",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "DEPRECATED",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "UNDEFINED",
        glow::DEBUG_TYPE_PORTABILITY => "PORTABILITY",
        glow::DEBUG_TYPE_PERFORMANCE => "PERFORMANCE",
        glow::DEBUG_TYPE_MARKER => "MARKER",
        _ => "OTHER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_maps_onto_log_levels() {
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_HIGH), Level::Error);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_MEDIUM), Level::Warn);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_LOW), Level::Info);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_NOTIFICATION), Level::Debug);
    }

    #[test]
    fn unknown_message_type_is_other() {
        assert_eq!(type_str(glow::DEBUG_TYPE_ERROR), "ERROR");
        assert_eq!(type_str(glow::DEBUG_TYPE_OTHER), "OTHER");
        assert_eq!(type_str(0), "OTHER");
    }
}
