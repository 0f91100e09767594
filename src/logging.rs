use std::sync::Once;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `--log` value; `RUST_LOG` is consulted when absent.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

static LOGGER: Once = Once::new();

pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let mut builder = Builder::new();
        builder.write_style(config.write_style);

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(LevelFilter::Info),
        };

        if builder.try_init().is_ok() {
            log::debug!("logger ready");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_ignored() {
        init_logging(LoggingConfig {
            env_filter: Some("warn".into()),
            ..Default::default()
        });
        init_logging(LoggingConfig::default());

        assert!(LOGGER.is_completed());
    }
}
