use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "nabu_window=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Debug output for this crate, warnings for wgpu and winit.
    pub fn verbose() -> Self {
        Self {
            env_filter: Some(
                "info,nabu_window=debug,wgpu_core=warn,wgpu_hal=warn,winit=warn".into(),
            ),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// The filter comes from `config`, then `RUST_LOG`, then defaults to `info`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if let Err(e) = builder.try_init() {
            eprintln!("logger already installed: {e}");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_ignored() {
        let quiet = || LoggingConfig {
            env_filter: Some("off".into()),
            ..LoggingConfig::default()
        };
        init_logging(quiet());
        init_logging(quiet());
        assert!(INIT.is_completed());
    }

    #[test]
    fn verbose_filter_keeps_backends_quiet() {
        let filter = LoggingConfig::verbose().env_filter.unwrap();
        assert!(filter.contains("nabu_window=debug"));
        assert!(filter.contains("wgpu_core=warn"));
        assert!(filter.contains("winit=warn"));
    }
}
