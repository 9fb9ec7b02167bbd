use std::sync::Once;

/// Crate-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "LUMEN_LOG";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lumen_engine=trace,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Caps `wgpu_core` / `wgpu_hal` at `warn` unless the filter names them.
    pub quiet_wgpu: bool,
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            quiet_wgpu: true,
            is_test: false,
        }
    }
}

impl LoggingConfig {
    /// Captured output, for `#[test]` functions.
    pub fn for_tests() -> Self {
        Self { is_test: true, ..Self::default() }
    }

    fn resolve_filter(&self) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| std::env::var(LOG_ENV_VAR).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are no-ops.
///
/// If another logger is already installed the call only logs at debug level.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Info);

        let filter = config.resolve_filter();
        if config.quiet_wgpu {
            let names_wgpu = filter.as_deref().is_some_and(|f| f.contains("wgpu"));
            if !names_wgpu {
                builder.filter_module("wgpu_core", log::LevelFilter::Warn);
                builder.filter_module("wgpu_hal", log::LevelFilter::Warn);
            }
        }
        if let Some(filter) = filter {
            builder.parse_filters(&filter);
        }

        builder.write_style(config.write_style);
        builder.is_test(config.is_test);

        match builder.try_init() {
            Ok(()) => log::debug!("logging initialized"),
            Err(err) => log::debug!("logger already installed: {err}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig { env_filter: Some("trace".into()), ..LoggingConfig::default() };
        assert_eq!(cfg.resolve_filter().as_deref(), Some("trace"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::for_tests());
        init_logging(LoggingConfig::for_tests());
        log::info!("still alive");
    }
}
