//! Log output for the clock binary.
//!
//! Library code only talks to the `log` facade. The binary installs an
//! `env_logger` backend once at startup; the filter comes from `--log`,
//! then `RUST_LOG`, then [`DEFAULT_FILTER`].

/// Clock messages at info, everything else (wgpu, winit) at warn.
pub const DEFAULT_FILTER: &str = "warn,analogue_clock=info";

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` directives, e.g. `analogue_clock::tracker=trace`.
    pub filter: Option<String>,
    /// Millisecond timestamps, useful when watching tick cadence.
    pub timestamps: bool,
}

impl LoggingConfig {
    fn resolve_filter(&self, rust_log: Option<String>) -> String {
        self.filter
            .clone()
            .or(rust_log)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

/// Installs the global logger. Returns `false` if one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&filter);
    if config.timestamps {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp(None);
    }

    match builder.try_init() {
        Ok(()) => {
            log::debug!("log filter: {filter}");
            true
        }
        Err(_) => false,
    }
}
