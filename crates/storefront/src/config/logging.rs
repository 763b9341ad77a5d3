//! Logging config

use clap::Args;
use record_store::tracing::LogFormat as SubscriberFormat;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

impl From<LogFormat> for SubscriberFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => SubscriberFormat::Compact,
            LogFormat::Json => SubscriberFormat::Json,
        }
    }
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
