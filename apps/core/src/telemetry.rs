//! Tracing setup for the binary.
//!
//! `RUST_LOG` controls the filter (default `info`). Set
//! `SUMMARIST_LOG_FORMAT=json` for bunyan-formatted JSON lines.

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

use crate::error::AppError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `SUMMARIST_LOG_FORMAT`; anything other than `json` means pretty.
    pub fn from_env() -> Self {
        match std::env::var("SUMMARIST_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Build a subscriber writing to `sink`.
pub fn get_subscriber<Sink>(
    name: &str,
    default_filter: &str,
    format: LogFormat,
    sink: Sink,
) -> Box<dyn Subscriber + Send + Sync>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        LogFormat::Json => Box::new(
            Registry::default()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(name.to_string(), sink)),
        ),
        LogFormat::Pretty => Box::new(
            Registry::default()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(sink).with_target(false)),
        ),
    }
}

/// Install `subscriber` as the global default. Call once at startup.
pub fn init_subscriber(subscriber: Box<dyn Subscriber + Send + Sync>) -> Result<(), AppError> {
    set_global_default(subscriber)
        .map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {}", e)))
}
