pub mod util;
pub use crate::util::{resolve_utc_offset, utc_offset_hms, utc_offset_hours};
use config_loader::{AppCommonConfig, logging::LoggerConfig};
pub use time::UtcOffset;
use time::{format_description::BorrowedFormatItem, macros::format_description};
pub use tracing::{
    Level, debug, debug_span, error, error_span, info, info_span, instrument, span, trace,
    trace_span, warn, warn_span,
};
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::{Directive, LevelFilter},
    fmt::time::OffsetTime,
    layer::SubscriberExt,
};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoggingError {
    #[error("Failed to build layer: {message}, context: {context}")]
    BuildLayerError {
        message: String,
        context: &'static str,
    },
    #[error("Invalid env filter directive '{directive}': {message}")]
    InvalidDirective { directive: String, message: String },
    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),
}

pub struct LoggingGuard {
    /// Keep stdout guard alive to ensure all logs are flushed
    pub stdout_guard: tracing_appender::non_blocking::WorkerGuard,
    /// Offset used for log timestamps
    pub offset: UtcOffset,
    pub json: bool,
}

/// Install the global subscriber for a service.
///
/// Output is JSON when `logger_config.json` says so, or, when it is unset,
/// when `app.is_production_env` is true. Timestamps use `app.timezone` if it
/// is a fixed offset and UTC otherwise.
pub fn setup_logging(
    app: &AppCommonConfig,
    logger_config: LoggerConfig,
    env_filter_override: Option<Vec<&str>>,
) -> Result<LoggingGuard, LoggingError> {
    let time_format: &[BorrowedFormatItem<'_>] = if cfg!(debug_assertions) {
        format_description!("[hour]:[minute]:[second].[subsecond digits:3]")
    } else {
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]")
    };

    let resolved = resolve_utc_offset(&app.timezone);
    let offset = resolved.unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(offset, time_format);

    let max_level = logger_config
        .max_level
        .parse::<Level>()
        .unwrap_or(Level::INFO);

    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(directives) = env_filter_override {
        for dir in directives {
            let directive = dir.parse::<Directive>().map_err(|e| {
                LoggingError::InvalidDirective {
                    directive: dir.to_string(),
                    message: e.to_string(),
                }
            })?;
            env_filter = env_filter.add_directive(directive);
        }
    }

    let level_filter = LevelFilter::from_level(max_level);
    let json = logger_config.json.unwrap_or(app.is_production_env);

    let (non_blocking, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::Layer::default()
            .json()
            .with_writer(non_blocking.clone())
            .with_timer(timer.clone())
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    let console_layer = (!json).then(|| {
        tracing_subscriber::fmt::Layer::default()
            .with_writer(non_blocking)
            .with_timer(timer)
            .with_ansi(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    let registry = Registry::default()
        .with(env_filter)
        .with(level_filter)
        .with(json_layer)
        .with(console_layer);

    if tracing::dispatcher::has_been_set() {
        warn!("Global trace dispatcher already set, skipping re-init");
    } else {
        tracing::subscriber::set_global_default(registry).map_err(|e| {
            LoggingError::BuildLayerError {
                message: e.to_string(),
                context: "init",
            }
        })?;
    }

    if resolved.is_none() {
        warn!(
            timezone = %app.timezone,
            "timezone is not a fixed UTC offset, log timestamps use UTC"
        );
    }
    debug!(json, max_level = %max_level, %offset, "logging initialized");

    Ok(LoggingGuard {
        stdout_guard,
        offset,
        json,
    })
}
