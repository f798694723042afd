/// Error type returned when reading configuration values.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Error type returned when installing process-wide logging state.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("default logger is already set")]
    DefaultLoggerAlreadySet,

    #[error("failed to install global tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}
