use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::env::{env_var, DBTRACE_LOG_FILTER_ENV, DBTRACE_LOG_FORMAT_ENV};
use crate::error::InitError;

/// Configuration of the process-wide `tracing` subscriber that receives
/// records from the default [`TracingSink`](crate::tracing_sink::TracingSink).
///
/// **Fields**
/// - `filter`: `EnvFilter` directive, e.g. `info` or `warn,dbtrace_log=trace`.
/// - `json`: print events as JSON lines instead of the compact text format.
/// - `enable_stdout`: if `false` no `fmt` layer is installed; only the
///   filter is, which is useful when another layer is added by the caller.
#[derive(Clone, Debug)]
pub struct SubscriberConfig {
    pub filter: String,
    pub json: bool,
    pub enable_stdout: bool,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            enable_stdout: true,
        }
    }
}

impl SubscriberConfig {
    /// Defaults overridden by `DBTRACE_LOG_FILTER` and `DBTRACE_LOG_FORMAT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(filter) = env_var(DBTRACE_LOG_FILTER_ENV) {
            config.filter = filter;
        }
        if let Some(format) = env_var(DBTRACE_LOG_FORMAT_ENV) {
            config.json = format.eq_ignore_ascii_case("json");
        }
        config
    }
}

/// Install the global `tracing` subscriber described by `config`.
///
/// **Errors**
/// - [`InitError::Filter`] if `config.filter` is not a valid directive.
/// - [`InitError::Subscriber`] if a global subscriber is already set.
pub fn init_tracing_with_config(config: &SubscriberConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_new(&config.filter)?;
    let registry = Registry::default().with(filter);

    // The three layer stacks have distinct types, so each is installed on
    // its own branch.
    if !config.enable_stdout {
        tracing::subscriber::set_global_default(registry)?;
    } else if config.json {
        tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))?;
    } else {
        tracing::subscriber::set_global_default(registry.with(fmt::layer().compact()))?;
    }

    Ok(())
}

/// Install the global subscriber configured from the environment.
///
/// Equivalent to [`init_tracing_with_config`] with
/// [`SubscriberConfig::from_env`].
pub fn init_tracing() -> Result<(), InitError> {
    init_tracing_with_config(&SubscriberConfig::from_env())
}
