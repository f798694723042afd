//! Environment variable names read by [`TranslatorConfig::from_env`] and
//! [`SubscriberConfig::from_env`].
//!
//! These are purely helpers; the translator itself never touches the
//! environment.
//!
//! [`TranslatorConfig::from_env`]: crate::config::TranslatorConfig::from_env
//! [`SubscriberConfig::from_env`]: crate::init::SubscriberConfig::from_env

/// Label the record attributes are grouped under.
pub const DBTRACE_LOG_NAMESPACE_ENV: &str = "DBTRACE_LOG_NAMESPACE";

/// Attribute key for the extracted operation name.
pub const DBTRACE_LOG_OPERATION_KEY_ENV: &str = "DBTRACE_LOG_OPERATION_KEY";

/// Attribute key for the raw code of severities without a level mapping.
pub const DBTRACE_LOG_SEVERITY_KEY_ENV: &str = "DBTRACE_LOG_SEVERITY_KEY";

/// Caller attribution mode: `off`, `location` or `backtrace`.
pub const DBTRACE_LOG_CALLER_MODE_ENV: &str = "DBTRACE_LOG_CALLER_MODE";

/// Backtrace depth for event kinds without an explicit depth.
pub const DBTRACE_LOG_CALLER_DEPTH_ENV: &str = "DBTRACE_LOG_CALLER_DEPTH";

/// Subscriber output format; `json` switches to JSON lines.
pub const DBTRACE_LOG_FORMAT_ENV: &str = "DBTRACE_LOG_FORMAT";

/// Subscriber filter directive, e.g. `info,dbtrace_log=trace`.
pub const DBTRACE_LOG_FILTER_ENV: &str = "DBTRACE_LOG_FILTER";

/// Read an environment variable, treating empty values as unset.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
