use std::collections::BTreeMap;

use crate::env::{
    env_var, DBTRACE_LOG_CALLER_DEPTH_ENV, DBTRACE_LOG_CALLER_MODE_ENV,
    DBTRACE_LOG_NAMESPACE_ENV, DBTRACE_LOG_OPERATION_KEY_ENV, DBTRACE_LOG_SEVERITY_KEY_ENV,
};
use crate::error::ConfigError;
use crate::normalize::normalize_key;

/// How the source location of a record is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerMode {
    /// No caller is attached.
    Off,
    /// The call site of the inbound hook.
    #[default]
    Location,
    /// A frame picked from a captured backtrace, `depth_for(event)` frames
    /// above the hook's caller. Expensive; intended for debugging.
    Backtrace,
}

impl std::str::FromStr for CallerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(CallerMode::Off),
            "location" => Ok(CallerMode::Location),
            "backtrace" => Ok(CallerMode::Backtrace),
            other => Err(format!("expected off, location or backtrace, got {other}")),
        }
    }
}

/// Caller attribution settings.
///
/// Drivers reach the hook through a different number of frames depending
/// on the event kind, so the backtrace depth is looked up per event name.
#[derive(Clone, Debug)]
pub struct CallerConfig {
    pub mode: CallerMode,
    pub depths: BTreeMap<String, usize>,
    pub default_depth: usize,
}

impl CallerConfig {
    pub fn depth_for(&self, event: &str) -> usize {
        self.depths.get(event).copied().unwrap_or(self.default_depth)
    }

    pub fn with_depth(mut self, event: impl Into<String>, depth: usize) -> Self {
        self.depths.insert(event.into(), depth);
        self
    }
}

impl Default for CallerConfig {
    fn default() -> Self {
        let depths = [("Query", 3), ("BatchQuery", 2), ("BatchClose", 2)]
            .into_iter()
            .map(|(name, depth)| (name.to_string(), depth))
            .collect();

        Self {
            mode: CallerMode::default(),
            depths,
            default_depth: 0,
        }
    }
}

/// Translator configuration.
///
/// **Fields**
/// - `namespace`: group label the record attributes are reported under.
/// - `operation_key`: key of the attribute holding the operation name
///   extracted from the SQL text.
/// - `severity_key`: key of the attribute carrying the raw driver code of
///   severities that have no direct level mapping.
/// - `caller`: [`CallerConfig`] for source-location attribution.
///
/// Keys are stored in canonical form.
#[derive(Clone, Debug)]
pub struct TranslatorConfig {
    pub namespace: String,
    pub operation_key: String,
    pub severity_key: String,
    pub caller: CallerConfig,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            namespace: "query".to_string(),
            operation_key: "sql_operation".to_string(),
            severity_key: "driver_log_level".to_string(),
            caller: CallerConfig::default(),
        }
    }
}

impl TranslatorConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_operation_key(mut self, key: &str) -> Self {
        self.operation_key = normalize_key(key);
        self
    }

    pub fn with_severity_key(mut self, key: &str) -> Self {
        self.severity_key = normalize_key(key);
        self
    }

    pub fn with_caller(mut self, caller: CallerConfig) -> Self {
        self.caller = caller;
        self
    }

    /// Build a configuration from the process environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(namespace) = lookup(DBTRACE_LOG_NAMESPACE_ENV) {
            config = config.with_namespace(namespace);
        }
        if let Some(key) = lookup(DBTRACE_LOG_OPERATION_KEY_ENV) {
            config = config.with_operation_key(&key);
        }
        if let Some(key) = lookup(DBTRACE_LOG_SEVERITY_KEY_ENV) {
            config = config.with_severity_key(&key);
        }
        if let Some(mode) = lookup(DBTRACE_LOG_CALLER_MODE_ENV) {
            config.caller.mode = mode.parse().map_err(|reason| ConfigError::InvalidValue {
                key: DBTRACE_LOG_CALLER_MODE_ENV,
                value: mode.clone(),
                reason,
            })?;
        }
        if let Some(depth) = lookup(DBTRACE_LOG_CALLER_DEPTH_ENV) {
            config.caller.default_depth =
                depth.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        key: DBTRACE_LOG_CALLER_DEPTH_ENV,
                        value: depth.clone(),
                        reason: e.to_string(),
                    }
                })?;
        }

        Ok(config)
    }
}
