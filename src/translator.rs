use chrono::Utc;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::caller;
use crate::config::TranslatorConfig;
use crate::context::{from_context, Context};
use crate::normalize::{dedupe_keys, normalize_entries};
use crate::record::{Attr, LogRecord};
use crate::sanitize::{sanitize, SQL_KEY};
use crate::severity::{map_severity, Level, Severity};
use crate::sink::LogSink;
use crate::value::{Attributes, Value};

/// One instrumentation callback from the database driver.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    /// Event kind, e.g. `Query`, `BatchQuery`, `Connect`.
    pub name: String,
    pub severity: Severity,
    pub attributes: Attributes,
}

impl TraceEvent {
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        TraceEvent {
            name: name.into(),
            severity,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// The hook a database driver calls at each traced lifecycle point.
pub trait TraceLogger: Send + Sync {
    #[track_caller]
    fn log(&self, ctx: &Context, severity: Severity, message: &str, attributes: Attributes);
}

/// Picks the sink for a context, replacing the default context lookup.
pub type LoggerResolver = Arc<dyn Fn(&Context) -> Arc<dyn LogSink> + Send + Sync>;

/// [`TraceLogger`] that turns driver events into [`LogRecord`]s.
///
/// The translator holds no mutable state; one instance can be shared by
/// every connection of a pool.
#[derive(Clone, Default)]
pub struct EventTranslator {
    config: TranslatorConfig,
    resolver: Option<LoggerResolver>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TranslatorConfig) -> Self {
        EventTranslator {
            config,
            resolver: None,
        }
    }

    /// Resolve sinks with `resolver` instead of [`from_context`].
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Context) -> Arc<dyn LogSink> + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Build the record for `event` without emitting it.
    ///
    /// The record carries no caller; that is filled in by [`TraceLogger::log`].
    pub fn translate(&self, event: &TraceEvent) -> LogRecord {
        let (level, extra) = map_severity(event.severity, &self.config.severity_key);
        self.build(level, extra, &event.name, &event.attributes)
    }

    fn build(
        &self,
        level: Level,
        extra: Option<Attr>,
        message: &str,
        attributes: &Attributes,
    ) -> LogRecord {
        let normalized = normalize_entries(attributes);
        let mut attrs = Vec::with_capacity(normalized.len() + 2);
        attrs.extend(extra);

        for mut attr in normalized {
            if attr.key == SQL_KEY {
                if let Value::Str(sql) = &attr.value {
                    let sanitized = sanitize(sql);
                    if let Some(operation) = sanitized.operation {
                        attrs.push(Attr::new(self.config.operation_key.as_str(), operation));
                    }
                    attr.value = Value::Str(sanitized.cleaned);
                }
            }
            attrs.push(attr);
        }
        dedupe_keys(&mut attrs);

        LogRecord {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            group: self.config.namespace.clone(),
            attributes: attrs,
            caller: None,
        }
    }

    fn sink(&self, ctx: &Context) -> Arc<dyn LogSink> {
        match &self.resolver {
            Some(resolver) => resolver(ctx),
            None => from_context(ctx),
        }
    }
}

impl fmt::Debug for EventTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTranslator")
            .field("config", &self.config)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl TraceLogger for EventTranslator {
    #[track_caller]
    fn log(&self, ctx: &Context, severity: Severity, message: &str, attributes: Attributes) {
        let location = Location::caller();
        let (level, extra) = map_severity(severity, &self.config.severity_key);

        let sink = self.sink(ctx);
        if !sink.enabled(level) {
            return;
        }

        let mut record = self.build(level, extra, message, &attributes);
        record.caller = caller::capture(&self.config.caller, message, location);
        sink.log_attrs(ctx, record);
    }
}
