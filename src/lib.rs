//! Turns trace events from a database driver's instrumentation hook into
//! structured log records.
//!
//! Each event goes through the same pipeline: the driver severity is mapped
//! to a record [`Level`], attribute keys are put in snake case, references
//! in the query arguments are resolved, comments are stripped from the SQL
//! text (an `-- name: ...` annotation becomes its own attribute) and the
//! result is handed to the [`LogSink`] found in the [`Context`], or the
//! process default.
//!
//! ```rust
//! use std::sync::Arc;
//! use dbtrace_log::{Context, EventTranslator, MemorySink, Severity, TraceLogger, Value};
//!
//! let sink = Arc::new(MemorySink::new());
//! let ctx = Context::new().with_logger(sink.clone());
//!
//! let mut attributes = dbtrace_log::Attributes::new();
//! attributes.insert("sql".into(), Value::from("-- name: find_user\nSELECT 1"));
//! EventTranslator::new().log(&ctx, Severity::Info, "Query", attributes);
//!
//! let records = sink.records();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].attribute("sql"), Some(&Value::from("SELECT 1")));
//! assert_eq!(records[0].attribute("sql_operation"), Some(&Value::from("find_user")));
//! ```

pub mod caller;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod init;
pub mod memory_sink;
pub mod noop_sink;
pub mod normalize;
pub mod record;
pub mod sanitize;
pub mod severity;
pub mod sink;
pub mod tracing_sink;
pub mod translator;
pub mod value;

pub use caller::Caller;
pub use config::{CallerConfig, CallerMode, TranslatorConfig};
pub use context::{default_logger, from_context, set_default_logger, with_context, Context};
pub use error::{ConfigError, InitError};
pub use memory_sink::MemorySink;
pub use noop_sink::NoopSink;
pub use normalize::{dedupe_keys, normalize_attributes, normalize_key};
pub use record::{Attr, LogRecord};
pub use sanitize::{sanitize, trim_query, Sanitized};
pub use severity::{map_severity, Level, Severity};
pub use sink::LogSink;
pub use tracing_sink::TracingSink;
pub use translator::{EventTranslator, TraceEvent, TraceLogger};
pub use value::{Attributes, Value};
