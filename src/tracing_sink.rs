use crate::context::Context;
use crate::record::LogRecord;
use crate::severity::Level;
use crate::sink::LogSink;

/// Sink that re-emits records as `tracing` events.
///
/// This is the process default. The record level is projected onto the
/// five `tracing` levels; the exact level name is kept in the `record_level`
/// field and the attributes travel as one JSON object in `attributes`.
#[derive(Clone, Debug, Default)]
pub struct TracingSink;

macro_rules! emit {
    ($level:expr, $record:expr) => {{
        let record = $record;
        let attributes = record.attributes_json();
        let file = record.caller.as_ref().map(|c| c.file.as_str());
        let line = record.caller.as_ref().map(|c| c.line);
        tracing::event!(
            $level,
            group = %record.group,
            record_level = %record.level,
            attributes = %attributes,
            caller.file = file,
            caller.line = line,
            "{}",
            record.message
        );
    }};
}

impl LogSink for TracingSink {
    fn enabled(&self, level: Level) -> bool {
        match level.as_tracing() {
            tracing::Level::TRACE => tracing::enabled!(tracing::Level::TRACE),
            tracing::Level::DEBUG => tracing::enabled!(tracing::Level::DEBUG),
            tracing::Level::INFO => tracing::enabled!(tracing::Level::INFO),
            tracing::Level::WARN => tracing::enabled!(tracing::Level::WARN),
            _ => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn log_attrs(&self, _ctx: &Context, record: LogRecord) {
        match record.level.as_tracing() {
            tracing::Level::TRACE => emit!(tracing::Level::TRACE, &record),
            tracing::Level::DEBUG => emit!(tracing::Level::DEBUG, &record),
            tracing::Level::INFO => emit!(tracing::Level::INFO, &record),
            tracing::Level::WARN => emit!(tracing::Level::WARN, &record),
            _ => emit!(tracing::Level::ERROR, &record),
        }
    }
}
