use crate::context::Context;
use crate::record::LogRecord;
use crate::severity::Level;
use crate::sink::LogSink;

/// A sink that simply drops all records.
///
/// Every level reports as disabled, so the translator does no work at all.
/// Useful for measuring the overhead of the hook itself.
#[derive(Clone, Debug, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn log_attrs(&self, _ctx: &Context, _record: LogRecord) {}
}
