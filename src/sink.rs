use crate::context::Context;
use crate::record::LogRecord;
use crate::severity::Level;

/// Destination for [`LogRecord`]s produced by the translator.
///
/// Implementations decide where records go (a `tracing` subscriber, a
/// buffer, a file). The translator calls `log_attrs` synchronously on the
/// driver's thread, so implementations should return quickly and keep any
/// expensive transport off that thread.
pub trait LogSink: Send + Sync {
    /// Whether records at `level` would be kept.
    ///
    /// The translator skips all normalization work for disabled levels.
    /// Default implementation accepts everything.
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    /// Emit a single record.
    ///
    /// **Parameters**
    /// - `ctx`: the [`Context`] the driver passed to the hook.
    /// - `record`: fully-populated [`LogRecord`]; ownership moves to the sink.
    ///
    /// Failures are the sink's own concern and are never reported back to
    /// the driver.
    fn log_attrs(&self, ctx: &Context, record: LogRecord);
}
