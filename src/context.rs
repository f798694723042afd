use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::InitError;
use crate::sink::LogSink;
use crate::tracing_sink::TracingSink;

static DEFAULT_LOGGER: OnceLock<Arc<dyn LogSink>> = OnceLock::new();

/// Per-call scope handed to the hook by the driver.
///
/// Collaborators use it to route the records of one request or transaction
/// to a specific sink. A context without a logger resolves to the process
/// default.
#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Arc<dyn LogSink>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this context that routes records to `logger`.
    pub fn with_logger(&self, logger: Arc<dyn LogSink>) -> Self {
        Context {
            logger: Some(logger),
        }
    }

    /// The logger carried by this context, if any.
    pub fn logger(&self) -> Option<&Arc<dyn LogSink>> {
        self.logger.as_ref()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("logger", &self.logger.as_ref().map(|_| "dyn LogSink"))
            .finish()
    }
}

/// Attach `logger` to a copy of `ctx`.
pub fn with_context(ctx: &Context, logger: Arc<dyn LogSink>) -> Context {
    ctx.with_logger(logger)
}

/// The logger carried by `ctx`, or the process default.
pub fn from_context(ctx: &Context) -> Arc<dyn LogSink> {
    match ctx.logger() {
        Some(logger) => Arc::clone(logger),
        None => default_logger(),
    }
}

/// Install the process-wide default logger.
///
/// Must be called before the first event is translated; the default is
/// fixed once it has been read.
pub fn set_default_logger(logger: Arc<dyn LogSink>) -> Result<(), InitError> {
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| InitError::DefaultLoggerAlreadySet)
}

/// The process-wide default logger, a [`TracingSink`] unless another one
/// was installed with [`set_default_logger`].
pub fn default_logger() -> Arc<dyn LogSink> {
    Arc::clone(DEFAULT_LOGGER.get_or_init(|| Arc::new(TracingSink)))
}
