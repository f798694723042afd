use std::sync::Arc;

use dbtrace_log::{
    default_logger, set_default_logger, Attributes, Context, EventTranslator, InitError, LogSink,
    MemorySink, Severity, TraceLogger,
};

// Runs as its own test binary so the process default can be installed here.
#[test]
fn events_without_a_context_logger_reach_the_default() {
    let sink = Arc::new(MemorySink::new());
    set_default_logger(sink.clone()).unwrap();

    EventTranslator::new().log(&Context::new(), Severity::Warn, "BatchClose", Attributes::new());
    assert_eq!(sink.len(), 1);

    let again = set_default_logger(Arc::new(MemorySink::new()));
    assert!(matches!(again, Err(InitError::DefaultLoggerAlreadySet)));

    let scoped = Arc::new(MemorySink::new());
    let ctx = Context::new().with_logger(scoped.clone());
    EventTranslator::new().log(&ctx, Severity::Info, "Connect", Attributes::new());
    assert_eq!(scoped.len(), 1);
    assert_eq!(sink.len(), 1);

    default_logger().log_attrs(&ctx, scoped.take().remove(0));
    assert_eq!(sink.len(), 2);
}
