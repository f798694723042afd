use std::sync::Arc;
use std::time::Instant;

use dbtrace_log::init::init_tracing;
use dbtrace_log::{
    Attributes, Context, EventTranslator, LogSink, MemorySink, NoopSink, Severity, TraceLogger,
    TranslatorConfig, Value,
};

/// Stand-in for a driver connection that reports every step to its tracer.
struct FakeConn<'a> {
    tracer: &'a dyn TraceLogger,
}

impl FakeConn<'_> {
    fn query(&self, ctx: &Context, sql: &str, args: Vec<Value>) {
        let mut data = Attributes::new();
        data.insert("sql".to_string(), Value::from(sql));
        data.insert("args".to_string(), Value::List(args));
        data.insert("commandTag".to_string(), Value::from("SELECT 1"));
        data.insert("rowCount".to_string(), Value::from(1u64));
        self.tracer.log(ctx, Severity::Info, "Query", data);
    }

    fn batch(&self, ctx: &Context, sql: &str) {
        let mut data = Attributes::new();
        data.insert("sql".to_string(), Value::from(sql));
        self.tracer.log(ctx, Severity::Debug, "BatchQuery", data);
        self.tracer.log(ctx, Severity::Trace, "BatchClose", Attributes::new());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let translator = EventTranslator::with_config(TranslatorConfig::from_env()?);
    let conn = FakeConn { tracer: &translator };
    let ctx = Context::new();

    conn.query(
        &ctx,
        "-- name: get_customer :one\nSELECT * FROM customer WHERE id = $1 -- by pk",
        vec![Value::reference(42), Value::nil()],
    );
    conn.batch(&ctx, "INSERT INTO audit (msg) VALUES ($1)");

    let n: u64 = 100_000;
    let sinks: [(&str, Arc<dyn LogSink>); 2] = [
        ("noop", Arc::new(NoopSink)),
        ("memory", Arc::new(MemorySink::new())),
    ];
    for (label, sink) in sinks {
        let ctx = Context::new().with_logger(sink);
        let start = Instant::now();
        for i in 0..n {
            conn.query(
                &ctx,
                "-- name: load_test\nSELECT $1",
                vec![Value::reference(i)],
            );
        }
        let elapsed = start.elapsed();
        println!(
            "{label}: translated {} events in {:?} (~{:.0} ev/s)",
            n,
            elapsed,
            n as f64 / elapsed.as_secs_f64()
        );
    }

    Ok(())
}
