use std::sync::Arc;
use std::thread;

use dbtrace_log::{
    Attributes, Context, EventTranslator, Level, MemorySink, Severity, TraceEvent, TraceLogger,
    Value,
};
use rstest::rstest;

fn attrs(pairs: Vec<(&str, Value)>) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn query_event_end_to_end() {
    let sink = Arc::new(MemorySink::new());
    let ctx = Context::new().with_logger(sink.clone());

    EventTranslator::new().log(
        &ctx,
        Severity::Error,
        "Query",
        attrs(vec![
            ("sql", Value::from("-- name: find_user\nSELECT 1")),
            ("args", Value::List(vec![Value::Int(1), Value::Int(2)])),
        ]),
    );

    let records = sink.take();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, Level::ERROR);
    assert_eq!(record.message, "Query");
    assert_eq!(record.group, "query");
    assert_eq!(record.attribute("sql_operation"), Some(&Value::from("find_user")));
    assert_eq!(record.attribute("sql"), Some(&Value::from("SELECT 1")));
    assert_eq!(
        record.attribute("args"),
        Some(&Value::List(vec![Value::Int(1), Value::Int(2)]))
    );

    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["attributes"]["sql_operation"], "find_user");
    assert_eq!(json["level"], "ERROR");
}

#[test]
fn args_references_are_resolved_and_nil_is_kept() {
    let event = TraceEvent::new("Query", Severity::Info).with_attr(
        "args",
        Value::List(vec![Value::reference(42), Value::nil()]),
    );
    let record = EventTranslator::new().translate(&event);

    assert_eq!(
        record.attribute("args"),
        Some(&Value::List(vec![Value::Int(42), Value::nil()]))
    );
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["attributes"]["args"], serde_json::json!([42, null]));
}

#[rstest]
#[case(Severity::Trace, Level::new(-10), Some(6))]
#[case(Severity::None, Level::new(-5), Some(1))]
#[case(Severity::Other(0), Level::DEBUG, Some(0))]
#[case(Severity::Debug, Level::DEBUG, None)]
#[case(Severity::Warn, Level::WARN, None)]
fn severities_never_lose_information(
    #[case] severity: Severity,
    #[case] level: Level,
    #[case] raw: Option<i64>,
) {
    let record = EventTranslator::new().translate(&TraceEvent::new("Connect", severity));
    assert_eq!(record.level, level);
    assert_eq!(record.attribute("driver_log_level"), raw.map(Value::Int).as_ref());
}

#[test]
fn keys_are_canonical_in_output() {
    let event = TraceEvent::new("Query", Severity::Info)
        .with_attr("commandTag", "SELECT 1")
        .with_attr("SQLQuery", "x")
        .with_attr("batch size", 3);
    let record = EventTranslator::new().translate(&event);

    let keys: Vec<&str> = record.attributes.iter().map(|a| a.key.as_str()).collect();
    // sorted by raw key: "SQLQuery" < "batch size" < "commandTag"
    assert_eq!(keys, vec!["sql_query", "batch_size", "command_tag"]);
}

#[test]
fn concurrent_translation_keeps_every_record() {
    let sink = Arc::new(MemorySink::new());
    let translator = Arc::new(EventTranslator::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let translator = Arc::clone(&translator);
            let ctx = Context::new().with_logger(sink.clone());
            thread::spawn(move || {
                for i in 0..50 {
                    let data = attrs(vec![
                        ("sql", Value::from(format!("-- name: w{worker}\nSELECT {i}"))),
                        ("args", Value::List(vec![Value::reference(i)])),
                    ]);
                    translator.log(&ctx, Severity::Info, "Query", data);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let records = sink.records();
    assert_eq!(records.len(), 400);
    assert!(records
        .iter()
        .all(|r| matches!(r.attribute("sql_operation"), Some(Value::Str(name)) if name.starts_with('w'))));
}
