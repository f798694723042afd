use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::caller::Caller;
use crate::severity::Level;
use crate::value::Value;

/// A single normalized key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Attr {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Structured log record produced from one trace event.
///
/// `attributes` keep their insertion order and are reported under the
/// `group` label.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub group: String,
    #[serde(serialize_with = "serialize_attrs")]
    pub attributes: Vec<Attr>,
    pub caller: Option<Caller>,
}

impl LogRecord {
    /// First attribute stored under `key`.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| &attr.value)
    }

    /// Attributes rendered as a JSON object, in record order.
    pub fn attributes_json(&self) -> String {
        serde_json::to_string(&AttrsView(&self.attributes)).unwrap_or_else(|_| "{}".to_string())
    }
}

struct AttrsView<'a>(&'a [Attr]);

impl Serialize for AttrsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_attrs(self.0, serializer)
    }
}

fn serialize_attrs<S: Serializer>(attrs: &[Attr], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(attrs.len()))?;
    for attr in attrs {
        map.serialize_entry(&attr.key, &attr.value)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            level: Level::WARN,
            message: "Query".to_string(),
            group: "query".to_string(),
            attributes: vec![
                Attr::new("sql_operation", "find_user"),
                Attr::new("sql", "SELECT 1"),
                Attr::new("args", Value::List(vec![Value::Int(1)])),
            ],
            caller: None,
        }
    }

    #[test]
    fn attributes_json_keeps_record_order() {
        assert_eq!(
            record().attributes_json(),
            r#"{"sql_operation":"find_user","sql":"SELECT 1","args":[1]}"#
        );
    }

    #[test]
    fn serializes_level_as_name() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["level"], "WARN");
        assert_eq!(json["group"], "query");
        assert_eq!(json["attributes"]["sql"], "SELECT 1");
        assert!(json["caller"].is_null());
    }

    #[test]
    fn attribute_lookup_by_key() {
        let record = record();
        assert_eq!(record.attribute("sql"), Some(&Value::Str("SELECT 1".into())));
        assert_eq!(record.attribute("missing"), None);
    }
}
