//! JSON input from a file or stdin.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use dataverse_core::Record;

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &str) -> Result<Value> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        let content = std::fs::read_to_string(path).context("Failed to read JSON file")?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    }
}

/// Require a JSON object.
pub fn into_record(value: Value) -> Result<Record> {
    match value {
        Value::Object(record) => Ok(record),
        other => bail!("Expected a JSON object, got {}", kind(&other)),
    }
}

/// Accept one object or an array of objects.
pub fn into_records(value: Value) -> Result<Records> {
    match value {
        Value::Object(record) => Ok(Records::One(record)),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                into_record(item).with_context(|| format!("Invalid record at index {}", index))
            })
            .collect::<Result<Vec<_>>>()
            .map(Records::Many),
        other => bail!("Expected a JSON object or array, got {}", kind(&other)),
    }
}

#[derive(Debug)]
pub enum Records {
    One(Record),
    Many(Vec<Record>),
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_is_a_single_record() {
        let records = into_records(json!({"name": "A"})).unwrap();
        assert!(matches!(records, Records::One(r) if r["name"] == "A"));
    }

    #[test]
    fn array_is_a_batch() {
        let records = into_records(json!([{"name": "A"}, {"name": "B"}])).unwrap();
        match records {
            Records::Many(records) => assert_eq!(records.len(), 2),
            Records::One(_) => panic!("expected a batch"),
        }
    }

    #[test]
    fn non_object_items_are_rejected() {
        let err = into_records(json!([{"name": "A"}, 3])).unwrap_err();
        assert!(format!("{:#}", err).contains("index 1"));
        assert!(into_records(json!("text")).is_err());
    }

    #[test]
    fn reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, r#"{"name": "A"}"#).unwrap();

        let value = read_json(path.to_str().unwrap()).unwrap();
        assert_eq!(value, json!({"name": "A"}));
    }
}
