use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("metadata is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("metadata must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("metadata value for key {key:?} must be a string, number or boolean, got {kind}")]
    UnsupportedValue { key: String, kind: &'static str },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse the `--metadata` argument into the string map CDF stores with a file.
///
/// String values are kept verbatim. Numbers and booleans are stored as their
/// JSON text, so `{"rev": 3}` becomes `rev = "3"`.
///
/// # Arguments
/// * `raw` - The JSON text given on the command line
///
/// # Returns
/// * `Ok(BTreeMap<String, String>)` - The metadata, ordered by key
/// * `Err(MetadataError)` - The text is not JSON, not an object, or holds nested values
pub fn parse_metadata(raw: &str) -> Result<BTreeMap<String, String>, MetadataError> {
    trace!("Parsing metadata: {}", raw);

    let value: Value = serde_json::from_str(raw)?;
    let object = match value {
        Value::Object(object) => object,
        other => return Err(MetadataError::NotAnObject(kind_of(&other))),
    };

    let mut metadata = BTreeMap::new();
    for (key, value) in object {
        let text = match value {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            other => {
                return Err(MetadataError::UnsupportedValue {
                    key,
                    kind: kind_of(&other),
                })
            }
        };
        metadata.insert(key, text);
    }

    debug!("Parsed {} metadata entries", metadata.len());
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_values_round_trip() {
        let metadata = parse_metadata(r#"{"a":"b"}"#).unwrap();
        assert_eq!(metadata, BTreeMap::from([("a".to_string(), "b".to_string())]));
    }

    #[test]
    fn test_scalars_become_strings() {
        let metadata = parse_metadata(r#"{"rev": 3, "ratio": 0.5, "approved": true}"#).unwrap();
        assert_eq!(metadata["rev"], "3");
        assert_eq!(metadata["ratio"], "0.5");
        assert_eq!(metadata["approved"], "true");
    }

    #[test]
    fn test_empty_object() {
        assert!(parse_metadata("{}").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let error = parse_metadata("{not valid json").unwrap_err();
        assert!(matches!(error, MetadataError::InvalidJson(_)));
        assert!(error.to_string().starts_with("metadata is not valid JSON"));
    }

    #[test]
    fn test_non_object() {
        let error = parse_metadata(r#"["a","b"]"#).unwrap_err();
        assert_eq!(error.to_string(), "metadata must be a JSON object, got an array");
    }

    #[test]
    fn test_nested_value_rejected() {
        let error = parse_metadata(r#"{"a":{"b":"c"}}"#).unwrap_err();
        match error {
            MetadataError::UnsupportedValue { key, kind } => {
                assert_eq!(key, "a");
                assert_eq!(kind, "an object");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
