pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

use crate::error::ParseError;

/// Parse a document from JSON.
pub fn from_json(input: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a document from YAML.
///
/// YAML allows non-string mapping keys (`200:` under `responses`), so the
/// document is read as YAML first and its keys are stringified on the way to
/// JSON.
pub fn from_yaml(input: &str) -> Result<Value, ParseError> {
    let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    Ok(yaml_to_json(yaml))
}

/// Parse a document of unknown format: JSON first, then YAML.
///
/// When both fail the JSON error is reported, since remote specifications are
/// overwhelmingly JSON.
pub fn from_str_auto(input: &str) -> Result<Value, ParseError> {
    from_json(input).or_else(|json_err| from_yaml(input).map_err(|_| json_err))
}

fn yaml_to_json(value: serde_yaml_ng::Value) -> Value {
    use serde_yaml_ng::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml_ng::Value) -> String {
    use serde_yaml_ng::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml_ng::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Deserialize a field, falling back to its default when the document holds
/// something of the wrong shape (`required: true` on a schema, `items` given
/// as a tuple list, ...).
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a list element by element, dropping (and logging) entries
/// that do not fit `T` instead of rejecting the whole list.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::warn!("skipping malformed list entry: {err}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = from_json(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
    }

    #[test]
    fn test_from_yaml_stringifies_status_keys() {
        let value = from_yaml(
            r#"
paths:
  /pets:
    get:
      responses:
        200:
          description: ok
"#,
        )
        .unwrap();
        assert_eq!(
            value["paths"]["/pets"]["get"]["responses"]["200"]["description"],
            "ok"
        );
    }

    #[test]
    fn test_from_str_auto_accepts_both_formats() {
        assert_eq!(from_str_auto(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(from_str_auto("a: 1\n").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_from_str_auto_reports_json_error() {
        let err = from_str_auto("{ not: [valid").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
