use serde::Deserialize;

use super::lenient;
use super::schema::{SchemaOrRef, TypeSet};

/// Parameter location. A missing `in` is treated as a query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    #[default]
    Query,
    Header,
    Path,
    Cookie,
    /// Swagger 2.0 request body.
    Body,
    /// Swagger 2.0 form field.
    FormData,
    #[serde(other)]
    Unknown,
}

/// An API parameter. Swagger 2.0 declares `type`, `format`, `items` and
/// `default` on the parameter itself instead of under `schema`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(deserialize_with = "lenient")]
    pub name: String,

    #[serde(rename = "in", deserialize_with = "lenient")]
    pub location: ParameterLocation,

    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub required: bool,

    #[serde(deserialize_with = "lenient")]
    pub schema: Option<SchemaOrRef>,

    #[serde(rename = "type", deserialize_with = "lenient")]
    pub param_type: Option<TypeSet>,

    #[serde(deserialize_with = "lenient")]
    pub format: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "default")]
    pub default_value: Option<serde_json::Value>,
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locations() {
        for (raw, expected) in [
            ("query", ParameterLocation::Query),
            ("header", ParameterLocation::Header),
            ("path", ParameterLocation::Path),
            ("cookie", ParameterLocation::Cookie),
            ("body", ParameterLocation::Body),
            ("formData", ParameterLocation::FormData),
            ("matrix", ParameterLocation::Unknown),
        ] {
            let p: Parameter = serde_json::from_value(json!({"name": "x", "in": raw})).unwrap();
            assert_eq!(p.location, expected, "location {raw}");
        }
    }

    #[test]
    fn test_missing_location_is_query() {
        let p: Parameter = serde_json::from_value(json!({"name": "limit"})).unwrap();
        assert_eq!(p.location, ParameterLocation::Query);
        assert!(!p.required);
    }

    #[test]
    fn test_swagger2_inline_type() {
        let p: Parameter = serde_json::from_value(json!({
            "name": "tags",
            "in": "query",
            "type": "array",
            "items": {"type": "string"},
            "default": []
        }))
        .unwrap();
        assert_eq!(p.param_type, Some(TypeSet::Single("array".to_string())));
        assert!(p.items.is_some());
        assert_eq!(p.default_value, Some(json!([])));
    }

    #[test]
    fn test_ref_parameter() {
        let p: ParameterOrRef =
            serde_json::from_value(json!({"$ref": "#/components/parameters/Limit"})).unwrap();
        assert!(matches!(p, ParameterOrRef::Ref { .. }));
    }
}
