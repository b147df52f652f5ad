use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::{lenient, lenient_seq};

/// Dialect of a loaded document, read from the `openapi` or `swagger` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersion {
    OpenApi3(String),
    Swagger2(String),
    Unknown,
}

impl SpecVersion {
    pub fn detect(document: &Value) -> Self {
        let declared = document
            .get("openapi")
            .or_else(|| document.get("swagger"))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        match declared {
            Some(v) if v.starts_with("2.") || v == "2" => SpecVersion::Swagger2(v),
            Some(v) if v.starts_with("3.") => SpecVersion::OpenApi3(v),
            _ => SpecVersion::Unknown,
        }
    }

    pub fn is_swagger2(&self) -> bool {
        matches!(self, SpecVersion::Swagger2(_))
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::OpenApi3(v) => write!(f, "OpenAPI {v}"),
            SpecVersion::Swagger2(v) => write!(f, "Swagger {v}"),
            SpecVersion::Unknown => write!(f, "unknown"),
        }
    }
}

/// Info object describing the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Info {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub version: Option<String>,
}

/// Tag definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// The document-level fields the parser reads; paths are walked separately
/// so one malformed operation cannot reject the whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentHeader {
    #[serde(deserialize_with = "lenient")]
    pub info: Info,

    #[serde(deserialize_with = "lenient_seq")]
    pub tags: Vec<Tag>,

    /// Swagger 2.0 document-wide request content types.
    #[serde(deserialize_with = "lenient")]
    pub consumes: Vec<String>,
}

impl DocumentHeader {
    pub fn from_document(document: &Value) -> Self {
        Self::deserialize(document).unwrap_or_default()
    }
}
