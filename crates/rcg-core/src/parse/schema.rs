use indexmap::IndexMap;
use serde::Deserialize;

use super::lenient;

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeSet {
    /// The first declared type that is not `null`.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeSet::Single(t) => Some(t.as_str()),
            TypeSet::Multiple(types) => types.iter().map(String::as_str).find(|t| *t != "null"),
        }
    }

    pub fn contains(&self, ty: &str) -> bool {
        match self {
            TypeSet::Single(t) => t == ty,
            TypeSet::Multiple(types) => types.iter().any(|t| t == ty),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => Some(ref_path),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

/// The subset of a JSON Schema object the parser inspects. Every field is
/// optional and tolerates malformed values.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub schema_type: Option<TypeSet>,

    #[serde(deserialize_with = "lenient")]
    pub format: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(rename = "default")]
    pub default_value: Option<serde_json::Value>,

    #[serde(deserialize_with = "lenient")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(deserialize_with = "lenient")]
    pub required: Vec<String>,

    #[serde(deserialize_with = "lenient")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "allOf", deserialize_with = "lenient")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", deserialize_with = "lenient")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", deserialize_with = "lenient")]
    pub any_of: Vec<SchemaOrRef>,
}

impl Schema {
    pub fn primary_type(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }

    /// An object schema with at least one declared property.
    pub fn is_inline_object(&self) -> bool {
        let object_typed = self
            .schema_type
            .as_ref()
            .is_none_or(|t| t.contains("object"));
        object_typed && !self.properties.is_empty()
    }

    /// A composite with at least one inline object branch. Composites made
    /// only of references name no model of their own.
    pub fn has_inline_branch(&self) -> bool {
        [&self.all_of, &self.one_of, &self.any_of]
            .into_iter()
            .flatten()
            .any(|branch| matches!(branch, SchemaOrRef::Schema(inner) if inner.is_inline_object()))
    }

    /// A schema that is nothing but `allOf: [{$ref}]`, the usual way of
    /// attaching a description or default to a referenced model.
    pub fn single_all_of_ref(&self) -> Option<&str> {
        match self.all_of.as_slice() {
            [only] => only.ref_path(),
            _ => None,
        }
    }
}
