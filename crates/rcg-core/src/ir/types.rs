use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

use crate::parse::spec::SpecVersion;

use super::operations::Handler;

/// Everything the parser extracted from one specification, ready for a
/// generator to consume read-only.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSpec {
    pub service_name: String,
    pub info: ServiceInfo,
    pub handlers: Vec<Handler>,
    /// Every tag seen on an operation, in first-seen order.
    pub all_tags: IndexSet<String>,
    /// Descriptions from the document's top-level `tags` list.
    pub tag_descriptions: IndexMap<String, String>,
    pub request_model_names: IndexSet<String>,
    pub response_model_names: IndexSet<String>,
    /// Tags the caller asked for; empty means all of them.
    pub selected_tags: IndexSet<String>,
}

/// API metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub title: Option<String>,
    pub version: String,
    pub description: String,
    pub spec_version: SpecVersion,
}

impl Serialize for SpecVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The semantic type of a parameter, rendered as a Python annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Int,
    Float,
    Str,
    Bool,
    Bytes,
    Any,
    List(Box<TypeRef>),
    /// A generated model class.
    Model(String),
}

impl TypeRef {
    /// Whether the type needs no model import.
    pub fn is_primitive(&self) -> bool {
        self.model_name().is_none()
    }

    /// The model class this type mentions, directly or as a list element.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            TypeRef::Model(name) => Some(name),
            TypeRef::List(inner) => inner.model_name(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Int => write!(f, "int"),
            TypeRef::Float => write!(f, "float"),
            TypeRef::Str => write!(f, "str"),
            TypeRef::Bool => write!(f, "bool"),
            TypeRef::Bytes => write!(f, "bytes"),
            TypeRef::Any => write!(f, "Any"),
            TypeRef::List(inner) => write!(f, "list[{inner}]"),
            TypeRef::Model(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub param_name: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
