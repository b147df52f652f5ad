use serde_json::{Map, Value};

use crate::parse::spec::SpecVersion;

use super::promote_inline::InlineSchemaExtractor;
use super::strip_dots::DotRemover;

/// A rewrite applied to a raw document before it is parsed.
///
/// Implementations must be idempotent: applying a transform to its own
/// output leaves the document unchanged.
pub trait SpecTransform {
    fn name(&self) -> &str;
    fn apply(&self, document: &mut Value);
}

/// A document that has been through every transform of a `SpecNormalizer`.
///
/// Only the normalizer constructs one, and it exposes no mutable access, so
/// the parser always sees the hoisted, dot-free form.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSpec(Value);

impl NormalizedSpec {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn version(&self) -> SpecVersion {
        SpecVersion::detect(&self.0)
    }
}

/// Runs an ordered list of transforms over a document.
pub struct SpecNormalizer {
    transforms: Vec<Box<dyn SpecTransform>>,
}

impl Default for SpecNormalizer {
    /// Inline extraction first, so dot removal also sees hoisted names.
    fn default() -> Self {
        Self {
            transforms: vec![Box::new(InlineSchemaExtractor), Box::new(DotRemover)],
        }
    }
}

impl SpecNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer with no transforms at all.
    pub fn empty() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn add_transform(&mut self, transform: impl SpecTransform + 'static) -> &mut Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    pub fn normalize(&self, document: Value) -> NormalizedSpec {
        let mut document = match document {
            Value::Object(map) => Value::Object(map),
            Value::Null => Value::Object(Map::new()),
            other => {
                log::warn!(
                    "specification is not a mapping (found {}); treating it as empty",
                    value_kind(&other)
                );
                Value::Object(Map::new())
            }
        };

        if let Value::Object(root) = &mut document {
            ensure_components_schemas(root);
        }
        for transform in &self.transforms {
            log::debug!("applying spec transform {}", transform.name());
            transform.apply(&mut document);
        }
        NormalizedSpec(document)
    }
}

/// Get a child mapping, replacing a missing or non-mapping value with `{}`.
pub(crate) fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut()
}

/// Make sure `components.schemas` exists so consumers need not null-check it.
pub(crate) fn ensure_components_schemas(root: &mut Map<String, Value>) {
    if let Some(components) = object_entry(root, "components") {
        object_entry(components, "schemas");
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
