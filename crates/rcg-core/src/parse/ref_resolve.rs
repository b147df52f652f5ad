use std::collections::HashSet;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};

/// Resolves local `$ref` pointers (`#/components/...`, `#/definitions/...`)
/// against the document they came from.
///
/// A reference that cannot be resolved (external, dangling, or circular)
/// yields `None` and a warning naming the reference; it never fails the parse.
pub struct RefResolver<'a> {
    document: &'a Value,
}

impl<'a> RefResolver<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    /// Look up the raw node a reference points at, without following further
    /// references.
    pub fn lookup(&self, ref_path: &str) -> Option<&'a Value> {
        let pointer = ref_path.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.document);
        }
        self.document.pointer(pointer)
    }

    /// Follow a chain of references and deserialize the final target.
    fn follow<T: DeserializeOwned>(&self, ref_path: &str) -> Option<T> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                log::warn!("circular reference: {ref_path}");
                return None;
            }
            let Some(target) = self.lookup(current) else {
                log::warn!("unresolved reference: {current}");
                return None;
            };
            match target.get("$ref").and_then(Value::as_str) {
                Some(next) => current = next,
                None => {
                    return match T::deserialize(target) {
                        Ok(parsed) => Some(parsed),
                        Err(err) => {
                            log::warn!("reference {current} has an unexpected shape: {err}");
                            None
                        }
                    };
                }
            }
        }
    }

    pub fn resolve_parameter(&self, param: &ParameterOrRef) -> Option<Parameter> {
        match param {
            ParameterOrRef::Ref { ref_path } => self.follow(ref_path),
            ParameterOrRef::Parameter(p) => Some(p.clone()),
        }
    }

    pub fn resolve_request_body(&self, body: &RequestBodyOrRef) -> Option<RequestBody> {
        match body {
            RequestBodyOrRef::Ref { ref_path } => self.follow(ref_path),
            RequestBodyOrRef::RequestBody(rb) => Some(rb.clone()),
        }
    }

    pub fn resolve_response(&self, response: &ResponseOrRef) -> Option<Response> {
        match response {
            ResponseOrRef::Ref { ref_path } => self.follow(ref_path),
            ResponseOrRef::Response(r) => Some(r.clone()),
        }
    }

    pub fn resolve_schema(&self, schema: &SchemaOrRef) -> Option<Schema> {
        match schema {
            SchemaOrRef::Ref { ref_path } => self.follow(ref_path),
            SchemaOrRef::Schema(s) => Some(s.as_ref().clone()),
        }
    }

    /// Whether a reference points at something that exists.
    pub fn exists(&self, ref_path: &str) -> bool {
        self.lookup(ref_path).is_some()
    }
}
