use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::types::{NormalizedName, TypeRef};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Parse a path item key. Only the eight standard verbs are operations.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is sent. Body and form fields are not parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

/// A resolved path/query/header parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Name as declared in the document, used on the wire.
    pub name: String,
    /// Name safe to use as an identifier in generated code.
    pub param_name: String,
    pub location: ParamLocation,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub required: bool,
    pub default: Option<serde_json::Value>,
    pub description: Option<String>,
}

/// One field of a form-encoded or multipart request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormParameter {
    pub name: String,
    pub param_name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub required: bool,
    pub description: Option<String>,
    pub format: Option<String>,
}

/// The request body of an operation: the model it serializes (absent for
/// form bodies without a named schema) and the content type it is sent as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBodyBinding {
    pub model: Option<String>,
    pub content_type: String,
}

/// One HTTP method bound to one path.
#[derive(Debug, Clone, Serialize)]
pub struct Handler {
    /// Path with placeholders renamed to parameter names.
    pub path: String,
    /// Path as written in the document.
    pub raw_path: String,
    pub method: HttpMethod,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Declared `operationId`, or one derived from method and path.
    pub operation_id: String,
    pub name: NormalizedName,
    pub path_parameters: Vec<Parameter>,
    pub query_parameters: Vec<Parameter>,
    pub headers: Vec<Parameter>,
    pub request_body: Option<RequestBodyBinding>,
    pub form_parameters: Vec<FormParameter>,
    /// Status code → response model name.
    pub responses: IndexMap<String, String>,
    pub deprecated: bool,
}

impl Handler {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn request_model(&self) -> Option<&str> {
        self.request_body.as_ref().and_then(|b| b.model.as_deref())
    }

    /// The first `2xx` (or `2XX`) response with a model, as `(status, model)`.
    pub fn success_response(&self) -> Option<(&str, &str)> {
        self.responses
            .iter()
            .find(|(code, _)| code.starts_with('2'))
            .map(|(code, model)| (code.as_str(), model.as_str()))
    }

    /// Path, query and header parameters, in that order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.path_parameters
            .iter()
            .chain(&self.query_parameters)
            .chain(&self.headers)
    }

    pub fn is_form(&self) -> bool {
        !self.form_parameters.is_empty()
    }
}
