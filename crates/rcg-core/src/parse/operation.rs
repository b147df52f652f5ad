use indexmap::IndexMap;
use serde::Deserialize;

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::{lenient, lenient_seq};

/// The HTTP verbs that may appear as keys of a path item. Anything else
/// under a path (`parameters`, `summary`, extensions) is not an operation.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "patch", "head", "options", "trace",
];

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "operationId", deserialize_with = "lenient")]
    pub operation_id: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub summary: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient_seq")]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "lenient_seq")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", deserialize_with = "lenient")]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(deserialize_with = "lenient")]
    pub responses: IndexMap<String, ResponseOrRef>,

    /// Swagger 2.0 request content types.
    #[serde(deserialize_with = "lenient")]
    pub consumes: Vec<String>,

    #[serde(deserialize_with = "lenient")]
    pub deprecated: bool,
}
