use indexmap::IndexMap;
use serde::Deserialize;

use super::lenient;
use super::media_type::MediaType;

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub content: IndexMap<String, MediaType>,

    #[serde(deserialize_with = "lenient")]
    pub required: bool,
}

/// A reference or inline request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}
