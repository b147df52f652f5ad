use indexmap::IndexMap;
use serde::Deserialize;

use super::lenient;
use super::media_type::MediaType;
use super::schema::SchemaOrRef;

/// A response definition. OpenAPI 3.x nests the body schema under `content`;
/// Swagger 2.0 puts it directly on the response as `schema`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub content: IndexMap<String, MediaType>,

    #[serde(deserialize_with = "lenient")]
    pub schema: Option<SchemaOrRef>,
}

impl Response {
    /// Body schemas in declaration order, whichever dialect declared them.
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaOrRef> {
        self.content
            .values()
            .filter_map(|media| media.schema.as_ref())
            .chain(self.schema.as_ref())
    }
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}
