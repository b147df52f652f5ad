use serde::Deserialize;

use super::lenient;
use super::schema::SchemaOrRef;

pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const APPLICATION_JSON: &str = "application/json";

/// Whether a request content type is a form encoding, whose body is sent as
/// individual fields rather than a serialized model.
pub fn is_form_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    essence.eq_ignore_ascii_case(MULTIPART_FORM_DATA) || essence.eq_ignore_ascii_case(FORM_URLENCODED)
}

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    #[serde(deserialize_with = "lenient")]
    pub schema: Option<SchemaOrRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_form_content_type() {
        assert!(is_form_content_type("multipart/form-data"));
        assert!(is_form_content_type("multipart/form-data; boundary=xyz"));
        assert!(is_form_content_type("application/x-www-form-urlencoded"));
        assert!(!is_form_content_type("application/json"));
    }
}
