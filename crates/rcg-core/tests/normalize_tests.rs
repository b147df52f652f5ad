use rcg_core::parse;
use rcg_core::transform::{DotRemover, InlineSchemaExtractor, SpecNormalizer, SpecTransform};
use serde_json::{Value, json};

const BLOG: &str = include_str!("fixtures/blog.yaml");
const PETSTORE: &str = include_str!("fixtures/petstore-swagger2.json");

fn has_dotted_schema_or_ref(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(key, child)| {
            (key == "$ref" && child.as_str().is_some_and(|r| r.contains('.')))
                || has_dotted_schema_or_ref(child)
        }),
        Value::Array(items) => items.iter().any(has_dotted_schema_or_ref),
        _ => false,
    }
}

#[test]
fn blog_is_hoisted_and_undotted() {
    let spec = SpecNormalizer::new().normalize(parse::from_yaml(BLOG).unwrap());
    let document = spec.as_value();
    let schemas = document["components"]["schemas"].as_object().unwrap();

    assert!(schemas.contains_key("CreatePostRequest"));
    assert!(schemas.contains_key("CreatePostRequest_author"));
    assert!(schemas.contains_key("GetAdminStatsSuccessResponse"));
    assert!(schemas.contains_key("commonError"));
    assert!(schemas.keys().all(|k| !k.contains('.')));
    assert!(!has_dotted_schema_or_ref(document));

    assert_eq!(
        document["paths"]["/posts"]["post"]["requestBody"]["content"]["application/json"]["schema"],
        json!({"$ref": "#/components/schemas/CreatePostRequest"})
    );
    assert_eq!(
        schemas["CreatePostRequest"]["properties"]["author"],
        json!({"$ref": "#/components/schemas/CreatePostRequest_author"})
    );
    assert_eq!(document["paths"]["/admin/stats"]["get"]["tags"], json!(["blogadmin"]));

    // Multipart bodies stay inline
    assert!(
        document["paths"]["/users/{userId}/avatar"]["put"]["requestBody"]["content"]
            ["multipart/form-data"]["schema"]["properties"]
            .is_object()
    );
}

#[test]
fn swagger2_hoists_into_definitions() {
    let spec = SpecNormalizer::new().normalize(parse::from_json(PETSTORE).unwrap());
    let document = spec.as_value();
    let definitions = document["definitions"].as_object().unwrap();
    assert!(definitions.contains_key("PlaceOrderRequest"));
    assert!(definitions.contains_key("PlaceOrderSuccessResponse"));
    assert_eq!(
        document["paths"]["/store/order"]["post"]["parameters"][0]["schema"],
        json!({"$ref": "#/definitions/PlaceOrderRequest"})
    );
    assert!(document["components"]["schemas"].is_object());
}

#[test]
fn inline_body_without_operation_id() {
    let body = json!({
        "type": "object",
        "required": ["email"],
        "properties": {"email": {"type": "string"}, "age": {"type": "integer"}}
    });
    let mut document = json!({
        "openapi": "3.0.0",
        "paths": {"/signup": {"post": {
            "requestBody": {"content": {"application/json": {"schema": body.clone()}}}
        }}}
    });
    InlineSchemaExtractor.apply(&mut document);

    assert_eq!(
        document["paths"]["/signup"]["post"]["requestBody"]["content"]["application/json"]["schema"],
        json!({"$ref": "#/components/schemas/PostSignupRequest"})
    );
    assert_eq!(document["components"]["schemas"]["PostSignupRequest"], body);
}

#[test]
fn patchers_are_idempotent() {
    for document in [parse::from_yaml(BLOG).unwrap(), parse::from_json(PETSTORE).unwrap()] {
        let normalizer = SpecNormalizer::new();
        let once = normalizer.normalize(document).into_value();
        let twice = normalizer.normalize(once.clone()).into_value();
        assert_eq!(once, twice);

        let mut again = once.clone();
        InlineSchemaExtractor.apply(&mut again);
        DotRemover.apply(&mut again);
        assert_eq!(again, once);
    }
}

#[test]
fn dotted_schema_ref_still_resolves() {
    let spec = SpecNormalizer::new().normalize(json!({
        "openapi": "3.0.0",
        "components": {"schemas": {"User.Profile": {"type": "object"}}},
        "paths": {"/me": {"get": {"responses": {"200": {"content": {"application/json": {
            "schema": {"$ref": "#/components/schemas/User.Profile"}
        }}}}}}}
    }));
    let document = spec.as_value();
    let reference = document["paths"]["/me"]["get"]["responses"]["200"]["content"]
        ["application/json"]["schema"]["$ref"]
        .as_str()
        .unwrap();
    assert_eq!(reference, "#/components/schemas/UserProfile");
    assert!(document.pointer("/components/schemas/UserProfile").is_some());
}

#[test]
fn custom_transform_runs_last() {
    struct Stamp;
    impl SpecTransform for Stamp {
        fn name(&self) -> &str {
            "stamp"
        }
        fn apply(&self, document: &mut Value) {
            document["x-stamped"] = json!(true);
        }
    }

    let mut normalizer = SpecNormalizer::new();
    normalizer.add_transform(Stamp);
    assert_eq!(
        normalizer.transform_names(),
        vec!["inline-schema-extraction", "dot-removal", "stamp"]
    );
    let spec = normalizer.normalize(json!({"openapi": "3.1.0"}));
    assert_eq!(spec.as_value()["x-stamped"], true);
}
