use serde_json::{Map, Value, json};

use crate::parse::media_type::is_form_content_type;
use crate::parse::operation::HTTP_METHODS;
use crate::parse::spec::SpecVersion;

use super::name_normalizer::{fallback_operation_id, to_pascal_case};
use super::normalizer::{SpecTransform, object_entry};

const COMBINATORS: [&str; 3] = ["oneOf", "anyOf", "allOf"];

/// Hoist inline object schemas found in request bodies, responses and
/// parameters into named schema components, leaving a `$ref` behind.
///
/// Root names come from the operation: `{Op}Request`, `{Op}{Status}Response`
/// and `{Op}{Param}Param`. Nested objects are named after their position
/// below the root (`{parent}_{property}`, `{parent}_item`,
/// `{parent}_oneOf_{i}`).
///
/// OpenAPI 3.x documents hoist into `components.schemas`; Swagger 2.0
/// documents hoist into `definitions`.
pub struct InlineSchemaExtractor;

impl SpecTransform for InlineSchemaExtractor {
    fn name(&self) -> &str {
        "inline-schema-extraction"
    }

    fn apply(&self, document: &mut Value) {
        let swagger2 = SpecVersion::detect(document).is_swagger2();
        let Some(root) = document.as_object_mut() else {
            return;
        };
        super::normalizer::ensure_components_schemas(root);

        let (mut schemas, prefix) = if swagger2 {
            (take_schemas(root, &["definitions"]), "#/definitions/")
        } else {
            (
                take_schemas(root, &["components", "schemas"]),
                "#/components/schemas/",
            )
        };

        let mut hoister = Hoister {
            schemas: &mut schemas,
            prefix,
            hoisted: 0,
        };
        if let Some(paths) = root.get_mut("paths").and_then(Value::as_object_mut) {
            for (path, item) in paths.iter_mut() {
                let Some(item) = item.as_object_mut() else {
                    continue;
                };
                for method in HTTP_METHODS {
                    if let Some(operation) = item.get_mut(method).and_then(Value::as_object_mut) {
                        hoister.extract_operation(method, path, operation);
                    }
                }
            }
        }
        let hoisted = hoister.hoisted;

        let slot = if swagger2 {
            object_entry(root, "definitions")
        } else {
            object_entry(root, "components").and_then(|c| object_entry(c, "schemas"))
        };
        if let Some(slot) = slot {
            *slot = schemas;
        }
        if hoisted > 0 {
            log::debug!("hoisted {hoisted} inline schemas");
        }
    }
}

fn take_schemas(root: &mut Map<String, Value>, path: &[&str]) -> Map<String, Value> {
    let mut current = Some(root);
    for key in path {
        current = current.and_then(|map| object_entry(map, key));
    }
    current.map(std::mem::take).unwrap_or_default()
}

/// Human readable name for a status code, used in hoisted response names.
pub fn status_name(code: &str) -> String {
    match code {
        "200" => "Success".to_string(),
        "201" => "Created".to_string(),
        "202" => "Accepted".to_string(),
        "204" => "NoContent".to_string(),
        "400" => "BadRequest".to_string(),
        "401" => "Unauthorized".to_string(),
        "403" => "Forbidden".to_string(),
        "404" => "NotFound".to_string(),
        "500" => "ServerError".to_string(),
        other => format!("Status{}", to_pascal_case(other)),
    }
}

/// The name an operation contributes to hoisted schema names.
pub fn operation_base_name(method: &str, path: &str, operation_id: Option<&str>) -> String {
    match operation_id {
        Some(id) if !id.trim().is_empty() => to_pascal_case(id),
        _ => to_pascal_case(&fallback_operation_id(method, path)),
    }
}

struct Hoister<'a> {
    schemas: &'a mut Map<String, Value>,
    prefix: &'static str,
    hoisted: usize,
}

impl Hoister<'_> {
    fn extract_operation(&mut self, method: &str, path: &str, operation: &mut Map<String, Value>) {
        let op_id = operation.get("operationId").and_then(Value::as_str);
        let base = operation_base_name(method, path, op_id);

        if let Some(params) = operation.get_mut("parameters").and_then(Value::as_array_mut) {
            for param in params.iter_mut().filter_map(Value::as_object_mut) {
                let name = if param.get("in").and_then(Value::as_str) == Some("body") {
                    format!("{base}Request")
                } else {
                    let param_name = param.get("name").and_then(Value::as_str).unwrap_or("param");
                    format!("{base}{}Param", to_pascal_case(param_name))
                };
                if let Some(schema) = param.get_mut("schema") {
                    self.extract(schema, &name);
                }
            }
        }

        if let Some(content) = operation
            .get_mut("requestBody")
            .and_then(|b| b.get_mut("content"))
            .and_then(Value::as_object_mut)
        {
            let name = format!("{base}Request");
            for (content_type, media) in content.iter_mut() {
                if is_form_content_type(content_type) {
                    continue;
                }
                if let Some(schema) = media.get_mut("schema") {
                    self.extract(schema, &name);
                }
            }
        }

        if let Some(responses) = operation.get_mut("responses").and_then(Value::as_object_mut) {
            for (code, response) in responses.iter_mut() {
                let Some(response) = response.as_object_mut() else {
                    continue;
                };
                let name = format!("{base}{}Response", status_name(code));
                if let Some(content) = response.get_mut("content").and_then(Value::as_object_mut) {
                    for media in content.values_mut() {
                        if let Some(schema) = media.get_mut("schema") {
                            self.extract(schema, &name);
                        }
                    }
                }
                if let Some(schema) = response.get_mut("schema") {
                    self.extract(schema, &name);
                }
            }
        }
    }

    /// Hoist `schema` under `name` when it is an inline object or a composite
    /// with inline branches. Arrays stay in place and hoist their items.
    fn extract(&mut self, schema: &mut Value, name: &str) {
        if !schema.is_object() || is_ref(schema) {
            return;
        }
        let hoist = is_inline_object(schema) || has_inline_branch(schema);
        self.extract_children(schema, name);
        if hoist {
            let registered = self.register(name, schema.take());
            *schema = json!({ "$ref": format!("{}{registered}", self.prefix) });
        }
    }

    fn extract_children(&mut self, schema: &mut Value, name: &str) {
        let Some(map) = schema.as_object_mut() else {
            return;
        };
        if let Some(properties) = map.get_mut("properties").and_then(Value::as_object_mut) {
            for (prop, child) in properties.iter_mut() {
                self.extract(child, &format!("{name}_{}", name_segment(prop)));
            }
        }
        if let Some(items) = map.get_mut("items") {
            self.extract(items, &format!("{name}_item"));
        }
        for combinator in COMBINATORS {
            if let Some(branches) = map.get_mut(combinator).and_then(Value::as_array_mut) {
                for (i, branch) in branches.iter_mut().enumerate() {
                    self.extract(branch, &format!("{name}_{combinator}_{i}"));
                }
            }
        }
    }

    /// Register a schema under `base`, reusing an identical existing entry
    /// and otherwise appending a numeric suffix.
    fn register(&mut self, base: &str, schema: Value) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 2;
        loop {
            match self.schemas.get(&candidate) {
                None => {
                    self.schemas.insert(candidate.clone(), schema);
                    self.hoisted += 1;
                    return candidate;
                }
                Some(existing) if *existing == schema => return candidate,
                Some(_) => {
                    candidate = format!("{base}{suffix}");
                    suffix += 1;
                }
            }
        }
    }
}

/// A property key as part of a component name. Anything outside
/// `[A-Za-z0-9_]` becomes `_`, so the name is a plain JSON pointer token.
fn name_segment(prop: &str) -> String {
    prop.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn is_ref(schema: &Value) -> bool {
    schema.get("$ref").is_some_and(Value::is_string)
}

/// An object schema with at least one declared property.
fn is_inline_object(schema: &Value) -> bool {
    let typed_object = match schema.get("type") {
        None => true,
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.iter().any(|t| t == "object"),
        Some(_) => false,
    };
    typed_object
        && schema
            .get("properties")
            .and_then(Value::as_object)
            .is_some_and(|props| !props.is_empty())
}

fn has_inline_branch(schema: &Value) -> bool {
    COMBINATORS.iter().any(|combinator| {
        schema
            .get(*combinator)
            .and_then(Value::as_array)
            .is_some_and(|branches| branches.iter().any(is_inline_object))
    })
}
