use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::parse::operation::HTTP_METHODS;

use super::normalizer::SpecTransform;

/// Remove dots from schema component names and tags.
///
/// Every dotted schema name (under `components.schemas` or `definitions`) and
/// every dotted tag (on operations or in the top-level `tags` list) is
/// collected first. The document is then walked once, renaming object keys
/// and string values that equal a dotted name, and rewriting strings whose
/// last `/` segment is one (the tail of a `$ref`). Substrings of longer
/// strings are left alone.
pub struct DotRemover;

impl SpecTransform for DotRemover {
    fn name(&self) -> &str {
        "dot-removal"
    }

    fn apply(&self, document: &mut Value) {
        let renames = collect_dotted_names(document);
        if renames.is_empty() {
            return;
        }
        for (from, to) in &renames {
            log::debug!("renaming '{from}' to '{to}'");
        }
        rewrite(document, &renames);
    }
}

fn collect_dotted_names(document: &Value) -> HashMap<String, String> {
    let mut names: Vec<&str> = Vec::new();

    for section in [
        document.pointer("/components/schemas"),
        document.get("definitions"),
    ] {
        if let Some(schemas) = section.and_then(Value::as_object) {
            names.extend(schemas.keys().map(String::as_str));
        }
    }

    if let Some(tags) = document.get("tags").and_then(Value::as_array) {
        names.extend(
            tags.iter()
                .filter_map(|t| t.get("name").and_then(Value::as_str)),
        );
    }

    if let Some(paths) = document.get("paths").and_then(Value::as_object) {
        for item in paths.values() {
            for method in HTTP_METHODS {
                if let Some(tags) = item
                    .get(method)
                    .and_then(|op| op.get("tags"))
                    .and_then(Value::as_array)
                {
                    names.extend(tags.iter().filter_map(Value::as_str));
                }
            }
        }
    }

    names
        .into_iter()
        .filter(|name| name.contains('.'))
        .map(|name| (name.to_string(), name.replace('.', "")))
        .collect()
}

fn rewrite(value: &mut Value, renames: &HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            let entries = std::mem::take(map);
            let mut renamed = Map::new();
            for (key, mut child) in entries {
                rewrite(&mut child, renames);
                let key = renames.get(&key).cloned().unwrap_or(key);
                if renamed.contains_key(&key) {
                    log::warn!("renaming produced a duplicate key '{key}'; keeping the later entry");
                }
                renamed.insert(key, child);
            }
            *map = renamed;
        }
        Value::Array(items) => {
            for item in items {
                rewrite(item, renames);
            }
        }
        Value::String(s) => {
            if let Some(new) = renames.get(s.as_str()) {
                *s = new.clone();
            } else if let Some((head, tail)) = s.rsplit_once('/')
                && let Some(new) = renames.get(tail)
            {
                *s = format!("{head}/{new}");
            }
        }
        _ => {}
    }
}
