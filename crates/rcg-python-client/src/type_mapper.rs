use rcg_core::ir::TypeRef;
use serde_json::Value;

/// Map a `TypeRef` to the annotation of a function argument, including its
/// default when the argument may be omitted.
pub fn python_argument(type_ref: &TypeRef, required: bool, default: Option<&Value>) -> String {
    match default {
        Some(value) if !value.is_null() => format!("{type_ref} = {}", python_literal(value)),
        _ if required => type_ref.to_string(),
        _ if matches!(type_ref, TypeRef::Any) => "Any = None".to_string(),
        _ => format!("{type_ref} | None = None"),
    }
}

/// Render a JSON value as a Python literal.
pub fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        // JSON string escapes are valid Python string escapes
        Value::String(s) => Value::String(s.clone()).to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    let key = python_literal(&Value::String(k.clone()));
                    format!("{key}: {}", python_literal(v))
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literals() {
        assert_eq!(python_literal(&json!(null)), "None");
        assert_eq!(python_literal(&json!(true)), "True");
        assert_eq!(python_literal(&json!(0)), "0");
        assert_eq!(python_literal(&json!(0.0)), "0.0");
        assert_eq!(python_literal(&json!("a\"b")), r#""a\"b""#);
        assert_eq!(
            python_literal(&json!({"on": false, "tags": ["x", 1]})),
            r#"{"on": False, "tags": ["x", 1]}"#
        );
    }

    #[test]
    fn test_arguments() {
        assert_eq!(python_argument(&TypeRef::Int, true, None), "int");
        assert_eq!(python_argument(&TypeRef::Int, false, None), "int | None = None");
        assert_eq!(python_argument(&TypeRef::Any, false, None), "Any = None");
        assert_eq!(
            python_argument(&TypeRef::Str, false, Some(&json!(""))),
            r#"str = """#
        );
        assert_eq!(
            python_argument(&TypeRef::Bool, true, Some(&json!(true))),
            "bool = True"
        );
        assert_eq!(
            python_argument(
                &TypeRef::List(Box::new(TypeRef::Model("Pet".into()))),
                false,
                None
            ),
            "list[Pet] | None = None"
        );
    }
}
