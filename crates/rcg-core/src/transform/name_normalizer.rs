use std::collections::HashSet;
use std::sync::LazyLock;

use crate::ir::NormalizedName;

/// Python keywords and builtins that cannot be used as parameter names in
/// generated clients without shadowing something.
static RESERVED_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    [
        // keywords
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield", "match", "case",
        // builtins
        "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool", "breakpoint", "bytearray",
        "bytes", "callable", "chr", "classmethod", "compile", "complex", "copyright", "credits",
        "delattr", "dict", "dir", "divmod", "enumerate", "eval", "exec", "exit", "filter",
        "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex",
        "id", "input", "int", "isinstance", "issubclass", "iter", "len", "license", "list",
        "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord",
        "pow", "print", "property", "quit", "range", "repr", "reversed", "round", "set",
        "setattr", "slice", "sorted", "staticmethod", "str", "sum", "super", "tuple", "type",
        "vars", "zip",
    ]
    .into_iter()
    .collect()
});

/// Type spellings that `to_type_annotation` passes through untouched.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "int", "str", "bool", "float", "bytes", "list", "dict", "tuple", "set", "Any", "None",
];

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    NormalizedName {
        original: name.to_string(),
        pascal_case: to_pascal_case(name),
        camel_case: to_camel_case(name),
        snake_case: to_snake_case(name),
        param_name: to_param_name(name),
    }
}

/// Convert an identifier to `snake_case`.
///
/// Spaces, `/`, `.`, `-` and braces act as word separators. A boundary is
/// inserted before an uppercase letter that follows a lowercase letter or a
/// digit, and before the last capital of an acronym run that is followed by a
/// lowercase letter (`HTTPServer` → `http_server`). A digit run that starts a
/// word keeps the capitals that follow it (`2FA` → `2fa`).
pub fn to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input
        .chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .map(|c| if matches!(c, ' ' | '/' | '.') { '_' } else { c })
        .collect();

    let chars = split_acronym_runs(&chars);
    let chars = split_lower_upper(&chars);

    let joined: String = chars.into_iter().collect();
    joined
        .replace('&', "and")
        .replace('-', "_")
        .to_lowercase()
        .trim_matches('_')
        .to_string()
}

/// `ABCDef` → `ABC_Def`
fn split_acronym_runs(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
        let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if prev_upper && c.is_ascii_uppercase() && next_lower {
            out.push('_');
        }
        out.push(c);
    }
    out
}

/// `userId` → `user_Id`, `v2API` → `v2_API`
fn split_lower_upper(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let boundary = prev.is_ascii_lowercase()
                || (prev.is_ascii_digit() && !digit_run_starts_word(chars, i - 1));
            if boundary {
                out.push('_');
            }
        }
        out.push(c);
    }
    out
}

fn digit_run_starts_word(chars: &[char], last_digit: usize) -> bool {
    let mut start = last_digit;
    while start > 0 && chars[start - 1].is_ascii_digit() {
        start -= 1;
    }
    start == 0 || !chars[start - 1].is_alphanumeric()
}

/// Character classes driving the word splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Lower,
    /// Capitals, digits glued to letters, and a lowercase letter closing a
    /// digit-led run such as `1p`.
    Abbreviation,
    Digit,
}

fn classify(
    c: char,
    prev: Option<char>,
    next: Option<char>,
    current: Option<CharKind>,
) -> Option<CharKind> {
    if c.is_lowercase() {
        let after_digit = prev.is_some_and(|p| p.is_ascii_digit());
        let word_ends = next.is_none_or(|n| n.is_whitespace() || !n.is_alphabetic());
        if after_digit && word_ends {
            Some(CharKind::Abbreviation)
        } else {
            Some(CharKind::Lower)
        }
    } else if c.is_uppercase() {
        Some(CharKind::Abbreviation)
    } else if c.is_ascii_digit() {
        if next.is_some_and(|n| n.is_alphabetic()) || current == Some(CharKind::Abbreviation) {
            Some(CharKind::Abbreviation)
        } else {
            Some(CharKind::Digit)
        }
    } else {
        None
    }
}

/// Split an identifier into words, keeping abbreviations such as `SMZ`,
/// `2FA` or `1p` intact.
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '.' | '/') { ' ' } else { c })
        .collect();

    let mut words: Vec<String> = Vec::new();
    let mut current: Vec<char> = Vec::new();
    let mut current_kind: Option<CharKind> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.drain(..).collect());
            }
            current_kind = None;
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let kind = classify(c, prev, chars.get(i + 1).copied(), current_kind);

        match (current_kind, kind) {
            (Some(CharKind::Lower), Some(CharKind::Abbreviation)) => {
                words.push(current.drain(..).collect());
                current.push(c);
            }
            // `HTTPServer`: the capital before a lowercase letter opens the next word.
            (Some(CharKind::Abbreviation), Some(CharKind::Lower)) if current.len() > 1 => {
                if let Some(last) = current.pop() {
                    words.push(current.drain(..).collect());
                    current.push(last);
                }
                current.push(c);
            }
            _ => current.push(c),
        }
        current_kind = kind;
    }
    if !current.is_empty() {
        words.push(current.into_iter().collect());
    }

    words
        .into_iter()
        .map(|word| {
            let chars: Vec<char> = word.chars().collect();
            if chars.len() == 2 && chars[0].is_ascii_digit() && chars[1].is_lowercase() {
                chars[0].to_string() + &chars[1].to_uppercase().to_string()
            } else {
                word
            }
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_abbreviation(word: &str) -> bool {
    if !word.chars().any(char::is_alphabetic) {
        return false;
    }
    let chars: Vec<char> = word.chars().collect();
    if chars.len() == 2 && chars[0].is_ascii_digit() && chars[1].is_alphabetic() {
        return true;
    }
    chars.len() > 1 && chars.iter().all(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn case_word(word: &str) -> String {
    if is_abbreviation(word) {
        word.to_uppercase()
    } else {
        capitalize(word)
    }
}

/// Convert an identifier to `PascalCase`, preserving abbreviations verbatim.
pub fn to_pascal_case(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if matches!(c, '-' | '.' | '/') { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ' ')
        .collect();

    split_words(&cleaned).iter().map(|w| case_word(w)).collect()
}

/// Convert an identifier to `camelCase`. A leading abbreviation is lowercased
/// as a whole (`API2` → `api2`).
pub fn to_camel_case(input: &str) -> String {
    let words = split_words(input);
    let Some((first, rest)) = words.split_first() else {
        return String::new();
    };

    let mut result = if is_abbreviation(first) {
        first.to_lowercase()
    } else {
        let mut chars = first.chars();
        match chars.next() {
            Some(c) => c.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    };
    for word in rest {
        result.push_str(&case_word(word));
    }
    result
}

/// Convert an identifier to a parameter name that is safe in generated code.
pub fn to_param_name(input: &str) -> String {
    let snake = to_snake_case(input);
    if RESERVED_NAMES.contains(snake.as_str()) {
        format!("{snake}_")
    } else {
        snake
    }
}

/// Class names are PascalCase.
pub fn to_class_name(input: &str) -> String {
    to_pascal_case(input)
}

/// Whether `name` is one of the pass-through primitive type spellings.
pub fn is_primitive_type(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Normalize a type annotation: primitives pass through, model names become
/// class names, and a single `container[inner]` level keeps primitive
/// containers as-is.
pub fn to_type_annotation(input: &str) -> String {
    if is_primitive_type(input) {
        return input.to_string();
    }
    if let Some((container, rest)) = input.split_once('[')
        && rest.ends_with(']')
    {
        let inner = rest.strip_suffix(']').unwrap_or(rest);
        let container = if is_primitive_type(container) {
            container.to_string()
        } else {
            to_class_name(container)
        };
        return format!("{container}[{inner}]");
    }
    to_class_name(input)
}

/// Rewrite `{placeholder}` segments of a path into parameter-safe names.
///
/// `/users/{userId}/posts/{class}` → `/users/{user_id}/posts/{class_}`
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let inner = &rest[open + 1..open + close];
        if !inner.is_empty() {
            out.push('{');
            out.push_str(&to_param_name(inner));
            out.push('}');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Extract every `{placeholder}` name from a path, in order.
pub fn path_placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let inner = &rest[open + 1..open + close];
        if !inner.is_empty() {
            names.push(inner.to_string());
        }
        rest = &rest[open + close + 1..];
    }
    names
}

/// Derive an operation identifier from the HTTP method and path when the
/// document does not declare one.
///
/// Underscores inside a segment are doubled so they cannot be confused with
/// the single underscore that joins segments:
/// `GET /user_groups/{groupId}` → `get_user__groups_group__id`.
pub fn fallback_operation_id(method: &str, path: &str) -> String {
    let mut parts = vec![method.to_lowercase()];
    for segment in normalize_path(path).split('/').filter(|s| !s.is_empty()) {
        let cleaned: String = segment
            .chars()
            .filter(|c| !matches!(c, '{' | '}'))
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if !cleaned.is_empty() {
            parts.push(cleaned.replace('_', "__"));
        }
    }
    parts.join("_")
}

/// Turn a `$ref` pointer into the model name used by generated code.
///
/// `#/components/schemas/user_profile` → `UserProfile`
pub fn ref_to_model_name(ref_path: &str) -> String {
    let last = ref_path.rsplit('/').next().unwrap_or(ref_path);
    to_pascal_case(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_separators() {
        assert_eq!(to_snake_case("user_id"), "user_id");
        assert_eq!(to_snake_case("user-id"), "user_id");
        assert_eq!(to_snake_case("user id"), "user_id");
        assert_eq!(to_snake_case("User.ID"), "user_id");
        assert_eq!(to_snake_case("User/ID"), "user_id");
        assert_eq!(to_snake_case("{petId}"), "pet_id");
        assert_eq!(to_snake_case("/users/{id}/"), "users_id");
    }

    #[test]
    fn test_snake_case_boundaries() {
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("UserLoginByIDRequest"), "user_login_by_id_request");
        assert_eq!(to_snake_case("v2API"), "v2_api");
        assert_eq!(to_snake_case("API2"), "api2");
    }

    #[test]
    fn test_snake_case_leading_digit_abbreviation() {
        assert_eq!(to_snake_case("2FA"), "2fa");
        assert_eq!(
            to_snake_case("test_with_multiple_abbreviations_SMZ_API_2FA"),
            "test_with_multiple_abbreviations_smz_api_2fa"
        );
    }

    #[test]
    fn test_snake_case_ampersand() {
        assert_eq!(to_snake_case("Cats & Dogs"), "cats_and_dogs");
    }

    #[test]
    fn test_snake_case_idempotent() {
        for input in [
            "HTTPServer",
            "v1_resend_SMZ_status_check_response",
            "User.Profile",
            "__init__",
            "Cats & Dogs",
            "/pets/{petId}",
            "SMZv2",
            "",
        ] {
            let once = to_snake_case(input);
            assert_eq!(to_snake_case(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_pascal_case_words() {
        assert_eq!(to_pascal_case("user_id"), "UserId");
        assert_eq!(to_pascal_case("user-id"), "UserId");
        assert_eq!(to_pascal_case("userId"), "UserId");
        assert_eq!(to_pascal_case("user.id"), "UserId");
        assert_eq!(to_pascal_case("User.Profile"), "UserProfile");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_pascal_case_abbreviations() {
        assert_eq!(to_pascal_case("SMZ"), "SMZ");
        assert_eq!(to_pascal_case("UserID"), "UserID");
        assert_eq!(to_pascal_case("API2"), "API2");
        assert_eq!(to_pascal_case("2FA"), "2FA");
        assert_eq!(to_pascal_case("v2API"), "V2API");
        assert_eq!(to_pascal_case("SMZv2"), "SMZv2");
        assert_eq!(to_pascal_case("HTTPServer"), "HTTPServer");
        assert_eq!(to_pascal_case("UserLoginByIDRequest"), "UserLoginByIDRequest");
        assert_eq!(
            to_pascal_case("test_with_multiple_abbreviations_SMZ_API_2FA"),
            "TestWithMultipleAbbreviationsSMZAPI2FA"
        );
    }

    #[test]
    fn test_pascal_case_digit_letter_run() {
        assert_eq!(to_pascal_case("response_1p"), "Response1P");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("UserID"), "userID");
        assert_eq!(to_camel_case("user_id"), "userId");
        assert_eq!(to_camel_case("API"), "api");
        assert_eq!(to_camel_case("2FA"), "2fa");
        assert_eq!(to_camel_case("v2API"), "v2API");
        assert_eq!(
            to_camel_case("v1_resend_SMZ_status_check_response"),
            "v1ResendSMZStatusCheckResponse"
        );
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_param_name() {
        assert_eq!(to_param_name("class"), "class_");
        assert_eq!(to_param_name("type"), "type_");
        assert_eq!(to_param_name("id"), "id_");
        assert_eq!(to_param_name("filter"), "filter_");
        assert_eq!(to_param_name("user_id"), "user_id");
        assert_eq!(to_param_name("userId"), "user_id");
        assert_eq!(to_param_name("API"), "api");
    }

    #[test]
    fn test_type_annotation() {
        for primitive in PRIMITIVE_TYPES {
            assert_eq!(to_type_annotation(primitive), *primitive);
        }
        assert_eq!(to_type_annotation("user_profile"), "UserProfile");
        assert_eq!(to_type_annotation("list[user]"), "list[user]");
        assert_eq!(to_type_annotation("page[Item]"), "Page[Item]");
        assert_eq!(to_type_annotation("dict[str, Any]"), "dict[str, Any]");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/users/{userId}/posts/{class}"),
            "/users/{user_id}/posts/{class_}"
        );
        assert_eq!(normalize_path("/plain"), "/plain");
        assert_eq!(normalize_path("/empty/{}"), "/empty/");
        assert_eq!(normalize_path("/broken/{open"), "/broken/{open");
    }

    #[test]
    fn test_path_placeholders() {
        assert_eq!(
            path_placeholders("/users/{userId}/posts/{postId}"),
            vec!["userId".to_string(), "postId".to_string()]
        );
        assert!(path_placeholders("/users").is_empty());
    }

    #[test]
    fn test_fallback_operation_id() {
        assert_eq!(
            fallback_operation_id("GET", "/users/{userId}/posts"),
            "get_users_user__id_posts"
        );
        assert_eq!(fallback_operation_id("post", "/user_groups"), "post_user__groups");
        assert_eq!(fallback_operation_id("GET", "/"), "get");
    }

    #[test]
    fn test_ref_to_model_name() {
        assert_eq!(ref_to_model_name("#/components/schemas/user_profile"), "UserProfile");
        assert_eq!(ref_to_model_name("#/definitions/Pet"), "Pet");
    }

    #[test]
    fn test_normalize_name() {
        let n = normalize_name("getUserByID");
        assert_eq!(n.pascal_case, "GetUserByID");
        assert_eq!(n.camel_case, "getUserByID");
        assert_eq!(n.snake_case, "get_user_by_id");
        assert_eq!(n.param_name, "get_user_by_id");
    }
}
