use std::borrow::Cow;
use std::fs;
use std::path::Path;

use minijinja::{Environment, Value};
use rcg_core::GeneratorError;
use rcg_core::transform::name_normalizer::{
    to_camel_case, to_class_name, to_param_name, to_pascal_case, to_snake_case,
    to_type_annotation,
};

pub const API_CLIENT: &str = "api_client.py.j2";
pub const APIS_INIT: &str = "apis_init.py.j2";

const EMBEDDED: [(&str, &str); 2] = [
    (API_CLIENT, include_str!("../../templates/api_client.py.j2")),
    (APIS_INIT, include_str!("../../templates/apis_init.py.j2")),
];

/// Escape triple-quote sequences that would prematurely close Python docstrings.
fn escape_docstring(value: String) -> String {
    value.replace("\"\"\"", "\\\"\\\"\\\"")
}

/// Template sources: the embedded set, with any file of the same name in a
/// custom templates directory taking its place.
pub struct TemplateSet {
    sources: Vec<(&'static str, Cow<'static, str>)>,
}

impl TemplateSet {
    pub fn embedded() -> Self {
        Self {
            sources: EMBEDDED
                .iter()
                .map(|(name, source)| (*name, Cow::Borrowed(*source)))
                .collect(),
        }
    }

    pub fn load(templates_dir: Option<&Path>) -> Result<Self, GeneratorError> {
        let mut set = Self::embedded();
        let Some(dir) = templates_dir else {
            return Ok(set);
        };
        if !dir.is_dir() {
            log::warn!(
                "templates directory {} does not exist; using the embedded templates",
                dir.display()
            );
            return Ok(set);
        }

        for (name, slot) in &mut set.sources {
            let path = dir.join(*name);
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|source| GeneratorError::TemplateIo {
                path: path.clone(),
                source,
            })?;
            log::info!("using custom template {}", path.display());
            *slot = Cow::Owned(content);
        }
        Ok(set)
    }

    /// Build an environment with every template registered and the naming
    /// helpers installed as filters.
    pub fn environment(&self) -> Result<Environment<'_>, GeneratorError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("to_snake_case", |value: String| to_snake_case(&value));
        env.add_filter("to_param_name", |value: String| to_param_name(&value));
        env.add_filter("to_class_name", |value: String| to_class_name(&value));
        env.add_filter("to_type_annotation", |value: String| {
            to_type_annotation(&value)
        });
        env.add_filter("to_pascal_case", |value: String| to_pascal_case(&value));
        env.add_filter("to_camel_case", |value: String| to_camel_case(&value));
        env.add_filter("escape_docstring", escape_docstring);

        for (name, source) in &self.sources {
            env.add_template(name, source.as_ref())
                .map_err(|err| template_error(name, &err))?;
        }
        Ok(env)
    }
}

/// Render a registered template.
pub fn render(env: &Environment<'_>, name: &str, ctx: Value) -> Result<String, GeneratorError> {
    env.get_template(name)
        .and_then(|tmpl| tmpl.render(ctx))
        .map_err(|err| template_error(name, &err))
}

fn template_error(name: &str, err: &minijinja::Error) -> GeneratorError {
    GeneratorError::Template {
        name: name.to_string(),
        message: err.to_string(),
    }
}
