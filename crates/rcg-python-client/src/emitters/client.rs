use minijinja::{Environment, context};
use rcg_core::GeneratorError;
use rcg_core::ir::{FormParameter, Handler, Parameter, ServiceSpec, TypeRef};
use serde_json::Value;

use super::templates::{API_CLIENT, render};
use crate::type_mapper::{python_argument, python_literal};

/// Options shared by every rendered client file.
pub struct ClientOptions<'a> {
    pub async_mode: bool,
    pub version: &'a str,
}

/// Emit `<tag>_api.py`: one client class with a method per handler.
pub fn emit_api_client(
    env: &Environment<'_>,
    service: &ServiceSpec,
    tag: &str,
    options: &ClientOptions<'_>,
) -> Result<String, GeneratorError> {
    let handlers: Vec<minijinja::Value> = service
        .handlers_by_tag(tag)
        .into_iter()
        .map(handler_context)
        .collect();
    let models: Vec<String> = service.models_by_tag(tag).into_iter().collect();

    render(
        env,
        API_CLIENT,
        context! {
            api_name => tag,
            api_description => service.tag_description(tag),
            service_name => service.service_name.clone(),
            version => options.version,
            async_mode => options.async_mode,
            models => models,
            handlers => handlers,
        },
    )
}

/// A rendered function argument.
struct Argument {
    /// Python string literal of the wire name.
    key: String,
    param_name: String,
    annotation: String,
    required: bool,
}

impl Argument {
    fn from_parameter(param: &Parameter) -> Self {
        Self {
            key: python_literal(&Value::String(param.name.clone())),
            param_name: param.param_name.clone(),
            annotation: python_argument(&param.type_ref, param.required, param.default.as_ref()),
            required: param.required,
        }
    }

    fn from_form_field(field: &FormParameter) -> Self {
        Self {
            key: python_literal(&Value::String(field.name.clone())),
            param_name: field.param_name.clone(),
            annotation: python_argument(&field.type_ref, field.required, None),
            required: field.required,
        }
    }

    fn body(model: Option<&str>) -> Self {
        let annotation = match model {
            Some(model) => python_argument(&TypeRef::Model(model.to_string()), true, None),
            None => python_argument(&TypeRef::Any, false, None),
        };
        Self {
            key: python_literal(&Value::String("body".to_string())),
            param_name: "body".to_string(),
            annotation,
            required: model.is_some(),
        }
    }

    fn context(&self) -> minijinja::Value {
        context! {
            key => self.key.clone(),
            param_name => self.param_name.clone(),
            annotation => self.annotation.clone(),
            required => self.required,
        }
    }
}

fn contexts(args: &[Argument]) -> Vec<minijinja::Value> {
    args.iter().map(Argument::context).collect()
}

fn handler_context(handler: &Handler) -> minijinja::Value {
    let positional: Vec<Argument> = handler
        .path_parameters
        .iter()
        .map(Argument::from_parameter)
        .collect();
    let query: Vec<Argument> = handler
        .query_parameters
        .iter()
        .map(Argument::from_parameter)
        .collect();
    let headers: Vec<Argument> = handler.headers.iter().map(Argument::from_parameter).collect();
    let form_fields: Vec<Argument> = handler
        .form_parameters
        .iter()
        .map(Argument::from_form_field)
        .collect();

    let body_model = handler.request_model();
    let raw_body = !handler.is_form() && handler.request_body.is_some() && body_model.is_none();
    let body = (body_model.is_some() || raw_body).then(|| Argument::body(body_model));

    // Keyword-only arguments: required before optional, source order otherwise.
    let mut keyword: Vec<&Argument> = query
        .iter()
        .chain(&headers)
        .chain(body.as_ref())
        .chain(&form_fields)
        .collect();
    keyword.sort_by_key(|arg| !arg.required);
    let keyword: Vec<minijinja::Value> = keyword.into_iter().map(Argument::context).collect();

    let multipart = handler
        .request_body
        .as_ref()
        .is_some_and(|b| b.content_type.starts_with("multipart/"));

    context! {
        operation_id => handler.operation_id.clone(),
        method => handler.method.as_str(),
        path => handler.path.clone(),
        raw_path => handler.raw_path.clone(),
        summary => handler.summary.clone().or_else(|| handler.description.clone()),
        deprecated => handler.deprecated,
        positional => contexts(&positional),
        keyword => keyword,
        query => contexts(&query),
        headers => contexts(&headers),
        form_fields => contexts(&form_fields),
        multipart => multipart,
        body_model => body_model,
        raw_body => raw_body,
        return_model => handler.success_response().map(|(_, model)| model),
    }
}
