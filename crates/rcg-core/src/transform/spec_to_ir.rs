use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;

use crate::config::ParserConfig;
use crate::ir::*;
use crate::parse::media_type::{APPLICATION_JSON, FORM_URLENCODED, is_form_content_type};
use crate::parse::operation::{HTTP_METHODS, Operation};
use crate::parse::parameter::{Parameter as RawParameter, ParameterLocation};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::request_body::RequestBody;
use crate::parse::schema::{Schema, SchemaOrRef, TypeSet};
use crate::parse::spec::{DocumentHeader, SpecVersion};

use super::name_normalizer::{
    fallback_operation_id, normalize_name, normalize_path, path_placeholders, ref_to_model_name,
    to_param_name,
};
use super::normalizer::NormalizedSpec;
use super::promote_inline::{operation_base_name, status_name};

/// Tag given to operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// Turns a normalized document into a `ServiceSpec`.
///
/// The parser only reads the document. Anything it cannot make sense of
/// (dangling references, cookie parameters, malformed operations) is logged
/// and skipped or replaced by a placeholder.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    excluded_parameters: Vec<String>,
}

impl Parser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            excluded_parameters: config.excluded_parameters.clone(),
        }
    }

    pub fn parse(
        &self,
        spec: &NormalizedSpec,
        service_name: &str,
        selected_tags: &[String],
    ) -> ServiceSpec {
        let document = spec.as_value();
        let spec_version = SpecVersion::detect(document);
        match &spec_version {
            SpecVersion::Swagger2(v) => log::warn!(
                "'{service_name}' is a Swagger {v} document; support is partial, consider converting it to OpenAPI 3"
            ),
            SpecVersion::Unknown => {
                log::warn!("'{service_name}' declares neither an `openapi` nor a `swagger` version")
            }
            SpecVersion::OpenApi3(_) => {}
        }

        let header = DocumentHeader::from_document(document);
        let context = ParseContext {
            resolver: RefResolver::new(document),
            consumes: &header.consumes,
        };

        let handlers = match document.get("paths").and_then(Value::as_object) {
            Some(paths) => self.collect_handlers(&context, paths),
            None => {
                log::warn!("'{service_name}' has no `paths`; no operations will be generated");
                Vec::new()
            }
        };

        let mut all_tags = IndexSet::new();
        let mut request_model_names = IndexSet::new();
        let mut response_model_names = IndexSet::new();
        for handler in &handlers {
            all_tags.extend(handler.tags.iter().cloned());
            if let Some(model) = handler.request_model() {
                request_model_names.insert(model.to_string());
            }
            response_model_names.extend(handler.responses.values().cloned());
        }

        let tag_descriptions: IndexMap<String, String> = header
            .tags
            .iter()
            .filter_map(|tag| {
                let description = tag.description.as_deref()?.trim();
                (!description.is_empty()).then(|| (tag.name.clone(), description.to_string()))
            })
            .collect();

        log::debug!(
            "parsed '{service_name}': {} handlers, {} tags",
            handlers.len(),
            all_tags.len()
        );

        ServiceSpec {
            service_name: service_name.to_string(),
            info: ServiceInfo {
                title: header.info.title.clone(),
                version: header
                    .info
                    .version
                    .clone()
                    .unwrap_or_else(|| "1.0.0".to_string()),
                description: header.info.description.clone().unwrap_or_default(),
                spec_version,
            },
            handlers,
            all_tags,
            tag_descriptions,
            request_model_names,
            response_model_names,
            selected_tags: selected_tags.iter().cloned().collect(),
        }
    }

    fn collect_handlers(
        &self,
        context: &ParseContext<'_>,
        paths: &serde_json::Map<String, Value>,
    ) -> Vec<Handler> {
        let mut handlers = Vec::new();
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                log::warn!("path '{path}' is not a mapping; skipping");
                continue;
            };
            for key in HTTP_METHODS {
                let Some(raw) = item.get(key) else {
                    continue;
                };
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };
                match Operation::deserialize(raw) {
                    Ok(operation) => {
                        handlers.push(self.build_handler(context, method, path, &operation))
                    }
                    Err(err) => log::warn!("skipping {method} {path}: {err}"),
                }
            }
        }
        handlers
    }

    fn build_handler(
        &self,
        context: &ParseContext<'_>,
        method: HttpMethod,
        path: &str,
        op: &Operation,
    ) -> Handler {
        let operation_id = match op.operation_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => fallback_operation_id(method.as_lower(), path),
        };
        let base_name = operation_base_name(method.as_lower(), path, Some(&operation_id));

        let mut path_parameters = Vec::new();
        let mut query_parameters = Vec::new();
        let mut headers = Vec::new();
        let mut form_parameters = Vec::new();
        let mut body_parameter = None;

        for param_or_ref in &op.parameters {
            let Some(param) = context.resolver.resolve_parameter(param_or_ref) else {
                log::warn!("{operation_id}: skipping a parameter that could not be resolved");
                continue;
            };
            if self.is_excluded(&param.name) {
                log::debug!("{operation_id}: dropping excluded parameter '{}'", param.name);
                continue;
            }
            match param.location {
                ParameterLocation::Path => {
                    path_parameters.push(context.build_parameter(&param, ParamLocation::Path))
                }
                ParameterLocation::Query => {
                    query_parameters.push(context.build_parameter(&param, ParamLocation::Query))
                }
                ParameterLocation::Header => {
                    headers.push(context.build_parameter(&param, ParamLocation::Header))
                }
                ParameterLocation::Body => body_parameter = Some(param),
                ParameterLocation::FormData => {
                    form_parameters.push(context.build_swagger_form_parameter(&param))
                }
                ParameterLocation::Cookie => log::warn!(
                    "{operation_id}: cookie parameter '{}' is not supported; skipping",
                    param.name
                ),
                ParameterLocation::Unknown => log::warn!(
                    "{operation_id}: parameter '{}' has an unknown location; skipping",
                    param.name
                ),
            }
        }

        if path_parameters.is_empty() {
            path_parameters = synthesize_path_parameters(path);
        }
        sort_required_first(&mut path_parameters);
        sort_required_first(&mut query_parameters);
        sort_required_first(&mut headers);

        let request_body = if let Some(body) = op
            .request_body
            .as_ref()
            .and_then(|b| context.resolver.resolve_request_body(b))
        {
            context.request_body_binding(&body, &base_name, &operation_id, &mut form_parameters)
        } else if let Some(param) = &body_parameter {
            let fallback = format!("{base_name}Request");
            let model = param
                .schema
                .as_ref()
                .and_then(|s| context.model_for_schema(s, &fallback, &operation_id));
            Some(RequestBodyBinding {
                model,
                content_type: context.swagger_content_type(&op.consumes, APPLICATION_JSON, false),
            })
        } else if !form_parameters.is_empty() {
            Some(RequestBodyBinding {
                model: None,
                content_type: context.swagger_content_type(&op.consumes, FORM_URLENCODED, true),
            })
        } else {
            None
        };

        let mut responses = IndexMap::new();
        for (code, response_or_ref) in &op.responses {
            let Some(response) = context.resolver.resolve_response(response_or_ref) else {
                continue;
            };
            let fallback = format!("{base_name}{}Response", status_name(code));
            if let Some(model) = response
                .schemas()
                .find_map(|schema| context.model_for_schema(schema, &fallback, &operation_id))
            {
                responses.insert(code.clone(), model);
            }
        }

        let tags = if op.tags.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            op.tags.clone()
        };

        Handler {
            path: normalize_path(path),
            raw_path: path.to_string(),
            method,
            tags,
            summary: op.summary.clone(),
            description: op.description.clone(),
            name: normalize_name(&operation_id),
            operation_id,
            path_parameters,
            query_parameters,
            headers,
            request_body,
            form_parameters,
            responses,
            deprecated: op.deprecated,
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_parameters
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(name))
    }
}

/// Parse with default settings.
pub fn parse(spec: &NormalizedSpec, service_name: &str, selected_tags: &[String]) -> ServiceSpec {
    Parser::default().parse(spec, service_name, selected_tags)
}

struct ParseContext<'a> {
    resolver: RefResolver<'a>,
    consumes: &'a [String],
}

impl ParseContext<'_> {
    fn build_parameter(&self, param: &RawParameter, location: ParamLocation) -> Parameter {
        let resolved_schema = param
            .schema
            .as_ref()
            .and_then(|s| self.resolver.resolve_schema(s));
        let type_ref = match &param.schema {
            Some(schema) => self.type_of(schema),
            None => self.type_of_inline(
                param.param_type.as_ref(),
                param.format.as_deref(),
                param.items.as_deref(),
            ),
        };

        let explicit_default = resolved_schema
            .and_then(|s| s.default_value)
            .or_else(|| param.default_value.clone());
        let default = match location {
            ParamLocation::Header => explicit_default.or_else(|| header_default(&type_ref)),
            _ => explicit_default,
        };

        Parameter {
            name: param.name.clone(),
            param_name: to_param_name(&param.name),
            location,
            type_ref,
            // Path parameters are always required.
            required: location == ParamLocation::Path || param.required,
            default,
            description: param.description.clone().filter(|d| !d.is_empty()),
        }
    }

    fn build_swagger_form_parameter(&self, param: &RawParameter) -> FormParameter {
        FormParameter {
            name: param.name.clone(),
            param_name: to_param_name(&param.name),
            type_ref: self.type_of_inline(
                param.param_type.as_ref(),
                param.format.as_deref(),
                param.items.as_deref(),
            ),
            required: param.required,
            description: param.description.clone(),
            format: param.format.clone(),
        }
    }

    /// Pick the request body binding. The first content entry with a schema
    /// wins; form encodings are flattened into `form_parameters`.
    fn request_body_binding(
        &self,
        body: &RequestBody,
        base_name: &str,
        operation_id: &str,
        form_parameters: &mut Vec<FormParameter>,
    ) -> Option<RequestBodyBinding> {
        let (content_type, schema) = body
            .content
            .iter()
            .find_map(|(ct, media)| media.schema.as_ref().map(|s| (ct, s)))?;

        if is_form_content_type(content_type) {
            let model = schema.ref_path().and_then(|r| self.model_for_ref(r));
            match self.resolver.resolve_schema(schema) {
                Some(resolved) => form_parameters.extend(self.form_fields(&resolved)),
                None => log::warn!("{operation_id}: form body schema could not be resolved"),
            }
            return Some(RequestBodyBinding {
                model,
                content_type: content_type.clone(),
            });
        }

        let model = self.model_for_schema(schema, &format!("{base_name}Request"), operation_id);
        Some(RequestBodyBinding {
            model,
            content_type: content_type.clone(),
        })
    }

    fn form_fields(&self, schema: &Schema) -> Vec<FormParameter> {
        schema
            .properties
            .iter()
            .map(|(name, property)| {
                let resolved = self.resolver.resolve_schema(property);
                FormParameter {
                    name: name.clone(),
                    param_name: to_param_name(name),
                    type_ref: self.type_of(property),
                    required: schema.is_required(name),
                    description: resolved.as_ref().and_then(|s| s.description.clone()),
                    format: resolved.and_then(|s| s.format),
                }
            })
            .collect()
    }

    /// Model name for a body or response schema: the referenced model, or a
    /// name derived from the operation for an inline object that was not
    /// hoisted.
    fn model_for_schema(
        &self,
        schema: &SchemaOrRef,
        fallback: &str,
        operation_id: &str,
    ) -> Option<String> {
        match schema {
            SchemaOrRef::Ref { ref_path } => self.model_for_ref(ref_path),
            SchemaOrRef::Schema(inline) => {
                if let Some(ref_path) = inline.single_all_of_ref() {
                    return self.model_for_ref(ref_path);
                }
                if is_inline_model(inline) {
                    log::warn!(
                        "{operation_id}: inline schema was not extracted; naming it {fallback}"
                    );
                    return Some(ref_to_model_name(fallback));
                }
                None
            }
        }
    }

    fn model_for_ref(&self, ref_path: &str) -> Option<String> {
        if self.resolver.exists(ref_path) {
            Some(ref_to_model_name(ref_path))
        } else {
            log::warn!("dangling reference {ref_path}; leaving the model untyped");
            None
        }
    }

    fn type_of(&self, schema: &SchemaOrRef) -> TypeRef {
        match schema {
            SchemaOrRef::Ref { ref_path } => self
                .model_for_ref(ref_path)
                .map_or(TypeRef::Any, TypeRef::Model),
            SchemaOrRef::Schema(inline) => {
                if let Some(ref_path) = inline.single_all_of_ref() {
                    return self
                        .model_for_ref(ref_path)
                        .map_or(TypeRef::Any, TypeRef::Model);
                }
                self.type_of_inline(
                    inline.schema_type.as_ref(),
                    inline.format.as_deref(),
                    inline.items.as_deref(),
                )
            }
        }
    }

    fn type_of_inline(
        &self,
        schema_type: Option<&TypeSet>,
        format: Option<&str>,
        items: Option<&SchemaOrRef>,
    ) -> TypeRef {
        match schema_type.and_then(TypeSet::primary) {
            Some("integer") => TypeRef::Int,
            Some("number") => TypeRef::Float,
            Some("string") if format == Some("binary") => TypeRef::Bytes,
            Some("string") => TypeRef::Str,
            Some("boolean") => TypeRef::Bool,
            Some("file") => TypeRef::Bytes,
            Some("array") => TypeRef::List(Box::new(
                items.map_or(TypeRef::Any, |item| self.type_of(item)),
            )),
            _ => TypeRef::Any,
        }
    }

    /// Swagger 2.0 request content type: operation `consumes`, then the
    /// document's, then `fallback`. Form bodies only accept form encodings.
    fn swagger_content_type(&self, consumes: &[String], fallback: &str, form: bool) -> String {
        consumes
            .iter()
            .chain(self.consumes)
            .find(|ct| !form || is_form_content_type(ct))
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// The same test the inline extractor uses to decide what to hoist.
fn is_inline_model(schema: &Schema) -> bool {
    schema.is_inline_object() || schema.has_inline_branch()
}

fn header_default(type_ref: &TypeRef) -> Option<Value> {
    match type_ref {
        TypeRef::Int => Some(Value::from(0)),
        TypeRef::Float => Some(Value::from(0.0)),
        TypeRef::Str => Some(Value::from("")),
        TypeRef::Bool => Some(Value::from(true)),
        _ => None,
    }
}

fn synthesize_path_parameters(path: &str) -> Vec<Parameter> {
    path_placeholders(path)
        .iter()
        .map(|placeholder| {
            let name = to_param_name(placeholder);
            Parameter {
                description: Some(format!("Path parameter: {name}")),
                param_name: name.clone(),
                name,
                location: ParamLocation::Path,
                type_ref: TypeRef::Str,
                required: true,
                default: None,
            }
        })
        .collect()
}

/// Required parameters first; a stable sort keeps source order otherwise.
fn sort_required_first(params: &mut [Parameter]) {
    params.sort_by_key(|p| !p.required);
}
