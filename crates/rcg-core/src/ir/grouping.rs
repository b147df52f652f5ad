use indexmap::IndexSet;

use super::operations::{Handler, HttpMethod};
use super::types::ServiceSpec;

impl ServiceSpec {
    /// Tags to generate: the selected tags that exist, or every tag when
    /// nothing was selected or none of the selection exists.
    pub fn apis(&self) -> IndexSet<String> {
        if self.selected_tags.is_empty() {
            return self.all_tags.clone();
        }

        let selected: IndexSet<String> = self
            .selected_tags
            .iter()
            .filter(|tag| self.all_tags.contains(*tag))
            .cloned()
            .collect();
        if selected.is_empty() {
            log::warn!(
                "none of the selected tags ({}) exist in '{}'; generating all tags",
                self.selected_tags
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                self.service_name
            );
            return self.all_tags.clone();
        }
        selected
    }

    pub fn tag_description(&self, tag: &str) -> Option<&str> {
        self.tag_descriptions.get(tag).map(String::as_str)
    }

    pub fn handlers_by_tag(&self, tag: &str) -> Vec<&Handler> {
        self.handlers.iter().filter(|h| h.has_tag(tag)).collect()
    }

    pub fn handlers_by_method(&self, method: HttpMethod) -> Vec<&Handler> {
        self.handlers.iter().filter(|h| h.method == method).collect()
    }

    /// Handlers bound to `path`, matched against either the raw or the
    /// normalized form.
    pub fn handler_by_path(&self, path: &str) -> Vec<&Handler> {
        self.handlers
            .iter()
            .filter(|h| h.path == path || h.raw_path == path)
            .collect()
    }

    /// Models a per-tag client must import: request models, response models
    /// and model-typed parameters of every handler carrying `tag`.
    pub fn models_by_tag(&self, tag: &str) -> IndexSet<String> {
        let mut models = IndexSet::new();
        for handler in self.handlers.iter().filter(|h| h.has_tag(tag)) {
            if let Some(model) = handler.request_model() {
                models.insert(model.to_string());
            }
            models.extend(handler.responses.values().cloned());
            for param in handler.parameters() {
                if let Some(model) = param.type_ref.model_name() {
                    models.insert(model.to_string());
                }
            }
            for field in &handler.form_parameters {
                if let Some(model) = field.type_ref.model_name() {
                    models.insert(model.to_string());
                }
            }
        }
        models
    }

    pub fn request_models(&self) -> IndexSet<String> {
        self.request_model_names.clone()
    }

    pub fn response_models(&self) -> IndexSet<String> {
        self.response_model_names.clone()
    }

    /// Request and response models together.
    pub fn all_models(&self) -> IndexSet<String> {
        self.request_model_names
            .iter()
            .chain(&self.response_model_names)
            .cloned()
            .collect()
    }
}
