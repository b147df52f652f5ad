use minijinja::{Environment, context};
use rcg_core::GeneratorError;
use rcg_core::ir::ServiceSpec;

use super::templates::{APIS_INIT, render};

/// Content of package markers that carry no code.
pub const PACKAGE_MARKER: &str = "# coding: utf-8\n";

/// Emit the service `__init__.py` re-exporting every generated API class.
pub fn emit_service_init(
    env: &Environment<'_>,
    service: &ServiceSpec,
    version: &str,
) -> Result<String, GeneratorError> {
    let api_names: Vec<String> = service.apis().into_iter().collect();
    render(
        env,
        APIS_INIT,
        context! {
            api_names => api_names,
            service_name => service.service_name.clone(),
            title => service.info.title.clone(),
            api_version => service.info.version.clone(),
            version => version,
        },
    )
}
