use std::path::PathBuf;

use rcg_core::ir::ServiceSpec;
use rcg_core::transform::name_normalizer::to_snake_case;
use rcg_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters::client::{ClientOptions, emit_api_client};
use crate::emitters::package::{PACKAGE_MARKER, emit_service_init};
use crate::emitters::templates::TemplateSet;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct PythonClientConfig {
    /// Emit `async def` methods over `httpx.AsyncClient`.
    pub async_mode: bool,
    /// Directory whose templates replace the embedded ones by file name.
    pub templates_dir: Option<PathBuf>,
    /// Generator version stamped into file headers.
    pub version: String,
}

impl Default for PythonClientConfig {
    fn default() -> Self {
        Self {
            async_mode: false,
            templates_dir: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Python REST client generator built on `httpx`.
pub struct PythonClientGenerator;

impl CodeGenerator for PythonClientGenerator {
    type Config = PythonClientConfig;

    fn generate(
        &self,
        service: &ServiceSpec,
        config: &PythonClientConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let templates = TemplateSet::load(config.templates_dir.as_deref())?;
        let env = templates.environment()?;
        let package = to_snake_case(&service.service_name);
        let options = ClientOptions {
            async_mode: config.async_mode,
            version: &config.version,
        };

        let mut files = Vec::new();
        for tag in service.apis() {
            let content = emit_api_client(&env, service, &tag, &options)?;
            files.push(GeneratedFile {
                path: format!("{package}/apis/{}_api.py", to_snake_case(&tag)),
                content,
            });
        }
        files.push(GeneratedFile {
            path: format!("{package}/apis/__init__.py"),
            content: PACKAGE_MARKER.to_string(),
        });
        files.push(GeneratedFile {
            path: format!("{package}/__init__.py"),
            content: emit_service_init(&env, service, &config.version)?,
        });
        files.push(GeneratedFile {
            path: format!("{package}/models/__init__.py"),
            content: PACKAGE_MARKER.to_string(),
        });

        log::debug!(
            "rendered {} files for service '{}'",
            files.len(),
            service.service_name
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcg_core::transform::{SpecNormalizer, parse};
    use serde_json::json;

    fn service(selected: &[String]) -> ServiceSpec {
        let spec = SpecNormalizer::new().normalize(json!({
            "openapi": "3.0.0",
            "info": {"title": "Shop", "version": "2.0.0"},
            "paths": {
                "/orders": {"get": {"tags": ["orders"], "operationId": "listOrders"}},
                "/carts": {"get": {"tags": ["cart-items"], "operationId": "listCarts"}}
            }
        }));
        parse(&spec, "ShopService", selected)
    }

    #[test]
    fn test_file_layout() {
        let files = PythonClientGenerator
            .generate(&service(&[]), &PythonClientConfig::default())
            .unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "shop_service/apis/orders_api.py",
                "shop_service/apis/cart_items_api.py",
                "shop_service/apis/__init__.py",
                "shop_service/__init__.py",
                "shop_service/models/__init__.py",
            ]
        );
    }

    #[test]
    fn test_selected_tags_limit_apis() {
        let files = PythonClientGenerator
            .generate(&service(&["orders".to_string()]), &PythonClientConfig::default())
            .unwrap();
        assert!(files.iter().any(|f| f.path == "shop_service/apis/orders_api.py"));
        assert!(!files.iter().any(|f| f.path.contains("cart_items")));
    }

    #[test]
    fn test_version_in_headers() {
        let config = PythonClientConfig {
            version: "9.9.9".to_string(),
            ..PythonClientConfig::default()
        };
        let files = PythonClientGenerator.generate(&service(&[]), &config).unwrap();
        assert!(files[0].content.contains("rcg 9.9.9"));
    }
}
