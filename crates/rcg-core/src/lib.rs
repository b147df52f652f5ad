pub mod config;
pub mod error;
pub mod ir;
pub mod load;
pub mod parse;
pub mod transform;

pub use error::{GeneratorError, LoadError};
pub use ir::ServiceSpec;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a parsed service.
pub trait CodeGenerator {
    type Config;
    fn generate(
        &self,
        service: &ServiceSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
