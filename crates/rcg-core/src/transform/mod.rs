pub mod name_normalizer;
pub mod normalizer;
pub mod promote_inline;
pub mod spec_to_ir;
pub mod strip_dots;

pub use normalizer::{NormalizedSpec, SpecNormalizer, SpecTransform};
pub use promote_inline::InlineSchemaExtractor;
pub use spec_to_ir::{Parser, parse};
pub use strip_dots::DotRemover;
