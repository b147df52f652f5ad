pub mod grouping;
pub mod operations;
pub mod types;

pub use operations::*;
pub use types::{NormalizedName, ServiceInfo, ServiceSpec, TypeRef};
