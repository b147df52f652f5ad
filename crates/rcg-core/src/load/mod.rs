mod fetcher;
mod loader;

pub use fetcher::{HttpFetcher, SpecFetcher, is_url};
pub use loader::{LoadedSpec, SpecLoader, SpecSource, read_document};
