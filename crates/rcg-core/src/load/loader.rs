use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{LoadError, SourceKind};
use crate::parse::{from_str_auto, from_yaml};
use crate::transform::name_normalizer::to_snake_case;
use crate::transform::normalizer::{NormalizedSpec, SpecNormalizer};

use super::fetcher::{SpecFetcher, is_url};

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecSource {
    Url,
    File,
    Cache,
}

#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub source: SpecSource,
    pub spec: NormalizedSpec,
}

/// Acquires a document from a URL, a local file or the service cache, in
/// that order, and normalizes it.
pub struct SpecLoader<F> {
    fetcher: F,
    cache_dir: PathBuf,
    normalizer: SpecNormalizer,
}

impl<F: SpecFetcher> SpecLoader<F> {
    pub fn new(fetcher: F, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            cache_dir: cache_dir.into(),
            normalizer: SpecNormalizer::new(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: SpecNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Cache file for a service: `<cache_dir>/<snake_case(service)>.json`.
    pub fn cache_path(&self, service_name: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.json", to_snake_case(service_name)))
    }

    pub fn load(&self, locator: &str, service_name: &str) -> Result<LoadedSpec, LoadError> {
        let cache_path = self.cache_path(service_name);
        let mut tried = Vec::new();

        let mut acquired = None;
        if is_url(locator) {
            tried.push(SourceKind::Url);
            match self.fetcher.fetch(locator) {
                Ok(document) => {
                    self.write_cache(&cache_path, &document);
                    acquired = Some((SpecSource::Url, document));
                }
                Err(err) => log::warn!("{err}; trying other sources"),
            }
        }

        if acquired.is_none() {
            tried.push(SourceKind::File);
            acquired = read_source(Path::new(locator)).map(|doc| (SpecSource::File, doc));
        }

        if acquired.is_none() {
            tried.push(SourceKind::Cache);
            if let Some(document) = read_source(&cache_path) {
                log::warn!(
                    "'{locator}' is unavailable; using the cached copy at {}",
                    cache_path.display()
                );
                acquired = Some((SpecSource::Cache, document));
            }
        }

        let Some((source, document)) = acquired else {
            return Err(LoadError::SpecUnavailable {
                locator: locator.to_string(),
                tried,
                cache_path,
            });
        };

        log::info!("loaded '{service_name}' from {source:?}");
        Ok(LoadedSpec {
            source,
            spec: self.normalizer.normalize(document),
        })
    }

    fn write_cache(&self, path: &Path, document: &Value) {
        let result = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| {
                let content = serde_json::to_string_pretty(document)
                    .map_err(std::io::Error::other)?;
                fs::write(path, content)
            });
        match result {
            Ok(()) => log::debug!("cached specification at {}", path.display()),
            Err(err) => log::warn!("failed to write cache {}: {err}", path.display()),
        }
    }
}

/// Read one candidate source. A missing path is expected and only traced; a
/// file that exists but cannot be read or decoded is worth a warning.
fn read_source(path: &Path) -> Option<Value> {
    match read_document(path) {
        Ok(document) => Some(document),
        Err(err) if path.exists() => {
            log::warn!("{err}; skipping this source");
            None
        }
        Err(err) => {
            log::debug!("{err}");
            None
        }
    }
}

/// Read a JSON or YAML document from disk.
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        from_yaml(&content)
    } else {
        from_str_auto(&content)
    };
    parsed.map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
