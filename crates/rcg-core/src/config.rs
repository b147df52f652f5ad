use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.rcg.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RcgConfig {
    /// Root directory of generated clients.
    pub output_dir: PathBuf,
    /// Where fetched specifications are cached, one JSON file per service.
    pub cache_dir: PathBuf,
    pub fetch: FetchConfig,
    pub parser: ParserConfig,
    /// Directory whose templates override the embedded ones, file by file.
    pub templates_dir: Option<PathBuf>,
}

impl Default for RcgConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("clients/http"),
            cache_dir: PathBuf::from("clients/http/schemas"),
            fetch: FetchConfig::default(),
            parser: ParserConfig::default(),
            templates_dir: None,
        }
    }
}

/// Remote specification fetching.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub verify_ssl: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            verify_ssl: true,
        }
    }
}

/// Parser behavior.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Parameter names dropped from every operation, compared
    /// case-insensitively (infrastructure headers and the like).
    pub excluded_parameters: Vec<String>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".rcg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RcgConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Some(RcgConfig::default()));
    }
    let config: RcgConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# rcg configuration
output_dir: clients/http          # root of generated clients
cache_dir: clients/http/schemas   # fetched specifications are cached here

fetch:
  timeout_secs: 60
  verify_ssl: true

parser:
  excluded_parameters: []
    # - x-request-id
    # - x-b3-traceid

# templates_dir: templates        # override embedded templates file by file
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RcgConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("clients/http"));
        assert_eq!(config.cache_dir, PathBuf::from("clients/http/schemas"));
        assert_eq!(config.fetch.timeout_secs, 60);
        assert!(config.fetch.verify_ssl);
        assert!(config.parser.excluded_parameters.is_empty());
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_default_content_parses_to_default() {
        let config: RcgConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config, RcgConfig::default());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
output_dir: out
cache_dir: out/cache
fetch:
  timeout_secs: 5
  verify_ssl: false
parser:
  excluded_parameters: [x-request-id]
templates_dir: my-templates
"#;
        let config: RcgConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.cache_dir, PathBuf::from("out/cache"));
        assert_eq!(config.fetch.timeout_secs, 5);
        assert!(!config.fetch.verify_ssl);
        assert_eq!(config.parser.excluded_parameters, vec!["x-request-id"]);
        assert_eq!(config.templates_dir, Some(PathBuf::from("my-templates")));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: RcgConfig = serde_yaml_ng::from_str("output_dir: gen\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("gen"));
        // Defaults applied
        assert_eq!(config.fetch.timeout_secs, 60);
        assert_eq!(config.cache_dir, PathBuf::from("clients/http/schemas"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(load_config(&path).unwrap().is_none());

        fs::write(&path, "fetch:\n  timeout_secs: 10\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.fetch.timeout_secs, 10);

        fs::write(&path, "fetch: [").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
