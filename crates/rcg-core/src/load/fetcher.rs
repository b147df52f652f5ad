use std::time::Duration;

use serde_json::Value;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::parse::from_str_auto;

/// Retrieves a document from a URL.
pub trait SpecFetcher {
    fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(concat!("rcg/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl SpecFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        log::debug!("fetching {url}");
        let response = self.client.get(url).send().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        from_str_auto(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Whether `locator` is an absolute URL with a scheme and a host.
pub fn is_url(locator: &str) -> bool {
    url::Url::parse(locator).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://petstore.swagger.io/v2/swagger.json"));
        assert!(is_url("http://localhost:8080/openapi.json"));
        assert!(!is_url("specs/petstore.json"));
        assert!(!is_url("/tmp/openapi.yaml"));
        assert!(!is_url("file:///tmp/openapi.yaml"));
        assert!(!is_url("C:\\specs\\openapi.json"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_http_fetcher_builds() {
        let fetcher = HttpFetcher::new(&FetchConfig {
            timeout_secs: 1,
            verify_ssl: false,
        });
        assert!(fetcher.is_ok());
    }
}
