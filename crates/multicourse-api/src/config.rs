//! Client settings.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Production backend.
pub const DEFAULT_BASE_URL: &str = "https://pizza32cm.com.ua";

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    /// Sent as `X-Api-Key` when present.
    pub api_key: Option<SecretString>,
}

impl ApiConfig {
    /// ## Errors
    /// `ApiError::InvalidUrl` for unparsable or non-http(s) URLs.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "base URL must be http or https, got: {}",
                base_url
            )));
        }
        Ok(ApiConfig {
            base_url,
            timeout: Duration::from_secs(15),
            api_key: None,
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(mut self, key: Option<SecretString>) -> Self {
        self.api_key = key;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(ApiConfig::new(DEFAULT_BASE_URL).is_ok());
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(ApiConfig::new("not a url").is_err());
    }
}
