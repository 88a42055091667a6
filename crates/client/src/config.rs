//! Client configuration.
//!
//! Read from the environment by the binary; built directly by embedders and
//! tests.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Backend base path used when `FUNDPORTAL_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("invalid timeout '{0}': expected whole seconds")]
    InvalidTimeout(String),

    #[error("could not resolve an application data directory for the session file")]
    NoDataDir,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: Url,
    timeout: Duration,
    session_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(api_url).map_err(|source| ConfigError::InvalidUrl {
            value: api_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_url.to_string()));
        }

        Ok(Self {
            api_url: parsed,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
        })
    }

    /// Build from `FUNDPORTAL_API_URL`, `FUNDPORTAL_TIMEOUT_SECS` and
    /// `FUNDPORTAL_SESSION_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url =
            std::env::var("FUNDPORTAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&api_url)?;

        if let Ok(raw) = std::env::var("FUNDPORTAL_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Ok(path) = std::env::var("FUNDPORTAL_SESSION_FILE") {
            config = config.with_session_file(path);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Base URL without a trailing slash; endpoint paths are appended to it.
    pub fn base_url(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Where persisted tokens live: the configured file, or
    /// `{data_dir}/fundportal/session.json`.
    pub fn session_file_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }

        let mut dir = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or(ConfigError::NoDataDir)?;
        dir.push("fundportal");
        dir.push("session.json");
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_has_no_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/api/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn rejects_malformed_and_non_http_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com/api"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn explicit_session_file_wins() {
        let config = ClientConfig::new(DEFAULT_API_URL)
            .unwrap()
            .with_session_file("/tmp/fp-session.json")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(
            config.session_file_path().unwrap(),
            PathBuf::from("/tmp/fp-session.json")
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
