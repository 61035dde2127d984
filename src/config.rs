use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SERVICE_URL: &str = "https://kmenas-backend.onrender.com";
pub const DEFAULT_OUT_DIR: &str = "kmeans-output";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Service URL must start with http:// or https://: {0}")]
    InvalidServiceUrl(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    #[error("Output directory must not be empty")]
    EmptyOutDir,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub service_url: String,
    /// No timeout when `None`
    pub timeout: Option<Duration>,
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: None,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl Config {
    /// Start from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout = secs.map(Duration::from_secs);
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Check the settings and normalize the service URL
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let url = self.service_url.trim().trim_end_matches('/');
        let host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        if matches!(host, None | Some("")) {
            return Err(ConfigError::InvalidServiceUrl(self.service_url));
        }
        self.service_url = url.to_string();

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutDir);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new().validated().unwrap();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.timeout, None);
        assert_eq!(config.out_dir, PathBuf::from("kmeans-output"));
    }

    #[test]
    fn test_url_is_normalized() {
        let config = Config::new()
            .service_url("  http://localhost:8000/ ")
            .validated()
            .unwrap();
        assert_eq!(config.service_url, "http://localhost:8000");
    }

    #[test]
    fn test_rejects_bad_urls() {
        for url in ["localhost:8000", "ftp://host", "http://", ""] {
            let err = Config::new().service_url(url).validated().unwrap_err();
            assert_eq!(err, ConfigError::InvalidServiceUrl(url.to_string()));
        }
    }

    #[test]
    fn test_timeout() {
        let config = Config::new().timeout_secs(Some(30)).validated().unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));

        let err = Config::new().timeout_secs(Some(0)).validated().unwrap_err();
        assert_eq!(err, ConfigError::ZeroTimeout);
    }

    #[test]
    fn test_rejects_empty_out_dir() {
        let err = Config::new().out_dir("").validated().unwrap_err();
        assert_eq!(err, ConfigError::EmptyOutDir);
    }
}
