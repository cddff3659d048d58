use crate::application::submitter::DEFAULT_TIMEOUT;
use crate::error::{LoanError, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

pub const BASE_URL_VAR: &str = "LOAN_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "LOAN_API_TIMEOUT_MS";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the loan server lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Builds a config from explicit values, typically CLI arguments.
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads config from env vars:
    /// - `LOAN_API_BASE_URL` (default: `http://127.0.0.1:8000`)
    /// - `LOAN_API_TIMEOUT_MS` (default: `8000`)
    ///
    /// Unusable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let base_url = match env::var(BASE_URL_VAR) {
            Ok(raw) => parse_base_url(&raw).unwrap_or_else(|e| {
                warn!("Invalid {BASE_URL_VAR} value: {e}, using default: {DEFAULT_BASE_URL}");
                default_base_url()
            }),
            Err(_) => {
                info!("{BASE_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
                default_base_url()
            }
        };

        let timeout = env::var(TIMEOUT_VAR)
            .ok()
            .and_then(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| warn!("Invalid {TIMEOUT_VAR} value: {e}, using default"))
                    .ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self { base_url, timeout }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| LoanError::Config(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LoanError::Config(format!(
            "unsupported scheme '{other}' in {raw}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.timeout, Duration::from_millis(8000));
    }

    #[test]
    fn test_explicit_values() {
        let config = ClientConfig::new("https://loans.example.com", 250).unwrap();
        assert_eq!(config.base_url.host_str(), Some("loans.example.com"));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .with_base_url("http://10.0.0.2:9000")
            .unwrap()
            .with_timeout(Duration::from_secs(1));
        assert_eq!(config.base_url.as_str(), "http://10.0.0.2:9000/");
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert!(ClientConfig::default().with_base_url("").is_err());
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::new("not a url", 10),
            Err(LoanError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com", 10),
            Err(LoanError::Config(_))
        ));
    }
}
