use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url {0:?} cannot carry path segments")]
    NotABase(String),
}

/// Where the dashboard service lives and how long a single request may take.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads `DASHBOARD_API_URL` and `DASHBOARD_HTTP_TIMEOUT_MS`, falling back to
    /// the local service on port 3001 with a 5s bound.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var("DASHBOARD_API_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(&base)?;
        if let Ok(raw) = std::env::var("DASHBOARD_HTTP_TIMEOUT_MS") {
            match parse_timeout_ms(&raw) {
                Some(timeout) => config.timeout = timeout,
                None => tracing::warn!(
                    value = %raw,
                    "ignoring unparsable DASHBOARD_HTTP_TIMEOUT_MS, keeping {}ms",
                    DEFAULT_TIMEOUT.as_millis()
                ),
            }
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase(raw.to_string()));
    }
    Ok(url)
}

pub fn parse_timeout_ms(raw: &str) -> Option<Duration> {
    let ms = raw.trim().parse::<u64>().ok()?;
    Some(Duration::from_millis(ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_five_second_bound() {
        let config = ClientConfig::new("http://127.0.0.1:3001").unwrap();
        assert_eq!(config.timeout, Duration::from_millis(5000));
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:3001/");
    }

    #[test]
    fn rejects_garbage_and_non_base_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("mailto:me@example.com"),
            Err(ConfigError::NotABase(_))
        ));
    }

    /// Sets env vars for one test and restores the previous values on drop.
    struct EnvGuard(Vec<(&'static str, Option<String>)>);

    impl EnvGuard {
        fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
            let saved = vars.iter().map(|(k, _)| (*k, std::env::var(k).ok())).collect();
            for (key, value) in vars {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
            Self(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.0 {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    // Only test in the crate that touches these variables.
    #[test]
    fn from_env_defaults_overrides_and_ignores_garbage() {
        let _guard = EnvGuard::set(&[
            ("DASHBOARD_API_URL", None),
            ("DASHBOARD_HTTP_TIMEOUT_MS", None),
        ]);
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        std::env::set_var("DASHBOARD_API_URL", "   ");
        std::env::set_var("DASHBOARD_HTTP_TIMEOUT_MS", "soon");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.timeout, Duration::from_millis(5000));

        std::env::set_var("DASHBOARD_API_URL", "http://dash.test:8080/api/");
        std::env::set_var("DASHBOARD_HTTP_TIMEOUT_MS", "10");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), "http://dash.test:8080/api/");
        assert_eq!(config.timeout, Duration::from_millis(100));

        std::env::set_var("DASHBOARD_API_URL", "not a url");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn timeout_is_clamped() {
        assert_eq!(parse_timeout_ms("5"), Some(Duration::from_millis(100)));
        assert_eq!(parse_timeout_ms(" 2500 "), Some(Duration::from_millis(2500)));
        assert_eq!(parse_timeout_ms("999999"), Some(Duration::from_millis(60_000)));
        assert_eq!(parse_timeout_ms("soon"), None);
    }
}
