//! Client configuration.

use std::time::Duration;

/// Public RxNav REST base.
pub const DEFAULT_RXNAV_URL: &str = "https://rxnav.nlm.nih.gov/REST";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

pub const ENV_RXNAV_URL: &str = "MEDMATE_RXNAV_URL";
pub const ENV_TIMEOUT_SECS: &str = "MEDMATE_HTTP_TIMEOUT_SECS";
pub const ENV_RETRIES: &str = "MEDMATE_HTTP_RETRIES";
pub const ENV_BACKOFF_MS: &str = "MEDMATE_HTTP_BACKOFF_MS";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medmate_core=info,medmate_assistant=info"
}

/// Settings for the terminology and interaction HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST base, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    /// Delay before the first retry; grows linearly per attempt
    pub retry_backoff_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RXNAV_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `MEDMATE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RXNAV_URL) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Some(v) = parse_var(&lookup, ENV_TIMEOUT_SECS) {
            config.timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_RETRIES) {
            config.max_retries = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_BACKOFF_MS) {
            config.retry_backoff_ms = v;
        }

        config.with_base_url_trimmed()
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self.with_base_url_trimmed()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }

    fn with_base_url_trimmed(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://rxnav.nlm.nih.gov/REST");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_backoff_ms, 250);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_RXNAV_URL, "http://localhost:4000/REST/"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_RETRIES, "0"),
            (ENV_BACKOFF_MS, "10"),
        ]));

        assert_eq!(config.base_url, "http://localhost:4000/REST");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.retry_backoff_ms, 10);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_RETRIES, "-1"),
            (ENV_RXNAV_URL, "  "),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_backoff_is_linear() {
        let config = ClientConfig::default();
        assert_eq!(config.backoff(1), Duration::from_millis(250));
        assert_eq!(config.backoff(2), Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_saturates_on_huge_values() {
        let config = ClientConfig {
            retry_backoff_ms: u64::MAX,
            max_retries: 3,
            ..ClientConfig::default()
        };
        assert_eq!(config.backoff(2), Duration::MAX);
        assert_eq!(config.backoff(3), Duration::MAX);
    }
}
