//! RxNav HTTP client.
//!
//! Implements both capabilities against the public NLM RxNav REST API:
//! - `rxcui.json?name=<name>&search=2` for approximate name resolution
//! - `interaction/interaction.json?rxcui=<a>&rxcui=<b>` for pair lookups

mod wire;

#[cfg(test)]
pub(crate) mod fake_server;

pub use wire::*;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::models::{InteractionEntry, TerminologyId};
use crate::resolver::{
    normalize_name, InteractionLookup, LookupError, LookupResult, NameResolver,
};

/// RxNav search mode 2: approximate (normalized, then fuzzy) matching.
const APPROXIMATE_SEARCH: &str = "2";

/// Blocking RxNav client.
pub struct RxNavClient {
    config: ClientConfig,
    client: Client,
}

impl RxNavClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> LookupResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("medmate-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Http(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// GET `path` relative to the base URL, retrying retryable failures.
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> LookupResult<T> {
        let url = format!("{}/{}", self.config.base_url, path);
        let mut attempt = 0;

        loop {
            match self.get_once(&url, query) {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.backoff(attempt);
                    tracing::debug!(%url, attempt, ?delay, error = %e, "retrying RxNav request");
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn get_once<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> LookupResult<T> {
        let response = self.client.get(url).query(query).send().map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(self.config.timeout_secs)
            } else {
                LookupError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

impl NameResolver for RxNavClient {
    fn resolve(&self, name: &str) -> Option<TerminologyId> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        let query = [("name", normalized.as_str()), ("search", APPROXIMATE_SEARCH)];
        match self.get_json::<RxcuiResponse>("rxcui.json", &query) {
            Ok(resp) => {
                let id = resp.first_rxcui().map(TerminologyId::new);
                tracing::debug!(name = %normalized, rxcui = ?id, "resolved medicine name");
                id
            }
            Err(e) => {
                tracing::warn!(name = %normalized, error = %e, "RxCUI lookup failed");
                None
            }
        }
    }
}

impl InteractionLookup for RxNavClient {
    fn interactions(
        &self,
        first: &TerminologyId,
        second: &TerminologyId,
    ) -> LookupResult<Vec<InteractionEntry>> {
        let query = [("rxcui", first.as_str()), ("rxcui", second.as_str())];
        let resp: InteractionResponse = self.get_json("interaction/interaction.json", &query)?;
        Ok(resp.into_entries())
    }
}
