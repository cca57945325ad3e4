//! Block-explorer source client
//!
//! Fetches verified contract source text through an Etherscan-compatible
//! `getsourcecode` endpoint. An unverified contract, an explorer outage,
//! or a malformed response all degrade to `SourceText::Unavailable`; the
//! source-pattern checks then report unknown instead of failing the run.

use alloy_primitives::Address;
use eyre::bail;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::models::config::ScannerConfig;
use crate::models::types::SourceText;
use crate::utils::cache::SourceCache;

/// Explorer API envelope
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    result: Vec<SourceRecord>,
}

#[derive(Debug, Deserialize)]
struct SourceRecord {
    #[serde(rename = "SourceCode", default)]
    source_code: String,
}

/// Etherscan-style source provider with a per-instance TTL cache.
pub struct SourceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    cache: SourceCache,
}

impl SourceClient {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.explorer_url.trim_end_matches('/').to_string(),
            api_key: config.explorer_api_key.clone(),
            timeout: config.probe_timeout,
            cache: SourceCache::with_ttl(config.source_cache_ttl),
        }
    }

    /// Fetch verified source text for a contract, consulting the cache
    /// first. Never errors: any failure is `Unavailable`.
    pub async fn fetch_verified_source(&self, address: Address) -> SourceText {
        let key = address.to_checksum(None);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let source = match self.fetch_remote(address).await {
            Ok(source) => source,
            Err(e) => {
                warn!("source fetch failed for {}: {}", address, e);
                return SourceText::Unavailable;
            }
        };

        self.cache.set(&key, source.clone());
        source
    }

    async fn fetch_remote(&self, address: Address) -> eyre::Result<SourceText> {
        let mut url = format!(
            "{}/api?module=contract&action=getsourcecode&address={}",
            self.base_url,
            address.to_checksum(None)
        );
        if let Some(ref key) = self.api_key {
            url.push_str(&format!("&apikey={}", key));
        }

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let body: ExplorerResponse = response.json().await?;
        classify_response(body)
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }
}

/// Split explorer replies into cacheable answers and transient failures.
/// A non-"1" status covers rate limits and API errors as well as bad
/// requests, so it must error out (and stay uncached) rather than be
/// recorded as an unverified contract for a full TTL.
fn classify_response(body: ExplorerResponse) -> eyre::Result<SourceText> {
    if body.status != "1" {
        bail!("explorer returned status {}", body.status);
    }

    // Unverified contracts come back as a record with empty SourceCode
    match body.result.into_iter().next() {
        Some(record) if !record.source_code.trim().is_empty() => {
            Ok(SourceText::Verified(record.source_code))
        }
        _ => Ok(SourceText::Unavailable),
    }
}
