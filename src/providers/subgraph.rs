//! Price subgraph client
//!
//! Looks up a token's USD-derived unit price from a Graph-protocol DEX
//! subgraph. Display-grade data only: it feeds the peg-ratio field of the
//! report, never a heuristic decision. A failed lookup simply omits the
//! field.

use alloy_primitives::Address;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::config::ScannerConfig;

#[derive(Debug, Deserialize)]
struct GraphResponse {
    #[serde(default)]
    data: Option<GraphData>,
}

#[derive(Debug, Deserialize)]
struct GraphData {
    token: Option<GraphToken>,
}

#[derive(Debug, Deserialize)]
struct GraphToken {
    #[serde(rename = "derivedUSD")]
    derived_usd: Option<String>,
}

/// GraphQL price-feed client.
pub struct PriceClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl PriceClient {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.subgraph_url.clone(),
            timeout: config.probe_timeout,
        }
    }

    /// Fetch the token's derived USD unit value, or None if the feed is
    /// unreachable or does not track the token.
    pub async fn fetch_derived_usd(&self, address: Address) -> Option<f64> {
        match self.fetch_remote(address).await {
            Ok(value) => value,
            Err(e) => {
                warn!("price lookup failed for {}: {}", address, e);
                None
            }
        }
    }

    async fn fetch_remote(&self, address: Address) -> eyre::Result<Option<f64>> {
        // Subgraph IDs are lowercase hex addresses
        let query = format!(
            r#"{{ token(id: "{:#x}") {{ derivedUSD }} }}"#,
            address
        );

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?;

        let body: GraphResponse = response.json().await?;

        let derived = body
            .data
            .and_then(|d| d.token)
            .and_then(|t| t.derived_usd)
            .and_then(|v| v.parse::<f64>().ok());

        if derived.is_none() {
            debug!("no derivedUSD for {}", address);
        }
        Ok(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_derived_usd() {
        let body: GraphResponse = serde_json::from_str(
            r#"{"data":{"token":{"derivedUSD":"0.9987"}}}"#,
        )
        .unwrap();
        let value = body
            .data
            .and_then(|d| d.token)
            .and_then(|t| t.derived_usd)
            .and_then(|v| v.parse::<f64>().ok());
        assert_eq!(value, Some(0.9987));
    }

    #[test]
    fn test_parse_untracked_token() {
        let body: GraphResponse = serde_json::from_str(r#"{"data":{"token":null}}"#).unwrap();
        assert!(body.data.unwrap().token.is_none());
    }

    #[test]
    fn test_parse_error_body() {
        let body: GraphResponse =
            serde_json::from_str(r#"{"errors":[{"message":"boom"}]}"#).unwrap();
        assert!(body.data.is_none());
    }
}
