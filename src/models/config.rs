//! Configuration for the token scanner
//! All tunable parameters and external endpoint URLs live here.

use std::time::Duration;

/// Scanner configuration, read from the environment with sensible defaults.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// HTTP JSON-RPC endpoint for chain probes
    pub rpc_url: String,

    /// Optional public fallback RPC endpoint
    pub rpc_fallback_url: Option<String>,

    /// Block-explorer API base (Etherscan-compatible)
    pub explorer_url: String,

    /// Explorer API key, if any
    pub explorer_api_key: Option<String>,

    /// Price subgraph endpoint (derivedUSD lookup)
    pub subgraph_url: String,

    /// Timeout for each individual probe / fetch
    pub probe_timeout: Duration,

    /// TTL for cached verified source text
    pub source_cache_ttl: Duration,

    /// API bind host
    pub host: String,

    /// API bind port
    pub port: u16,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            rpc_url: std::env::var("ETH_HTTP_URL")
                .unwrap_or_else(|_| "https://eth.llamarpc.com".to_string()),
            rpc_fallback_url: std::env::var("ETH_HTTP_FALLBACK_URL").ok(),
            explorer_url: std::env::var("EXPLORER_API_URL")
                .unwrap_or_else(|_| "https://api.etherscan.io".to_string()),
            explorer_api_key: std::env::var("ETHERSCAN_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            subgraph_url: std::env::var("PRICE_SUBGRAPH_URL").unwrap_or_else(|_| {
                "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v2".to_string()
            }),
            probe_timeout: Duration::from_secs(
                std::env::var("PROBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(8),
            ),
            source_cache_ttl: Duration::from_secs(
                std::env::var("SOURCE_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            ),
            host: std::env::var("RUGSCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // PORT is what most deploy platforms inject
            port: std::env::var("PORT")
                .or_else(|_| std::env::var("RUGSCAN_PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

impl ScannerConfig {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = ScannerConfig::default();
        assert!(config.probe_timeout >= Duration::from_secs(1));
        assert!(config.source_cache_ttl >= Duration::from_secs(1));
        assert!(!config.rpc_url.is_empty());
    }
}
