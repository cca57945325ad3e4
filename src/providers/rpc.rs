//! JSON-RPC chain client
//!
//! Thin HTTP JSON-RPC client with retry, exponential backoff with jitter,
//! and an optional public fallback endpoint, plus the typed read-only
//! probes the scanner issues (metadata fields, owner accessors, paused
//! state). Each typed probe carries its own timeout and degrades to a
//! `CallFailed` slot instead of propagating - a reverted owner() call is a
//! finding, not an error.

use alloy_primitives::Address;
use eyre::{eyre, Result};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::models::config::ScannerConfig;
use crate::models::types::{ChainValue, TokenMetadata};
use crate::utils::abi::{
    self, SEL_DECIMALS, SEL_GET_OWNER, SEL_NAME, SEL_OWNER, SEL_PAUSED, SEL_SYMBOL,
    SEL_TOTAL_SUPPLY,
};

/// Base retry delay in milliseconds
const BASE_RETRY_MS: u64 = 500;
/// Maximum retry delay in milliseconds
const MAX_RETRY_MS: u64 = 4000;
/// Maximum retry attempts per endpoint
const MAX_RETRIES: u32 = 3;
/// Jitter percentage applied to retry delays
const RETRY_JITTER_PERCENT: u64 = 20;

const USER_AGENT_VALUE: &str = concat!("rugscan/", env!("CARGO_PKG_VERSION"));

/// Failure mode of a single RPC attempt. Only transport-level failures and
/// rate limits are worth retrying; an error the node itself returned (e.g.
/// execution reverted) will not change on a second attempt.
#[derive(Debug)]
enum CallError {
    Transport(String),
    Rpc(RpcError),
}

impl CallError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rpc(err) => err.is_rate_limit(),
        }
    }

    fn into_report(self) -> eyre::Report {
        match self {
            Self::Transport(msg) => eyre!("RPC transport error: {}", msg),
            Self::Rpc(err) => eyre!("RPC error: {} (code: {})", err.message, err.code),
        }
    }
}

/// JSON-RPC client with retry logic and fallback support.
#[derive(Clone)]
pub struct RpcClient {
    primary_url: String,
    fallback_url: Option<String>,
    client: reqwest::Client,
    probe_timeout: Duration,
}

impl RpcClient {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.probe_timeout)
            .gzip(true)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            primary_url: config.rpc_url.clone(),
            fallback_url: config.rpc_fallback_url.clone(),
            client,
            probe_timeout: config.probe_timeout,
        })
    }

    /// Execute a JSON-RPC call: primary with retries, then fallback.
    pub async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let primary_err = match self.call_with_retry(&self.primary_url, &payload).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        if let Some(ref fallback) = self.fallback_url {
            // Node-level errors are authoritative; only transport failures
            // justify asking a second endpoint
            if primary_err.is_retryable() {
                warn!("primary RPC failed, trying fallback: {}", fallback);
                match self.call_with_retry(fallback, &payload).await {
                    Ok(result) => return Ok(result),
                    Err(e) => return Err(e.into_report()),
                }
            }
        }

        Err(primary_err.into_report())
    }

    /// Exponential backoff with jitter, retrying transport failures only.
    async fn call_with_retry<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, CallError> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let base_delay = BASE_RETRY_MS * 2_u64.pow(attempt - 1);
                let capped_delay = base_delay.min(MAX_RETRY_MS);
                let jitter_range = (capped_delay * RETRY_JITTER_PERCENT) / 100;
                let jitter: i64 = rand::thread_rng()
                    .gen_range(-(jitter_range as i64)..=(jitter_range as i64));
                let delay = (capped_delay as i64 + jitter).max(50) as u64;

                debug!(
                    "retry {}/{} after {}ms",
                    attempt + 1,
                    MAX_RETRIES,
                    delay
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.execute_call::<T>(url, payload).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| CallError::Transport("no attempts executed".to_string())))
    }

    async fn execute_call<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, CallError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if status == 429 {
            return Err(CallError::Rpc(RpcError {
                code: -32005,
                message: "Rate limited (HTTP 429)".to_string(),
            }));
        }
        if !status.is_success() {
            return Err(CallError::Transport(format!("HTTP error: {}", status)));
        }

        let json: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| CallError::Transport(format!("bad response body: {}", e)))?;

        if let Some(error) = json.error {
            return Err(CallError::Rpc(error));
        }

        json.result
            .ok_or_else(|| CallError::Transport("no result in response".to_string()))
    }

    /// Execute eth_call against a contract with raw selector calldata.
    pub async fn eth_call(&self, to: Address, data: &str) -> Result<String> {
        let params = serde_json::json!([
            { "to": to.to_checksum(None), "data": data },
            "latest"
        ]);
        self.call::<String>("eth_call", params).await
    }

    /// Fetch deployed bytecode. An error here means the chain itself is
    /// unreachable; "0x" means the address is not a contract.
    pub async fn get_code(&self, address: Address) -> Result<String> {
        let params = serde_json::json!([address.to_checksum(None), "latest"]);
        self.call::<String>("eth_getCode", params).await
    }

    /// RPC URL with any embedded API key masked, for logging.
    pub fn masked_url(&self) -> String {
        if self.primary_url.contains("/v2/") {
            let parts: Vec<&str> = self.primary_url.split("/v2/").collect();
            if parts.len() == 2 {
                return format!("{}/v2/***", parts[0]);
            }
        }
        self.primary_url.clone()
    }

    // Typed probes. Each has an independent timeout and resolves to a slot
    // value; failures never abort the analysis.

    async fn probe_raw(&self, token: Address, selector: &str) -> Result<String> {
        timeout(self.probe_timeout, self.eth_call(token, selector))
            .await
            .map_err(|_| eyre!("probe timed out"))?
    }

    /// Resolve the owner via the primary accessor, falling back to the
    /// legacy BEP-20 one.
    pub async fn read_owner(&self, token: Address) -> ChainValue<Address> {
        for selector in [SEL_OWNER, SEL_GET_OWNER] {
            if let Ok(ret) = self.probe_raw(token, selector).await {
                if let Ok(addr) = abi::decode_address(&ret) {
                    return ChainValue::Value(addr);
                }
            }
        }
        debug!("owner probe failed for {}", token);
        ChainValue::CallFailed
    }

    /// Live paused() state; absent or reverting means CallFailed.
    pub async fn read_paused(&self, token: Address) -> ChainValue<bool> {
        match self.probe_raw(token, SEL_PAUSED).await {
            Ok(ret) => ChainValue::from_result(abi::decode_bool(&ret)),
            Err(_) => ChainValue::CallFailed,
        }
    }

    /// Read the metadata snapshot. The four fields are fetched
    /// concurrently and each falls back independently.
    pub async fn read_metadata(&self, token: Address) -> TokenMetadata {
        let (name, symbol, decimals, supply) = tokio::join!(
            self.probe_raw(token, SEL_NAME),
            self.probe_raw(token, SEL_SYMBOL),
            self.probe_raw(token, SEL_DECIMALS),
            self.probe_raw(token, SEL_TOTAL_SUPPLY),
        );

        let name = name
            .ok()
            .and_then(|ret| abi::decode_string(&ret).ok())
            .unwrap_or_else(|| "Unknown".to_string());
        let symbol = symbol
            .ok()
            .and_then(|ret| abi::decode_string(&ret).ok())
            .unwrap_or_else(|| "Unknown".to_string());
        let decimals = decimals
            .ok()
            .and_then(|ret| abi::decode_u8(&ret).ok())
            .unwrap_or(18);
        let total_supply = supply
            .ok()
            .and_then(|ret| abi::decode_u256(&ret).ok())
            .map(|raw| abi::format_units(raw, decimals))
            .unwrap_or_else(|| "0".to_string());

        TokenMetadata {
            address: token.to_checksum(None),
            name,
            symbol,
            decimals,
            total_supply,
        }
    }
}

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<T>,
    error: Option<RpcError>,
    #[allow(dead_code)]
    id: u64,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    /// Rate limit (HTTP 429 surfaced as code -32005 by some providers)
    pub fn is_rate_limit(&self) -> bool {
        self.code == -32005 || self.message.to_lowercase().contains("rate limit")
    }
}
