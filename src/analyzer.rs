//! Token analyzer - one analysis run end to end
//!
//! Validates the address, gathers every acquisition concurrently (metadata,
//! owner probe, paused probe, source text, price lookup), then runs the
//! pure evaluation and aggregation. Partial data never blocks the report;
//! only a chain that cannot be reached at all aborts the run.

use alloy_primitives::Address;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::core::{assemble_report, evaluate, format_peg_ratio, summarize_ownership, PegRatio};
use crate::models::config::ScannerConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ChainProbes, SecurityReport};
use crate::providers::{PriceClient, RpcClient, SourceClient};

/// Reference unit value for the peg lookup: prices arrive USD-derived, so
/// the peg is always measured against 1 USD.
const PEG_REFERENCE: f64 = 1.0;

/// Orchestrates analysis runs. Cheap to clone and share across requests;
/// per-run state lives entirely on the stack of `analyze`.
#[derive(Clone)]
pub struct TokenAnalyzer {
    rpc: Arc<RpcClient>,
    source: Arc<SourceClient>,
    price: Arc<PriceClient>,
}

impl TokenAnalyzer {
    pub fn new(config: &ScannerConfig) -> AppResult<Self> {
        let rpc = RpcClient::new(config)
            .map_err(|e| AppError::config_invalid(format!("RPC client: {}", e)))?;
        Ok(Self {
            rpc: Arc::new(rpc),
            source: Arc::new(SourceClient::new(config)),
            price: Arc::new(PriceClient::new(config)),
        })
    }

    /// Source client handle, for cache statistics.
    pub fn source_client(&self) -> Arc<SourceClient> {
        Arc::clone(&self.source)
    }

    /// Run one full analysis for a token address.
    pub async fn analyze(&self, token: Address) -> AppResult<SecurityReport> {
        let start = Instant::now();

        // Reachability + validation gate: an RPC failure here means the
        // chain itself is unavailable, the only terminal acquisition error
        let code = self
            .rpc
            .get_code(token)
            .await
            .map_err(|e| AppError::rpc_unreachable(e.to_string()))?;
        if code.trim_start_matches("0x").is_empty() {
            return Err(AppError::not_a_contract(token.to_checksum(None)));
        }

        // Independent acquisitions, issued concurrently; each slot degrades
        // on its own and evaluation waits for all of them
        let (metadata, owner, paused, source, derived_usd) = tokio::join!(
            self.rpc.read_metadata(token),
            self.rpc.read_owner(token),
            self.rpc.read_paused(token),
            self.source.fetch_verified_source(token),
            self.price.fetch_derived_usd(token),
        );

        let probes = ChainProbes { owner, paused };
        let checks = evaluate(&source, &probes);
        let ownership = summarize_ownership(&probes.owner);
        let peg_ratio = derived_usd.and_then(peg_from_price);

        let unknown_count = checks.values().filter(|r| r.is_unknown()).count();
        info!(
            token = %metadata.address,
            symbol = %metadata.symbol,
            verified = source.is_verified(),
            unknown = unknown_count,
            latency_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(assemble_report(metadata, ownership, checks, peg_ratio))
    }
}

/// A price of exactly zero (or worse) is no peg at all; the field is
/// dropped rather than formatted.
fn peg_from_price(derived_usd: f64) -> Option<PegRatio> {
    match format_peg_ratio(derived_usd, PEG_REFERENCE) {
        Ok(peg) => Some(peg),
        Err(e) => {
            debug!("peg ratio dropped: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_from_price() {
        assert!(peg_from_price(0.0).is_none());
        assert!(peg_from_price(f64::NAN).is_none());

        let peg = peg_from_price(0.5).unwrap();
        assert_eq!(peg.ratio, "1:2");
    }
}
