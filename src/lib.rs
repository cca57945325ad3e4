//! rugscan library
//!
//! Heuristic risk scanner for deployed ERC-20 token contracts. Combines
//! live read-only chain probes with best-effort signature matching over
//! verified source text, producing a composite report of named tri-state
//! findings:
//! - ownership status (renounced / held / unknown)
//! - textual backdoor, honeypot, mint, proxy, and admin-lever signatures
//! - allow/deny-list, cooldown, and pausability markers
//! - an optional USD peg ratio
//!
//! A check that cannot be evaluated is reported as unknown with a reason,
//! never silently treated as safe.

pub mod analyzer;
pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::analyzer::TokenAnalyzer;
pub use crate::core::{evaluate, format_peg_ratio, registry, summarize_ownership, PegRatio};
pub use crate::models::config::ScannerConfig;
pub use crate::models::errors::{AppError, AppResult, ErrorCode};
pub use crate::models::types::{
    ChainProbes, ChainValue, OwnershipSummary, ProbeResult, SecurityReport, SourceText,
    TokenMetadata,
};
pub use crate::providers::{PriceClient, RpcClient, SourceClient};
pub use crate::utils::{CacheStats, SourceCache};
