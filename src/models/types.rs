//! Core data structures for token risk reports
//!
//! Every check result is an explicit tri-state: a condition that cannot be
//! evaluated (no verified source, reverted call) is reported as `Unknown`
//! with a reason, never defaulted to "safe".

use alloy_primitives::Address;
use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::core::peg::PegRatio;

/// Reason attached to checks that need verified source text.
pub const REASON_SOURCE_NOT_VERIFIED: &str = "source not verified";

/// Reason attached to checks whose feeding chain call reverted or timed out.
pub const REASON_CALL_FAILED: &str = "call failed";

/// Tri-state outcome of a single heuristic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// Condition detected
    Positive,
    /// Condition absent
    Negative,
    /// Indeterminate - carries a non-empty reason
    Unknown(String),
}

impl ProbeResult {
    /// Build from a boolean detection flag.
    pub fn from_flag(detected: bool) -> Self {
        if detected {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Build an `Unknown` result. The reason must identify the cause;
    /// an empty reason is replaced so the invariant always holds.
    pub fn unknown(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug_assert!(!reason.is_empty(), "Unknown requires a reason");
        if reason.is_empty() {
            Self::Unknown("indeterminate".to_string())
        } else {
            Self::Unknown(reason)
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Render for display: yes/no for determinate results, the reason
    /// verbatim for `Unknown`.
    pub fn render(&self) -> &str {
        match self {
            Self::Positive => "yes",
            Self::Negative => "no",
            Self::Unknown(reason) => reason,
        }
    }
}

// Serialized as a JSON boolean for Positive/Negative and as a JSON string
// (the reason) for Unknown, so consumers discriminate by type, not by
// string content.
impl Serialize for ProbeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Positive => serializer.serialize_bool(true),
            Self::Negative => serializer.serialize_bool(false),
            Self::Unknown(reason) => serializer.serialize_str(reason),
        }
    }
}

impl<'de> Deserialize<'de> for ProbeResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProbeResultVisitor;

        impl<'de> Visitor<'de> for ProbeResultVisitor {
            type Value = ProbeResult;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean or an unknown-reason string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ProbeResult, E> {
                Ok(ProbeResult::from_flag(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ProbeResult, E> {
                if v.is_empty() {
                    return Err(E::custom("unknown-reason string must be non-empty"));
                }
                Ok(ProbeResult::Unknown(v.to_string()))
            }
        }

        deserializer.deserialize_any(ProbeResultVisitor)
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

/// Outcome of one read-only contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainValue<T> {
    /// Call succeeded and decoded
    Value(T),
    /// Function absent, call reverted, or timed out
    CallFailed,
}

impl<T> ChainValue<T> {
    pub fn from_result<E>(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(_) => Self::CallFailed,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::CallFailed)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ChainValue<U> {
        match self {
            Self::Value(v) => ChainValue::Value(f(v)),
            Self::CallFailed => ChainValue::CallFailed,
        }
    }
}

/// Verified source text for a contract, if the explorer has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceText {
    Verified(String),
    Unavailable,
}

impl SourceText {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Verified(text) => Some(text),
            Self::Unavailable => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
}

/// Fixed-size slot set for the chain probes one analysis run issues.
/// Filled concurrently; evaluation only starts once every slot resolved.
#[derive(Debug, Clone, Copy)]
pub struct ChainProbes {
    /// Resolved owner address (primary or legacy accessor)
    pub owner: ChainValue<Address>,
    /// Live paused() state
    pub paused: ChainValue<bool>,
}

impl ChainProbes {
    /// All probes failed - used when the token cannot be reached.
    pub fn all_failed() -> Self {
        Self {
            owner: ChainValue::CallFailed,
            paused: ChainValue::CallFailed,
        }
    }
}

/// Immutable metadata snapshot taken once per analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Total supply scaled by `decimals`, as a decimal string
    pub total_supply: String,
}

impl TokenMetadata {
    /// Safe defaults for a token whose metadata reads all failed.
    /// Each field falls back independently at the probe layer; this is the
    /// everything-failed shape.
    pub fn fallback(address: Address) -> Self {
        Self {
            address: address.to_checksum(None),
            name: "Unknown".to_string(),
            symbol: "Unknown".to_string(),
            decimals: 18,
            total_supply: "0".to_string(),
        }
    }
}

/// Ownership findings: the renounced flag plus the concrete owner address
/// when ownership is still held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipSummary {
    pub renounced: ProbeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Final composite report for one token. Owned exclusively by the caller
/// that requested the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityReport {
    pub token: TokenMetadata,
    pub ownership: OwnershipSummary,
    /// Rule name -> result, in registry order
    pub checks: IndexMap<String, ProbeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peg_ratio: Option<PegRatio>,
}
