//! Ownership sub-check
//!
//! Unlike the generic rule table this must also surface a concrete owner
//! address when ownership is still held. A zero owner means renounced; a
//! readable non-zero owner is attached to the report; a probe failure is
//! reported as unknown rather than being conflated with renouncement, since
//! "no owner accessor" and "intentionally renounced" are different facts.

use alloy_primitives::Address;

use crate::models::types::{ChainValue, OwnershipSummary, ProbeResult, REASON_CALL_FAILED};

/// Summarize the resolved owner probe into report fields.
pub fn summarize_ownership(owner: &ChainValue<Address>) -> OwnershipSummary {
    match owner {
        ChainValue::Value(addr) if *addr == Address::ZERO => OwnershipSummary {
            renounced: ProbeResult::Positive,
            owner: None,
        },
        ChainValue::Value(addr) => OwnershipSummary {
            renounced: ProbeResult::Negative,
            owner: Some(addr.to_checksum(None)),
        },
        ChainValue::CallFailed => OwnershipSummary {
            renounced: ProbeResult::unknown(REASON_CALL_FAILED),
            owner: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_zero_owner_is_renounced_without_owner_field() {
        let summary = summarize_ownership(&ChainValue::Value(Address::ZERO));
        assert_eq!(summary.renounced, ProbeResult::Positive);
        assert!(summary.owner.is_none());
    }

    #[test]
    fn test_live_owner_is_attached() {
        let addr = Address::from_str("0xdAC17F958D2ee523a2206206994597C13D831ec7").unwrap();
        let summary = summarize_ownership(&ChainValue::Value(addr));
        assert_eq!(summary.renounced, ProbeResult::Negative);
        assert_eq!(
            summary.owner.as_deref(),
            Some("0xdAC17F958D2ee523a2206206994597C13D831ec7")
        );
    }

    #[test]
    fn test_failed_probe_is_unknown_not_renounced() {
        let summary = summarize_ownership(&ChainValue::CallFailed);
        assert_eq!(summary.renounced, ProbeResult::unknown(REASON_CALL_FAILED));
        assert!(summary.owner.is_none());
    }
}
