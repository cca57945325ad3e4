//! Report aggregation
//!
//! Merges the metadata snapshot, the ownership findings, the full rule
//! evaluation, and an optional peg ratio into one report. A failed peg
//! lookup is an omitted field, never an error for the report as a whole.

use indexmap::IndexMap;

use crate::core::peg::PegRatio;
use crate::models::types::{OwnershipSummary, ProbeResult, SecurityReport, TokenMetadata};

/// Assemble the final report. Rule insertion order is preserved so
/// rendering and serialization stay deterministic.
pub fn assemble_report(
    token: TokenMetadata,
    ownership: OwnershipSummary,
    checks: IndexMap<String, ProbeResult>,
    peg_ratio: Option<PegRatio>,
) -> SecurityReport {
    SecurityReport {
        token,
        ownership,
        checks,
        peg_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::peg::format_peg_ratio;
    use alloy_primitives::Address;

    fn sample_checks() -> IndexMap<String, ProbeResult> {
        let mut checks = IndexMap::new();
        checks.insert("mintable".to_string(), ProbeResult::Positive);
        checks.insert("honeypot".to_string(), ProbeResult::Negative);
        checks.insert(
            "hiddenOwner".to_string(),
            ProbeResult::unknown("source not verified"),
        );
        checks
    }

    #[test]
    fn test_check_order_preserved_in_json() {
        let report = assemble_report(
            TokenMetadata::fallback(Address::ZERO),
            OwnershipSummary {
                renounced: ProbeResult::Negative,
                owner: Some(Address::ZERO.to_checksum(None)),
            },
            sample_checks(),
            None,
        );

        let json = serde_json::to_string(&report).unwrap();
        let mintable = json.find("\"mintable\"").unwrap();
        let honeypot = json.find("\"honeypot\"").unwrap();
        let hidden = json.find("\"hiddenOwner\"").unwrap();
        assert!(mintable < honeypot && honeypot < hidden);
    }

    #[test]
    fn test_missing_peg_ratio_is_omitted() {
        let report = assemble_report(
            TokenMetadata::fallback(Address::ZERO),
            OwnershipSummary {
                renounced: ProbeResult::Positive,
                owner: None,
            },
            sample_checks(),
            None,
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("peg_ratio"));
        assert!(!json.contains("\"owner\""));
    }

    #[test]
    fn test_peg_ratio_included_when_available() {
        let peg = format_peg_ratio(1.0, 1.0).unwrap();
        let report = assemble_report(
            TokenMetadata::fallback(Address::ZERO),
            OwnershipSummary {
                renounced: ProbeResult::Positive,
                owner: None,
            },
            sample_checks(),
            Some(peg),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["peg_ratio"]["ratio"], "1:1");
        assert_eq!(json["peg_ratio"]["percentage"], "100.0000%");
    }

    #[test]
    fn test_unknown_serializes_as_string_in_report() {
        let report = assemble_report(
            TokenMetadata::fallback(Address::ZERO),
            OwnershipSummary {
                renounced: ProbeResult::Positive,
                owner: None,
            },
            sample_checks(),
            None,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checks"]["mintable"], serde_json::json!(true));
        assert_eq!(json["checks"]["honeypot"], serde_json::json!(false));
        assert_eq!(
            json["checks"]["hiddenOwner"],
            serde_json::json!("source not verified")
        );
    }
}
