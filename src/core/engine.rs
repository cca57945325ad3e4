//! Heuristic evaluation engine
//!
//! Pure function of (source text, chain-probe slots): all I/O has already
//! happened by the time this runs. Every registered rule produces exactly
//! one result, in registry order, so two evaluations of the same inputs
//! yield identical reports.

use alloy_primitives::Address;
use indexmap::IndexMap;

use crate::core::rules::{registry, HeuristicRule, ProbeSlot, RuleKind};
use crate::models::types::{
    ChainProbes, ChainValue, ProbeResult, SourceText, REASON_CALL_FAILED,
    REASON_SOURCE_NOT_VERIFIED,
};

/// Evaluate every registered rule against one (source, probes) snapshot.
/// Rules are mutually independent; no rule reads another's result.
pub fn evaluate(source: &SourceText, probes: &ChainProbes) -> IndexMap<String, ProbeResult> {
    registry()
        .iter()
        .map(|rule| (rule.name.to_string(), evaluate_rule(rule, source, probes)))
        .collect()
}

fn evaluate_rule(rule: &HeuristicRule, source: &SourceText, probes: &ChainProbes) -> ProbeResult {
    match rule.kind {
        RuleKind::SourceOnly => match source.text() {
            Some(text) => ProbeResult::from_flag(rule.matches_source(text)),
            None => ProbeResult::unknown(REASON_SOURCE_NOT_VERIFIED),
        },
        RuleKind::ChainOnly(slot) => match slot_signal(probes, slot) {
            ChainValue::Value(flag) => ProbeResult::from_flag(flag),
            ChainValue::CallFailed => ProbeResult::unknown(REASON_CALL_FAILED),
        },
        RuleKind::Hybrid(slot) => {
            let chain = slot_signal(probes, slot);
            if chain == ChainValue::Value(true) {
                return ProbeResult::Positive;
            }
            match source.text() {
                Some(text) => ProbeResult::from_flag(rule.matches_source(text)),
                // Chain said "no" and source is missing: the chain signal
                // alone is enough for a Negative
                None => match chain {
                    ChainValue::Value(false) => ProbeResult::Negative,
                    _ => ProbeResult::unknown(REASON_CALL_FAILED),
                },
            }
        }
    }
}

/// Reduce a probe slot to the boolean signal its rules consume.
fn slot_signal(probes: &ChainProbes, slot: ProbeSlot) -> ChainValue<bool> {
    match slot {
        ProbeSlot::Owner => probes.owner.map(|addr| addr == Address::ZERO),
        ProbeSlot::Paused => probes.paused,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn verified(text: &str) -> SourceText {
        SourceText::Verified(text.to_string())
    }

    fn probes_ok() -> ChainProbes {
        ChainProbes {
            owner: ChainValue::Value(Address::from_str("0x1111111111111111111111111111111111111111").unwrap()),
            paused: ChainValue::Value(false),
        }
    }

    #[test]
    fn test_source_rules_unknown_without_source() {
        let checks = evaluate(&SourceText::Unavailable, &probes_ok());
        for rule in registry() {
            if matches!(rule.kind, RuleKind::SourceOnly) {
                assert_eq!(
                    checks[rule.name],
                    ProbeResult::unknown(REASON_SOURCE_NOT_VERIFIED),
                    "rule {}",
                    rule.name
                );
            }
        }
    }

    #[test]
    fn test_chain_rules_unknown_on_call_failure() {
        let checks = evaluate(&SourceText::Unavailable, &ChainProbes::all_failed());
        assert_eq!(
            checks["ownershipRenounced"],
            ProbeResult::unknown(REASON_CALL_FAILED)
        );
    }

    #[test]
    fn test_ownership_renounced_on_zero_owner() {
        let probes = ChainProbes {
            owner: ChainValue::Value(Address::ZERO),
            paused: ChainValue::Value(false),
        };
        let checks = evaluate(&SourceText::Unavailable, &probes);
        assert_eq!(checks["ownershipRenounced"], ProbeResult::Positive);
    }

    #[test]
    fn test_hybrid_positive_from_chain_signal_alone() {
        let probes = ChainProbes {
            owner: ChainValue::CallFailed,
            paused: ChainValue::Value(true),
        };
        let checks = evaluate(&SourceText::Unavailable, &probes);
        assert_eq!(checks["transferPausable"], ProbeResult::Positive);
    }

    #[test]
    fn test_hybrid_positive_from_source_when_chain_failed() {
        let probes = ChainProbes {
            owner: ChainValue::CallFailed,
            paused: ChainValue::CallFailed,
        };
        let source = verified("function transfer(address to, uint256 v) whenNotPaused {}");
        let checks = evaluate(&source, &probes);
        assert_eq!(checks["transferPausable"], ProbeResult::Positive);
    }

    #[test]
    fn test_hybrid_negative_when_chain_says_no_and_no_source() {
        let checks = evaluate(&SourceText::Unavailable, &probes_ok());
        assert_eq!(checks["transferPausable"], ProbeResult::Negative);
    }

    #[test]
    fn test_hybrid_unknown_only_when_both_signals_missing() {
        let checks = evaluate(&SourceText::Unavailable, &ChainProbes::all_failed());
        assert!(checks["transferPausable"].is_unknown());
    }

    #[test]
    fn test_rule_independence() {
        // A mint marker and nothing else: only mintable flips
        let source = verified("function mint(address to, uint256 amount) public {}");
        let checks = evaluate(&source, &probes_ok());
        assert_eq!(checks["mintable"], ProbeResult::Positive);
        for name in [
            "hiddenOwner",
            "honeypot",
            "proxyContract",
            "hasSuspiciousFunctions",
            "hasBlacklist",
            "hasWhitelist",
            "transferCooldown",
            "transferPausable",
        ] {
            assert_eq!(checks[name], ProbeResult::Negative, "rule {}", name);
        }
    }

    #[test]
    fn test_every_rule_has_a_result() {
        let checks = evaluate(&SourceText::Unavailable, &ChainProbes::all_failed());
        assert_eq!(checks.len(), registry().len());
        assert!(checks.values().all(|r| r.is_unknown()));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let source = verified("uint256 public sellTax = 10; function setFee(uint256 f) external {}");
        let first = evaluate(&source, &probes_ok());
        let second = evaluate(&source, &probes_ok());
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_order_matches_registry() {
        let checks = evaluate(&SourceText::Unavailable, &probes_ok());
        let names: Vec<&str> = checks.keys().map(String::as_str).collect();
        let expected: Vec<&str> = registry().iter().map(|r| r.name).collect();
        assert_eq!(names, expected);
    }
}
