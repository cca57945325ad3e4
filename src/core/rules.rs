//! Heuristic rule registry
//!
//! Named textual/behavioral signatures matched against verified contract
//! source and live probe results. This is best-effort signature detection
//! over raw source text, not static analysis or verification: a match means
//! "a known risky construct appears in the text", nothing more.
//!
//! The registry is built once at startup and shared read-only across all
//! concurrent analyses. Pattern matching is any-match-wins: a rule fires if
//! any of its patterns matches, with no weighting or negation.

use lazy_static::lazy_static;
use regex::Regex;

/// Which chain-probe slot feeds a `ChainOnly` / `Hybrid` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeSlot {
    /// Owner accessor result (zero address signals renouncement)
    Owner,
    /// Live paused() state
    Paused,
}

/// How a rule is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Source patterns only
    SourceOnly,
    /// Chain probe only
    ChainOnly(ProbeSlot),
    /// Chain probe OR source patterns, whichever is available
    Hybrid(ProbeSlot),
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceOnly => "source",
            Self::ChainOnly(_) => "chain",
            Self::Hybrid(_) => "hybrid",
        }
    }
}

/// A single named heuristic: what to look for and where.
pub struct HeuristicRule {
    pub name: &'static str,
    pub kind: RuleKind,
    patterns: Vec<Regex>,
}

impl HeuristicRule {
    fn new(name: &'static str, kind: RuleKind, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){}", p))
                    .unwrap_or_else(|e| panic!("bad pattern for rule {}: {}", name, e))
            })
            .collect();
        Self {
            name,
            kind,
            patterns,
        }
    }

    /// Any-match-wins over the rule's patterns.
    pub fn matches_source(&self, source: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(source))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

lazy_static! {
    /// Process-wide immutable rule registry. Order here is report order.
    pub static ref RULE_REGISTRY: Vec<HeuristicRule> = build_registry();
}

pub fn registry() -> &'static [HeuristicRule] {
    &RULE_REGISTRY
}

fn build_registry() -> Vec<HeuristicRule> {
    vec![
        // Owner slot is the only feed; zero address means renounced
        HeuristicRule::new(
            "ownershipRenounced",
            RuleKind::ChainOnly(ProbeSlot::Owner),
            &[],
        ),
        // Privileged-access backdoors: hardcoded sender equality, low-level
        // delegatecall, inline assembly, parameterized selfdestruct target
        HeuristicRule::new(
            "hiddenOwner",
            RuleKind::SourceOnly,
            &[
                r"msg\.sender\s*==\s*0x[0-9a-f]{40}",
                r"\.delegatecall\s*\(",
                r"assembly\s*\{",
                r"selfdestruct\s*\(\s*payable\s*\(\s*[a-z_]",
            ],
        ),
        // Transfer-blocking conditions: sender-balance gates, timestamp
        // gates, sender-equals-origin, explicit fee/tax keywords
        HeuristicRule::new(
            "honeypot",
            RuleKind::SourceOnly,
            &[
                r"require\s*\(.{0,120}balanceof\s*[\(\[]\s*(msg\.sender|from|sender)",
                r"require\s*\(.{0,120}block\.timestamp\s*[<>]",
                r"msg\.sender\s*==\s*tx\.origin",
                r"tx\.origin\s*==\s*msg\.sender",
                r"\b(buy|sell|transfer)(fee|tax)\b",
                r"\b(marketing|liquidity|dev)fee\b",
            ],
        ),
        HeuristicRule::new(
            "mintable",
            RuleKind::SourceOnly,
            &[r"function\s+mint\s*\(", r"\b_mint\s*\("],
        ),
        // Delegate-call upgradeability markers
        HeuristicRule::new(
            "proxyContract",
            RuleKind::SourceOnly,
            &[
                r"\.delegatecall\s*\(",
                r"function\s+upgradeto",
                r"\bimplementation\s*\(\s*\)",
                r"eip1967",
            ],
        ),
        // Post-deployment admin levers over fees, limits, trading state
        HeuristicRule::new(
            "hasSuspiciousFunctions",
            RuleKind::SourceOnly,
            &[
                r"function\s+set\w*(fee|tax)\w*\s*\(",
                r"function\s+set\w*max(tx|wallet|transfer)\w*\s*\(",
                r"function\s+(enable|disable|open|set)\w*trading\w*\s*\(",
                r"function\s+updatefees?\s*\(",
            ],
        ),
        HeuristicRule::new(
            "hasBlacklist",
            RuleKind::SourceOnly,
            &[r"blacklist", r"\bisbot\b", r"\bsetbots?\b", r"\bbanned\b"],
        ),
        HeuristicRule::new(
            "hasWhitelist",
            RuleKind::SourceOnly,
            &[r"whitelist", r"allowlist"],
        ),
        // Time-gated transfer restrictions
        HeuristicRule::new(
            "transferCooldown",
            RuleKind::SourceOnly,
            &[
                r"cooldown",
                r"transferdelay",
                r"lasttransfer(time|timestamp)?\b",
            ],
        ),
        // Live paused state OR pausability markers in source
        HeuristicRule::new(
            "transferPausable",
            RuleKind::Hybrid(ProbeSlot::Paused),
            &[r"whennotpaused", r"\bpausable\b", r"function\s+pause\s*\("],
        ),
    ]
}
