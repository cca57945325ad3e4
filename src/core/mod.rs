//! Core - the heuristic risk-evaluation engine
//!
//! Rule registry, tri-state evaluation, ownership resolution, peg-ratio
//! math, and report aggregation. Everything here is pure compute over
//! inputs the providers already gathered.

pub mod engine;
pub mod ownership;
pub mod peg;
pub mod report;
pub mod rules;

pub use engine::evaluate;
pub use ownership::summarize_ownership;
pub use peg::{format_peg_ratio, PegRatio};
pub use report::assemble_report;
pub use rules::{registry, HeuristicRule, ProbeSlot, RuleKind};
