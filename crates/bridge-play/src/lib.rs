//! Card-play decision making: a heuristic position evaluator, the AI
//! variants behind one `CardPlayer` capability trait, the tie-breaking
//! signal filter, and the session-level signal integrity auditor.

pub mod audit;
pub mod evaluator;
pub mod player;
pub mod session;
pub mod signal;

pub use audit::{
    Confidence, SignalDecision, SignalIntegrityAuditor, SignalIntegrityReport, ViolationCount,
};
pub use evaluator::{EvalBreakdown, PositionEvaluator};
pub use player::{
    fallback_card, CardPlayer, ExpertPlayer, HeuristicPlayer, PlayerProfile, SolveStats,
};
pub use session::DealSession;
pub use signal::{PlayContext, SignalChoice, SignalContext, SignalHeuristic, TacticalSignalFilter};
