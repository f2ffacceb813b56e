//! The double-dummy solver boundary: a compact deal encoding, a pluggable
//! solver trait with explicit success/failure results, and a pure-Rust
//! backward-induction solver for builds without the native library.

pub mod encoding;
pub mod retro;
pub mod table;

#[cfg(feature = "dds")]
pub mod dds;

#[cfg(feature = "dds")]
pub use dds::DdsSolver;
pub use encoding::{encode_deal, parse_deal, EncodingError};
pub use retro::RetroSolver;
pub use table::TrickTable;

use bridge_core::{Card, Hand, PlayState, Seat, Suit};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A complete deal ready for double-dummy analysis. Hands are indexed by
/// `Seat::idx`; `leader` marks the seat on lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Hand; 4],
    pub leader: Seat,
}

impl Deal {
    pub fn new(hands: [Hand; 4], leader: Seat) -> Self {
        Self { hands, leader }
    }
}

/// A mid-play position under a fixed trump: the remaining hands, the cards
/// already on the table in the open trick, and the seat due to play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub hands: [Hand; 4],
    pub trump: Option<Suit>,
    pub next_to_play: Seat,
    pub trick_so_far: Vec<(Seat, Card)>,
}

impl SolveRequest {
    pub fn from_state(state: &PlayState) -> Self {
        Self {
            hands: state.hands().clone(),
            trump: state.trump(),
            next_to_play: state.next_to_play,
            trick_so_far: state.current_trick.plays().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("malformed deal encoding: {0}")]
    Encoding(#[from] EncodingError),

    #[error("inconsistent position: {0}")]
    Malformed(String),

    #[error("node budget of {0} exhausted")]
    BudgetExceeded(u64),

    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Perfect-information analysis of deals and mid-play positions.
///
/// Implementations report failure through `SolveError`; callers above this
/// boundary decide the recovery policy (the expert AI falls back to a fixed
/// heuristic and never surfaces the failure).
pub trait DoubleDummySolver {
    /// Remaining tricks the North-South side wins from `request` with both
    /// sides playing perfectly, counting the open trick.
    fn solve_position(&self, request: &SolveRequest) -> Result<u8, SolveError>;

    /// The seat-by-strain makeable-trick table for a complete deal.
    fn solve_deal(&self, deal: &Deal) -> Result<TrickTable, SolveError>;
}
