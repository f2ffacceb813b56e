use std::time::{Duration, Instant};

use bridge_core::{Card, PlayError, PlayState, Seat, Side};
use bridge_solver::{DoubleDummySolver, RetroSolver, SolveError, SolveRequest};
use serde::{Deserialize, Serialize};

/// A card-selection strategy. Implementations may keep internal counters
/// but never mutate the state they are shown.
pub trait CardPlayer {
    fn choose_card(&mut self, state: &PlayState, seat: Seat) -> Result<Card, PlayError>;
}

/// Strategy selection for building a player at the session boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlayerProfile {
    Heuristic { depth: u8 },
    Expert,
}

impl PlayerProfile {
    pub fn build(self) -> Box<dyn CardPlayer> {
        match self {
            PlayerProfile::Heuristic { depth } => Box::new(HeuristicPlayer::new(depth)),
            PlayerProfile::Expert => Box::new(ExpertPlayer::new(RetroSolver::default())),
        }
    }
}

/// Depth-limited minimax over the position evaluator. Strong enough for a
/// casual opponent and never needs a solver.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPlayer {
    depth: u8,
    evaluator: crate::PositionEvaluator,
}

impl HeuristicPlayer {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            evaluator: crate::PositionEvaluator,
        }
    }

    fn minimax(&self, state: &PlayState, depth: u8, perspective: Seat) -> Result<f64, PlayError> {
        if depth == 0 || state.is_complete() {
            return Ok(self.evaluator.evaluate(state, perspective));
        }
        let mover = state.next_to_play;
        let legal = state.legal_plays(mover);
        if legal.is_empty() {
            return Err(PlayError::NoLegalCard(mover));
        }
        let maximizing = mover.side() == perspective.side();
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for card in legal {
            let mut child = state.clone();
            child.play_card(mover, card)?;
            let value = self.minimax(&child, depth - 1, perspective)?;
            if maximizing {
                best = best.max(value);
            } else {
                best = best.min(value);
            }
        }
        Ok(best)
    }
}

impl CardPlayer for HeuristicPlayer {
    fn choose_card(&mut self, state: &PlayState, seat: Seat) -> Result<Card, PlayError> {
        let legal = state.legal_plays(seat);
        if legal.is_empty() {
            return Err(PlayError::NoLegalCard(seat));
        }
        if legal.len() == 1 {
            return Ok(legal[0]);
        }
        let mut best = None;
        for card in legal {
            let mut child = state.clone();
            child.play_card(seat, card)?;
            let value = self.minimax(&child, self.depth, seat)?;
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((card, value)),
            }
        }
        // Non-empty legal set guarantees a candidate.
        best.map(|(card, _)| card)
            .ok_or(PlayError::NoLegalCard(seat))
    }
}

/// Cumulative solver usage for one player, snapshotted via
/// [`ExpertPlayer::stats`]. `solve_count` is the number of individual
/// solver invocations, one per candidate position solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub solve_count: u64,
    pub total_solve_time: Duration,
}

/// Double-dummy play: every legal card is tried against the solver and the
/// one maximizing the mover's side wins. When the solver fails, for any
/// reason, play continues with [`fallback_card`] rather than an error.
pub struct ExpertPlayer<S: DoubleDummySolver> {
    solver: S,
    stats: SolveStats,
}

impl<S: DoubleDummySolver> ExpertPlayer<S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            stats: SolveStats::default(),
        }
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    fn pick_by_solver(
        &mut self,
        state: &PlayState,
        seat: Seat,
        legal: &[Card],
    ) -> Result<Card, SolveError> {
        let declaring = state.contract.declaring_side();
        let maximizing = seat.side() == declaring;
        let mut best: Option<(Card, u8)> = None;
        for &card in legal {
            let mut child = state.clone();
            child
                .play_card(seat, card)
                .map_err(|e| SolveError::Malformed(e.to_string()))?;
            // A completed child needs no solve; only real invocations count.
            if !child.is_complete() {
                self.stats.solve_count += 1;
            }
            let tricks = solved_declarer_tricks(&self.solver, &child)?;
            let better = match best {
                None => true,
                Some((_, top)) => {
                    if maximizing {
                        tricks > top
                    } else {
                        tricks < top
                    }
                }
            };
            if better {
                best = Some((card, tricks));
            }
        }
        best.map(|(card, _)| card)
            .ok_or_else(|| SolveError::Malformed("no candidate plays".into()))
    }
}

impl<S: DoubleDummySolver> CardPlayer for ExpertPlayer<S> {
    fn choose_card(&mut self, state: &PlayState, seat: Seat) -> Result<Card, PlayError> {
        let legal = state.legal_plays(seat);
        if legal.is_empty() {
            return Err(PlayError::NoLegalCard(seat));
        }
        if legal.len() == 1 {
            return Ok(legal[0]);
        }
        let started = Instant::now();
        let picked = self.pick_by_solver(state, seat, &legal);
        self.stats.total_solve_time += started.elapsed();
        match picked {
            Ok(card) => Ok(card),
            Err(error) => {
                tracing::warn!(%seat, %error, "double-dummy solve failed, falling back");
                Ok(fallback_card(state, seat, &legal))
            }
        }
    }
}

/// Declarer tricks for the whole deal assuming perfect play from `state`
/// onward. The solver reports remaining North-South tricks; this converts
/// to the declaring side's final count.
pub(crate) fn solved_declarer_tricks<S: DoubleDummySolver>(
    solver: &S,
    state: &PlayState,
) -> Result<u8, SolveError> {
    if state.is_complete() {
        return Ok(state.declarer_tricks());
    }
    let remaining = state
        .hands()
        .iter()
        .map(|h| h.len() as u8)
        .max()
        .unwrap_or(0);
    let total = state.tricks_played() as u8 + remaining;
    let ns_remaining = solver.solve_position(&SolveRequest::from_state(state))?;
    let ns_total = state.tricks_won(Side::NS) + ns_remaining;
    Ok(if state.contract.declaring_side() == Side::NS {
        ns_total
    } else {
        total - ns_total
    })
}

/// Deterministic stand-in when the solver is unavailable. Leads top of the
/// longest suit, covers early in the trick, ducks under a winning partner,
/// and otherwise plays a middle card.
pub fn fallback_card(state: &PlayState, seat: Seat, legal: &[Card]) -> Card {
    if legal.len() == 1 {
        return legal[0];
    }
    let trick = &state.current_trick;
    if trick.is_empty() {
        let hand = state.hand(seat);
        let suit = hand.longest_suit();
        if let Some(card) = hand.highest_in(suit) {
            return card;
        }
    }
    if trick.len() == 1 {
        // legal is ordered highest first for a follow.
        return legal[0];
    }
    if trick.winning_seat_so_far(state.trump()) == Some(seat.partner()) {
        let mut sorted = legal.to_vec();
        sorted.sort_by_key(|c| c.rank);
        return sorted[0];
    }
    let mut sorted = legal.to_vec();
    sorted.sort_by_key(|c| c.rank);
    sorted[sorted.len() / 2]
}
