use bridge_core::{Hand, PlayState, Rank, Seat, Side, Suit};
use serde::{Deserialize, Serialize};

// Component weights, tuned by play against the double-dummy solver.
const W_SURE_WINNER: f64 = 0.5;
const W_TRUMP_LENGTH: f64 = 0.15;
const W_TRUMP_HONOR: f64 = 0.5;
const B_TRUMP_FIT: f64 = 0.3;
const B_TRUMP_DOMINANCE: f64 = 0.4;
const B_TRUMP_ACE: f64 = 0.3;
const ENTRY_ACE: f64 = 1.0;
const ENTRY_KING: f64 = 0.6;
const ENTRY_QUEEN_WITH_LENGTH: f64 = 0.3;
const W_ENTRY_VALUE: f64 = 0.2;
const B_BOTH_HANDS_ENTRY: f64 = 0.5;
const P_STRANDED_HAND: f64 = 0.3;
const FINESSE_TENACE: f64 = 0.3;
const FINESSE_MINOR_TENACE: f64 = 0.25;
const FINESSE_DOUBLE: f64 = 0.4;
const LONG_SUIT_BASE: f64 = 0.2;
const LONG_SUIT_PER_EXTRA: f64 = 0.1;
const LONG_SUIT_TOP_CARD: f64 = 0.2;

/// Per-component scores from one evaluation, summed into `total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EvalBreakdown {
    pub tricks_won: f64,
    pub sure_winners: f64,
    pub trump_control: f64,
    pub communication: f64,
    pub finesse_potential: f64,
    pub long_suits: f64,
    pub total: f64,
}

/// Weighted heuristic scoring of a position from one seat's perspective.
/// A pure function of the state: evaluating the same state twice gives the
/// same answer, and nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionEvaluator;

impl PositionEvaluator {
    pub fn evaluate(&self, state: &PlayState, perspective: Seat) -> f64 {
        self.evaluate_detailed(state, perspective).total
    }

    pub fn evaluate_detailed(&self, state: &PlayState, perspective: Seat) -> EvalBreakdown {
        let side = perspective.side();
        let differential =
            f64::from(state.tricks_won(side)) - f64::from(state.tricks_won(side.opponent()));

        // A finished deal needs no estimation: the trick differential is
        // the whole truth.
        if state.is_complete() {
            return EvalBreakdown {
                tricks_won: differential,
                total: differential,
                ..EvalBreakdown::default()
            };
        }

        let breakdown = EvalBreakdown {
            tricks_won: differential,
            sure_winners: self.sure_winners(state, side),
            trump_control: self.trump_control(state, side),
            communication: self.communication(state, side),
            finesse_potential: self.finesse_potential(state, side),
            long_suits: self.long_suits(state, side),
            ..EvalBreakdown::default()
        };
        EvalBreakdown {
            total: breakdown.tricks_won
                + breakdown.sure_winners
                + breakdown.trump_control
                + breakdown.communication
                + breakdown.finesse_potential
                + breakdown.long_suits,
            ..breakdown
        }
    }

    /// Top unbroken run of remaining ranks held by the partnership, per
    /// suit. Counting stops at the first gap an opponent holds, so this is
    /// a deliberately conservative winner count.
    fn sure_winners(&self, state: &PlayState, side: Side) -> f64 {
        let [a, b] = side.seats();
        let mut winners = 0u32;
        for suit in Suit::ALL {
            for rank in Rank::DESCENDING {
                let ours = state.hand(a).holds(rank, suit) || state.hand(b).holds(rank, suit);
                let theirs = side
                    .opponent()
                    .seats()
                    .iter()
                    .any(|s| state.hand(*s).holds(rank, suit));
                if ours {
                    winners += 1;
                } else if theirs {
                    break;
                }
                // A rank nobody holds has already been played; skip it.
            }
        }
        f64::from(winners) * W_SURE_WINNER
    }

    fn trump_control(&self, state: &PlayState, side: Side) -> f64 {
        let Some(trump) = state.trump() else {
            return 0.0;
        };
        let count = |s: Side| -> f64 {
            s.seats()
                .iter()
                .map(|seat| f64::from(state.hand(*seat).length(trump)))
                .sum()
        };
        let ours = count(side);
        let theirs = count(side.opponent());

        let high_honors = |s: Side| -> f64 {
            [Rank::Ace, Rank::King, Rank::Queen]
                .iter()
                .filter(|&&r| s.seats().iter().any(|seat| state.hand(*seat).holds(r, trump)))
                .count() as f64
        };

        let mut score = (ours - theirs) * W_TRUMP_LENGTH
            + (high_honors(side) - high_honors(side.opponent())) * W_TRUMP_HONOR;
        if ours >= 8.0 {
            score += B_TRUMP_FIT;
        }
        if ours - theirs >= 3.0 {
            score += B_TRUMP_DOMINANCE;
        }
        if side
            .seats()
            .iter()
            .any(|seat| state.hand(*seat).holds(Rank::Ace, trump))
        {
            score += B_TRUMP_ACE;
        }
        score
    }

    fn communication(&self, state: &PlayState, side: Side) -> f64 {
        let entries = |hand: &Hand| -> f64 {
            hand.cards()
                .iter()
                .map(|card| match card.rank {
                    Rank::Ace => ENTRY_ACE,
                    Rank::King => ENTRY_KING,
                    Rank::Queen if hand.length(card.suit) >= 3 => ENTRY_QUEEN_WITH_LENGTH,
                    _ => 0.0,
                })
                .sum()
        };
        let [a, b] = side.seats();
        let (ea, eb) = (entries(state.hand(a)), entries(state.hand(b)));
        let mut score = (ea + eb) * W_ENTRY_VALUE;
        if ea > 0.0 && eb > 0.0 {
            score += B_BOTH_HANDS_ENTRY;
        } else if state.hand(a).is_empty() && state.hand(b).is_empty() {
            // Nothing left to reach; no penalty.
        } else if ea == 0.0 || eb == 0.0 {
            score -= P_STRANDED_HAND;
        }
        score
    }

    /// Broken-honor holdings that can be promoted with a winning guess:
    /// AQ, AJ, KJ, KT, QT tenaces and the AQJ double finesse.
    fn finesse_potential(&self, state: &PlayState, side: Side) -> f64 {
        let mut score = 0.0;
        for seat in side.seats() {
            let hand = state.hand(seat);
            for suit in Suit::ALL {
                let has = |r: Rank| hand.holds(r, suit);
                let (a, k, q, j, t) = (
                    has(Rank::Ace),
                    has(Rank::King),
                    has(Rank::Queen),
                    has(Rank::Jack),
                    has(Rank::Ten),
                );
                score += if a && q && !k {
                    if j {
                        FINESSE_DOUBLE
                    } else {
                        FINESSE_TENACE
                    }
                } else if a && j && !k && !q {
                    FINESSE_TENACE
                } else if k && j && !a && !q {
                    FINESSE_TENACE
                } else if k && t && !q && !j {
                    FINESSE_MINOR_TENACE
                } else if q && t && !k && !j {
                    FINESSE_MINOR_TENACE
                } else {
                    0.0
                };
            }
        }
        score
    }

    fn long_suits(&self, state: &PlayState, side: Side) -> f64 {
        let [a, b] = side.seats();
        let mut score = 0.0;
        for suit in Suit::ALL {
            let combined =
                u32::from(state.hand(a).length(suit)) + u32::from(state.hand(b).length(suit));
            if combined < 5 {
                continue;
            }
            score += LONG_SUIT_BASE + LONG_SUIT_PER_EXTRA * f64::from(combined - 5);
            if let Some(top) = top_outstanding(state, suit) {
                if state.hand(a).holds(top, suit) || state.hand(b).holds(top, suit) {
                    score += LONG_SUIT_TOP_CARD;
                }
            }
        }
        score
    }
}

/// Highest rank of the suit still in any hand.
fn top_outstanding(state: &PlayState, suit: Suit) -> Option<Rank> {
    Rank::DESCENDING.into_iter().find(|&rank| {
        Seat::ALL
            .iter()
            .any(|seat| state.hand(*seat).holds(rank, suit))
    })
}
