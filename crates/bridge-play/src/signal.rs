use bridge_core::{Card, Hand, PlayError, Rank, Seat, Suit, Trick};
use serde::{Deserialize, Serialize};

/// Where in the trick (and the deal) a card is being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayContext {
    OpeningLead,
    MidhandLead,
    SecondHandFollow,
    ThirdHandFollow,
    FourthHandFollow,
    DiscardFirst,
    DiscardSubsequent,
}

/// Which convention drove the pick. Serialized into audit logs, so the
/// wire names are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalHeuristic {
    TopOfSequence,
    AvoidTrumpLead,
    LowestEquivalent,
    SecondHandLow,
    BottomOfSequence,
    ConserveHonors,
    ThirdHandHigh,
    CheapestWinner,
    FourthHandLow,
    AttitudeEncourage,
    AttitudeDiscourage,
    DiscardLow,
    Forced,
    OnlyOption,
}

impl SignalHeuristic {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalHeuristic::TopOfSequence => "top_of_sequence",
            SignalHeuristic::AvoidTrumpLead => "avoid_trump_lead",
            SignalHeuristic::LowestEquivalent => "lowest_equivalent",
            SignalHeuristic::SecondHandLow => "second_hand_low",
            SignalHeuristic::BottomOfSequence => "bottom_of_sequence",
            SignalHeuristic::ConserveHonors => "conserve_honors",
            SignalHeuristic::ThirdHandHigh => "third_hand_high",
            SignalHeuristic::CheapestWinner => "cheapest_winner",
            SignalHeuristic::FourthHandLow => "fourth_hand_low",
            SignalHeuristic::AttitudeEncourage => "attitude_encourage",
            SignalHeuristic::AttitudeDiscourage => "attitude_discourage",
            SignalHeuristic::DiscardLow => "discard_low",
            SignalHeuristic::Forced => "forced",
            SignalHeuristic::OnlyOption => "only_option",
        }
    }
}

/// The filter's pick from a set of tactically equivalent cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalChoice {
    pub card: Card,
    pub heuristic: SignalHeuristic,
    /// Only a singleton set makes the pick trivially optimal; any larger
    /// set trades nothing tactically, by construction.
    pub is_optimal: bool,
}

/// Everything the filter can see when choosing among equivalents.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext<'a> {
    pub context: PlayContext,
    pub trump: Option<Suit>,
    pub trick: &'a Trick,
    pub hand: &'a Hand,
    pub seat: Seat,
}

/// Breaks ties among tactically equivalent cards using standard carding
/// conventions, so the chosen spot card carries information for partner.
#[derive(Debug, Clone, Copy, Default)]
pub struct TacticalSignalFilter;

impl TacticalSignalFilter {
    pub fn select(
        &self,
        candidates: &[Card],
        ctx: &SignalContext<'_>,
    ) -> Result<SignalChoice, PlayError> {
        if candidates.is_empty() {
            return Err(PlayError::EmptyEquivalenceSet);
        }
        if candidates.len() == 1 {
            return Ok(SignalChoice {
                card: candidates[0],
                heuristic: SignalHeuristic::OnlyOption,
                is_optimal: true,
            });
        }
        let (card, heuristic) = match ctx.context {
            PlayContext::OpeningLead | PlayContext::MidhandLead => self.lead(candidates, ctx),
            PlayContext::SecondHandFollow => (lowest(candidates), SignalHeuristic::SecondHandLow),
            PlayContext::ThirdHandFollow => self.third_hand(candidates, ctx),
            PlayContext::FourthHandFollow => self.fourth_hand(candidates, ctx),
            PlayContext::DiscardFirst | PlayContext::DiscardSubsequent => {
                self.discard(candidates, ctx)
            }
        };
        Ok(SignalChoice {
            card,
            heuristic,
            is_optimal: false,
        })
    }

    fn lead(&self, candidates: &[Card], ctx: &SignalContext<'_>) -> (Card, SignalHeuristic) {
        if touching_sequence(candidates) {
            return (highest(candidates), SignalHeuristic::TopOfSequence);
        }
        if let Some(trump) = ctx.trump {
            let plain: Vec<Card> = candidates
                .iter()
                .copied()
                .filter(|c| c.suit != trump)
                .collect();
            if !plain.is_empty() && plain.len() < candidates.len() {
                return (lowest(&plain), SignalHeuristic::AvoidTrumpLead);
            }
        }
        (lowest(candidates), SignalHeuristic::LowestEquivalent)
    }

    fn third_hand(&self, candidates: &[Card], ctx: &SignalContext<'_>) -> (Card, SignalHeuristic) {
        if touching_sequence(candidates) {
            return (lowest(candidates), SignalHeuristic::BottomOfSequence);
        }
        if ctx.trick.winning_seat_so_far(ctx.trump) == Some(ctx.seat.partner()) {
            return (lowest(candidates), SignalHeuristic::ConserveHonors);
        }
        (highest(candidates), SignalHeuristic::ThirdHandHigh)
    }

    fn fourth_hand(&self, candidates: &[Card], ctx: &SignalContext<'_>) -> (Card, SignalHeuristic) {
        let winners: Vec<Card> = candidates
            .iter()
            .copied()
            .filter(|&c| ctx.trick.would_win(c, ctx.trump))
            .collect();
        if winners.is_empty() {
            (lowest(candidates), SignalHeuristic::FourthHandLow)
        } else {
            (lowest(&winners), SignalHeuristic::CheapestWinner)
        }
    }

    fn discard(&self, candidates: &[Card], ctx: &SignalContext<'_>) -> (Card, SignalHeuristic) {
        let plain: Vec<Card> = candidates
            .iter()
            .copied()
            .filter(|c| Some(c.suit) != ctx.trump)
            .collect();
        if plain.is_empty() {
            return (lowest(candidates), SignalHeuristic::Forced);
        }
        let safe: Vec<Card> = plain
            .iter()
            .copied()
            .filter(|&c| !is_sole_stopper(ctx.hand, c))
            .collect();
        let pool = if safe.is_empty() { &plain } else { &safe };

        if ctx.context == PlayContext::DiscardFirst {
            // An encouraging spot card points partner at a suit where the
            // hand still holds a top honor.
            let encouraging: Vec<Card> = pool
                .iter()
                .copied()
                .filter(|&c| c.rank.is_spot() && holds_top_honor_besides(ctx.hand, c))
                .collect();
            if !encouraging.is_empty() {
                return (highest(&encouraging), SignalHeuristic::AttitudeEncourage);
            }
            return (lowest(pool), SignalHeuristic::AttitudeDiscourage);
        }
        (lowest(pool), SignalHeuristic::DiscardLow)
    }
}

/// All candidates in one suit with consecutive ranks.
fn touching_sequence(cards: &[Card]) -> bool {
    let suit = cards[0].suit;
    if cards.iter().any(|c| c.suit != suit) {
        return false;
    }
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.windows(2).all(|w| w[0] == w[1] + 1)
}

fn highest(cards: &[Card]) -> Card {
    cards
        .iter()
        .copied()
        .max_by_key(|c| (c.rank, c.suit))
        .unwrap()
}

fn lowest(cards: &[Card]) -> Card {
    cards
        .iter()
        .copied()
        .min_by_key(|c| (c.rank, c.suit))
        .unwrap()
}

/// A holding that still controls the suit: the ace outright, the king
/// guarded once, or the queen guarded twice.
fn has_stopper(hand: &Hand, suit: Suit) -> bool {
    let len = hand.length(suit);
    hand.holds(Rank::Ace, suit)
        || (hand.holds(Rank::King, suit) && len >= 2)
        || (hand.holds(Rank::Queen, suit) && len >= 3)
}

/// Would discarding this card give up the hand's last stopper in its suit?
fn is_sole_stopper(hand: &Hand, card: Card) -> bool {
    if !has_stopper(hand, card.suit) {
        return false;
    }
    let mut after = hand.clone();
    after.remove(card);
    !has_stopper(&after, card.suit)
}

fn holds_top_honor_besides(hand: &Hand, spot: Card) -> bool {
    [Rank::Ace, Rank::King, Rank::Queen]
        .iter()
        .any(|&r| hand.holds(r, spot.suit))
}
