use crate::card::{Card, Suit};
use crate::error::PlayError;
use crate::seat::Seat;
use serde::{Deserialize, Serialize};

/// One round of four cards, one per seat, clockwise from the leader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trick {
    pub leader: Seat,
    plays: Vec<(Seat, Card)>,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn plays(&self) -> &[(Seat, Card)] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.plays.first().map(|(_, card)| card.suit)
    }

    /// The seat due to play the next card of this trick.
    pub fn next_seat(&self) -> Seat {
        let mut seat = self.leader;
        for _ in 0..self.plays.len() {
            seat = seat.next();
        }
        seat
    }

    pub fn push(&mut self, seat: Seat, card: Card) -> Result<(), PlayError> {
        if self.is_complete() {
            return Err(PlayError::TrickFull);
        }
        self.plays.push((seat, card));
        Ok(())
    }

    /// Removes and returns the most recent play. Used by search to unwind.
    pub fn pop(&mut self) -> Option<(Seat, Card)> {
        self.plays.pop()
    }

    /// The seat currently holding the trick, given what has been played so far.
    pub fn winning_seat_so_far(&self, trump: Option<Suit>) -> Option<Seat> {
        self.winning_play(trump).map(|(seat, _)| seat)
    }

    pub fn winning_card_so_far(&self, trump: Option<Suit>) -> Option<Card> {
        self.winning_play(trump).map(|(_, card)| card)
    }

    fn winning_play(&self, trump: Option<Suit>) -> Option<(Seat, Card)> {
        let led = self.led_suit()?;
        self.plays
            .iter()
            .copied()
            .max_by_key(|(_, card)| card_power(*card, led, trump))
    }

    /// Would playing `card` now take the lead in this trick?
    pub fn would_win(&self, card: Card, trump: Option<Suit>) -> bool {
        match (self.led_suit(), self.winning_card_so_far(trump)) {
            (Some(led), Some(winning)) => card_power(card, led, trump) > card_power(winning, led, trump),
            _ => true,
        }
    }

    /// Winner of a closed trick: highest trump if any trump was played,
    /// otherwise highest card of the led suit.
    pub fn winner(&self, trump: Option<Suit>) -> Result<Seat, PlayError> {
        if !self.is_complete() {
            return Err(PlayError::IncompleteTrick(self.plays.len()));
        }
        // A complete trick always has a led suit and a dominating card.
        self.winning_seat_so_far(trump)
            .ok_or(PlayError::IncompleteTrick(0))
    }
}

/// Total order over cards within one trick: trumps above led-suit cards,
/// led-suit cards above discards, rank breaking ties within a class.
fn card_power(card: Card, led: Suit, trump: Option<Suit>) -> u8 {
    if Some(card.suit) == trump {
        100 + card.rank.value()
    } else if card.suit == led {
        50 + card.rank.value()
    } else {
        0
    }
}

/// A closed trick together with its resolved winner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: Seat,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trick(leader: Seat, cards: &[&str]) -> Trick {
        let mut t = Trick::new(leader);
        let mut seat = leader;
        for s in cards {
            t.push(seat, s.parse().unwrap()).unwrap();
            seat = seat.next();
        }
        t
    }

    #[test]
    fn test_highest_of_led_suit_wins() {
        let t = trick(Seat::North, &["S5", "SK", "SA", "S2"]);
        assert_eq!(t.winner(None).unwrap(), Seat::South);
    }

    #[test]
    fn test_discard_never_wins() {
        let t = trick(Seat::North, &["S5", "HA", "DA", "S2"]);
        assert_eq!(t.winner(None).unwrap(), Seat::North);
    }

    #[test]
    fn test_trump_beats_led_suit() {
        let t = trick(Seat::West, &["SA", "SK", "H2", "S3"]);
        assert_eq!(t.winner(Some(Suit::Hearts)).unwrap(), Seat::East);
    }

    #[test]
    fn test_highest_trump_wins_overruff() {
        let t = trick(Seat::West, &["SA", "H2", "H9", "S3"]);
        assert_eq!(t.winner(Some(Suit::Hearts)).unwrap(), Seat::East);
    }

    #[test]
    fn test_incomplete_trick_rejected() {
        let t = trick(Seat::North, &["S5", "SK"]);
        assert_eq!(t.winner(None), Err(PlayError::IncompleteTrick(2)));
    }

    #[test]
    fn test_winner_dominates_all_others() {
        // Property from the rules: the winning card beats the other three
        // under (trump > non-trump, else led-suit rank).
        let trump = Some(Suit::Diamonds);
        let t = trick(Seat::East, &["C9", "CQ", "D2", "CA"]);
        let winner = t.winner(trump).unwrap();
        let led = t.led_suit().unwrap();
        let winning_card = t
            .plays()
            .iter()
            .find(|(s, _)| *s == winner)
            .map(|(_, c)| *c)
            .unwrap();
        for (seat, card) in t.plays() {
            if *seat != winner {
                assert!(card_power(winning_card, led, trump) > card_power(*card, led, trump));
            }
        }
    }

    #[test]
    fn test_would_win() {
        let t = trick(Seat::North, &["SQ", "S7"]);
        assert!(t.would_win("SK".parse().unwrap(), None));
        assert!(!t.would_win("SJ".parse().unwrap(), None));
        assert!(t.would_win("H2".parse().unwrap(), Some(Suit::Hearts)));
        assert!(!t.would_win("H2".parse().unwrap(), None));
    }

    #[test]
    fn test_next_seat() {
        let t = trick(Seat::South, &["C2", "C3"]);
        assert_eq!(t.next_seat(), Seat::North);
    }
}
