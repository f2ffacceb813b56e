use crate::card::{Card, Suit};
use crate::contract::Contract;
use crate::error::PlayError;
use crate::hand::Hand;
use crate::seat::{Seat, Side};
use crate::trick::{CompletedTrick, Trick};
use serde::{Deserialize, Serialize};

/// Deal lifecycle. Transitions outside the table below are caller bugs and
/// are rejected, never repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Dealing,
    Bidding,
    BiddingComplete,
    PlayStarting,
    PlayInProgress,
    PlayComplete,
    Scoring,
    RoundComplete,
}

impl GamePhase {
    pub fn can_transition(self, to: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, to),
            (Setup, Dealing)
                | (Dealing, Bidding)
                | (Bidding, BiddingComplete)
                | (BiddingComplete, PlayStarting)
                | (PlayStarting, PlayInProgress)
                | (PlayInProgress, PlayInProgress)
                | (PlayInProgress, PlayComplete)
                | (PlayComplete, Scoring)
                | (Scoring, RoundComplete)
                | (RoundComplete, Setup)
                | (RoundComplete, Dealing)
        )
    }

    pub fn transition(self, to: GamePhase) -> Result<GamePhase, PlayError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(PlayError::InvalidPhaseTransition { from: self, to })
        }
    }
}

/// The state of one partially-played deal. Created once per hand after the
/// auction concludes, exclusively owned and mutated by one play loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayState {
    pub contract: Contract,
    hands: [Hand; 4],
    pub current_trick: Trick,
    pub history: Vec<CompletedTrick>,
    tricks_won: [u8; 2],
    pub next_to_play: Seat,
    pub dummy_revealed: bool,
    pub phase: GamePhase,
}

impl PlayState {
    /// Opens play for a contract: the opening leader is the declarer's
    /// left-hand opponent. Hands are indexed North, East, South, West.
    pub fn new(contract: Contract, hands: [Hand; 4]) -> Self {
        let leader = contract.declarer.lho();
        Self {
            contract,
            hands,
            current_trick: Trick::new(leader),
            history: Vec::with_capacity(13),
            tricks_won: [0, 0],
            next_to_play: leader,
            dummy_revealed: false,
            phase: GamePhase::PlayStarting,
        }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.idx()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn trump(&self) -> Option<Suit> {
        self.contract.trump()
    }

    pub fn tricks_won(&self, side: Side) -> u8 {
        self.tricks_won[side.idx()]
    }

    pub fn declarer_tricks(&self) -> u8 {
        self.tricks_won(self.contract.declaring_side())
    }

    pub fn defender_tricks(&self) -> u8 {
        self.tricks_won(self.contract.declaring_side().opponent())
    }

    pub fn tricks_played(&self) -> usize {
        self.history.len()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::PlayComplete
    }

    /// Cards accounted for across hands, the open trick, and closed tricks.
    /// Constant for the lifetime of the state (52 for a full deal).
    pub fn cards_accounted(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(Hand::len).sum();
        in_hands + self.current_trick.len() + 4 * self.history.len()
    }

    /// A play is legal if the seat is on turn, holds the card, and follows
    /// the led suit whenever it can.
    pub fn is_legal_play(&self, seat: Seat, card: Card) -> Result<(), PlayError> {
        match self.phase {
            GamePhase::PlayStarting | GamePhase::PlayInProgress => {}
            other => return Err(PlayError::WrongPhase(other)),
        }
        if seat != self.next_to_play {
            return Err(PlayError::OutOfTurn {
                seat,
                expected: self.next_to_play,
            });
        }
        let hand = self.hand(seat);
        if !hand.contains(card) {
            return Err(PlayError::CardNotHeld { seat, card });
        }
        if let Some(led) = self.current_trick.led_suit() {
            if card.suit != led && hand.has_suit(led) {
                return Err(PlayError::MustFollowSuit { seat, suit: led });
            }
        }
        Ok(())
    }

    /// Legal cards for the seat on turn, highest first within each suit.
    pub fn legal_plays(&self, seat: Seat) -> Vec<Card> {
        let hand = self.hand(seat);
        if let Some(led) = self.current_trick.led_suit() {
            if hand.has_suit(led) {
                return hand.cards_in(led);
            }
        }
        let mut cards = hand.cards().to_vec();
        cards.sort_by(|a, b| (b.suit, b.rank).cmp(&(a.suit, a.rank)));
        cards
    }

    /// Validates and applies one play, closing the trick when it is the
    /// fourth card. State is untouched when the play is rejected.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<(), PlayError> {
        self.is_legal_play(seat, card)?;
        let accounted = self.cards_accounted();

        self.phase = self.phase.transition(GamePhase::PlayInProgress)?;
        self.hands[seat.idx()].remove(card);
        self.current_trick.push(seat, card)?;
        // Dummy goes down once the opening lead is on the table.
        self.dummy_revealed = true;

        if self.current_trick.is_complete() {
            let winner = self.current_trick.winner(self.trump())?;
            self.tricks_won[winner.side().idx()] += 1;
            let closed = std::mem::replace(&mut self.current_trick, Trick::new(winner));
            self.history.push(CompletedTrick {
                trick: closed,
                winner,
            });
            self.next_to_play = winner;
            if self.hands.iter().all(|h| h.is_empty()) {
                self.phase = self.phase.transition(GamePhase::PlayComplete)?;
            }
        } else {
            self.next_to_play = self.current_trick.next_seat();
        }
        debug_assert_eq!(self.cards_accounted(), accounted);
        Ok(())
    }

    /// Caller-driven transitions outside the play loop (scoring, next round).
    pub fn advance_phase(&mut self, to: GamePhase) -> Result<(), PlayError> {
        self.phase = self.phase.transition(to)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Strain;

    fn spade_game() -> PlayState {
        let contract = Contract::new(4, Strain::Spades, Seat::South);
        let hands = [
            Hand::parse("AK2.QJ9.T873.642"),
            Hand::parse("43.T8765.954.T73"),
            Hand::parse("QJT98.AK.AK2.A85"),
            Hand::parse("765.432.QJ6.KQJ9"),
        ];
        PlayState::new(contract, hands)
    }

    #[test]
    fn test_opening_leader_is_lho_of_declarer() {
        let state = spade_game();
        assert_eq!(state.next_to_play, Seat::West);
        assert_eq!(state.phase, GamePhase::PlayStarting);
        assert!(!state.dummy_revealed);
    }

    #[test]
    fn test_dummy_revealed_after_opening_lead() {
        let mut state = spade_game();
        state.play_card(Seat::West, "CK".parse().unwrap()).unwrap();
        assert!(state.dummy_revealed);
        assert_eq!(state.phase, GamePhase::PlayInProgress);
        assert_eq!(state.next_to_play, Seat::North);
    }

    #[test]
    fn test_must_follow_suit() {
        let mut state = spade_game();
        state.play_card(Seat::West, "CK".parse().unwrap()).unwrap();
        let err = state.play_card(Seat::North, "HQ".parse().unwrap());
        assert_eq!(
            err,
            Err(PlayError::MustFollowSuit {
                seat: Seat::North,
                suit: Suit::Clubs
            })
        );
        // Rejection left the state untouched.
        assert_eq!(state.hand(Seat::North).len(), 13);
        assert_eq!(state.current_trick.len(), 1);
    }

    #[test]
    fn test_out_of_turn_rejected() {
        let mut state = spade_game();
        let err = state.play_card(Seat::North, "SA".parse().unwrap());
        assert_eq!(
            err,
            Err(PlayError::OutOfTurn {
                seat: Seat::North,
                expected: Seat::West
            })
        );
    }

    #[test]
    fn test_card_not_held_rejected() {
        let mut state = spade_game();
        let err = state.play_card(Seat::West, "SA".parse().unwrap());
        assert_eq!(
            err,
            Err(PlayError::CardNotHeld {
                seat: Seat::West,
                card: "SA".parse().unwrap()
            })
        );
    }

    #[test]
    fn test_trick_closes_and_winner_leads() {
        let mut state = spade_game();
        state.play_card(Seat::West, "CK".parse().unwrap()).unwrap();
        state.play_card(Seat::North, "C2".parse().unwrap()).unwrap();
        state.play_card(Seat::East, "C3".parse().unwrap()).unwrap();
        state.play_card(Seat::South, "CA".parse().unwrap()).unwrap();
        assert_eq!(state.tricks_played(), 1);
        assert_eq!(state.tricks_won(Side::NS), 1);
        assert_eq!(state.tricks_won(Side::EW), 0);
        assert_eq!(state.next_to_play, Seat::South);
        assert_eq!(state.cards_accounted(), 52);
    }

    #[test]
    fn test_legal_plays_follow_suit() {
        let mut state = spade_game();
        state.play_card(Seat::West, "H2".parse().unwrap()).unwrap();
        let legal = state.legal_plays(Seat::North);
        let expected: Vec<Card> = ["HQ", "HJ", "H9"].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(legal, expected);
    }

    #[test]
    fn test_legal_plays_when_void() {
        let contract = Contract::new(1, Strain::NoTrump, Seat::South);
        let hands = [
            Hand::parse("A..2."),
            Hand::parse(".A.3."),
            Hand::parse(".K.4."),
            Hand::parse("..5.A"),
        ];
        let mut state = PlayState::new(contract, hands);
        state.play_card(Seat::West, "CA".parse().unwrap()).unwrap();
        // North is void in clubs: the whole hand is legal.
        let legal = state.legal_plays(Seat::North);
        assert_eq!(legal.len(), 2);
    }

    #[test]
    fn test_phase_table() {
        use GamePhase::*;
        assert!(Setup.can_transition(Dealing));
        assert!(PlayInProgress.can_transition(PlayInProgress));
        assert!(RoundComplete.can_transition(Setup));
        assert!(RoundComplete.can_transition(Dealing));
        assert!(!Setup.can_transition(PlayInProgress));
        assert!(!PlayComplete.can_transition(PlayInProgress));
        assert_eq!(
            Scoring.transition(Setup),
            Err(PlayError::InvalidPhaseTransition {
                from: Scoring,
                to: Setup
            })
        );
    }

    #[test]
    fn test_cannot_play_after_completion_phase_error() {
        let mut state = spade_game();
        state.phase = GamePhase::PlayComplete;
        let err = state.play_card(Seat::West, "CK".parse().unwrap());
        assert_eq!(err, Err(PlayError::WrongPhase(GamePhase::PlayComplete)));
    }
}
