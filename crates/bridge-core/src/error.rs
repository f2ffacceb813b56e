use crate::card::{Card, Suit};
use crate::play::GamePhase;
use crate::seat::Seat;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("{seat} does not hold {card}")]
    CardNotHeld { seat: Seat, card: Card },

    #[error("{seat} must follow suit with a {suit} card")]
    MustFollowSuit { seat: Seat, suit: Suit },

    #[error("it is {expected}'s turn to play, not {seat}'s")]
    OutOfTurn { seat: Seat, expected: Seat },

    #[error("invalid phase transition {from:?} -> {to:?}")]
    InvalidPhaseTransition { from: GamePhase, to: GamePhase },

    #[error("cannot play a card in phase {0:?}")]
    WrongPhase(GamePhase),

    #[error("trick winner requires exactly 4 cards, trick has {0}")]
    IncompleteTrick(usize),

    #[error("trick already has 4 cards")]
    TrickFull,

    #[error("{0} has no legal card to play")]
    NoLegalCard(Seat),

    #[error("equivalence set is empty")]
    EmptyEquivalenceSet,
}
