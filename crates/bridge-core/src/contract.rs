use crate::card::Suit;
use crate::seat::{Seat, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    pub const ALL: [Strain; 5] = [
        Strain::Clubs,
        Strain::Diamonds,
        Strain::Hearts,
        Strain::Spades,
        Strain::NoTrump,
    ];

    pub fn idx(self) -> usize {
        match self {
            Strain::Clubs => 0,
            Strain::Diamonds => 1,
            Strain::Hearts => 2,
            Strain::Spades => 3,
            Strain::NoTrump => 4,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Strain::Clubs => 'C',
            Strain::Diamonds => 'D',
            Strain::Hearts => 'H',
            Strain::Spades => 'S',
            Strain::NoTrump => 'N',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Strain::Clubs),
            'D' => Some(Strain::Diamonds),
            'H' => Some(Strain::Hearts),
            'S' => Some(Strain::Spades),
            'N' => Some(Strain::NoTrump),
            _ => None,
        }
    }

    pub fn from_suit(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => Strain::Clubs,
            Suit::Diamonds => Strain::Diamonds,
            Suit::Hearts => Strain::Hearts,
            Suit::Spades => Strain::Spades,
        }
    }

    pub fn to_suit(self) -> Option<Suit> {
        match self {
            Strain::Clubs => Some(Suit::Clubs),
            Strain::Diamonds => Some(Suit::Diamonds),
            Strain::Hearts => Some(Suit::Hearts),
            Strain::Spades => Some(Suit::Spades),
            Strain::NoTrump => None,
        }
    }

    pub fn is_major(self) -> bool {
        matches!(self, Strain::Hearts | Strain::Spades)
    }

    pub fn is_minor(self) -> bool {
        matches!(self, Strain::Clubs | Strain::Diamonds)
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Doubling {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

impl Doubling {
    /// Multiplier applied to the trick score.
    pub fn multiplier(self) -> i32 {
        match self {
            Doubling::Undoubled => 1,
            Doubling::Doubled => 2,
            Doubling::Redoubled => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub declarer: Seat,
    pub doubling: Doubling,
}

impl Contract {
    pub fn new(level: u8, strain: Strain, declarer: Seat) -> Self {
        Self {
            level,
            strain,
            declarer,
            doubling: Doubling::Undoubled,
        }
    }

    pub fn doubled(mut self, doubling: Doubling) -> Self {
        self.doubling = doubling;
        self
    }

    pub fn tricks_needed(&self) -> u8 {
        6 + self.level
    }

    pub fn trump(&self) -> Option<Suit> {
        self.strain.to_suit()
    }

    pub fn declaring_side(&self) -> Side {
        self.declarer.side()
    }

    pub fn dummy(&self) -> Seat {
        self.declarer.partner()
    }

    pub fn is_game(&self) -> bool {
        match self.strain {
            Strain::NoTrump => self.level >= 3,
            Strain::Hearts | Strain::Spades => self.level >= 4,
            Strain::Clubs | Strain::Diamonds => self.level >= 5,
        }
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level, self.strain.to_char())?;
        match self.doubling {
            Doubling::Undoubled => {}
            Doubling::Doubled => f.write_str("X")?,
            Doubling::Redoubled => f.write_str("XX")?,
        }
        write!(f, " by {}", self.declarer.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tricks_needed() {
        let contract = Contract::new(4, Strain::Spades, Seat::North);
        assert_eq!(contract.tricks_needed(), 10);
        assert_eq!(Contract::new(7, Strain::NoTrump, Seat::East).tricks_needed(), 13);
    }

    #[test]
    fn test_trump() {
        assert_eq!(
            Contract::new(4, Strain::Hearts, Seat::North).trump(),
            Some(Suit::Hearts)
        );
        assert_eq!(Contract::new(3, Strain::NoTrump, Seat::North).trump(), None);
    }

    #[test]
    fn test_game_and_slam() {
        assert!(Contract::new(3, Strain::NoTrump, Seat::South).is_game());
        assert!(Contract::new(4, Strain::Spades, Seat::South).is_game());
        assert!(!Contract::new(4, Strain::Clubs, Seat::South).is_game());
        assert!(Contract::new(6, Strain::Clubs, Seat::South).is_slam());
    }

    #[test]
    fn test_display() {
        let contract = Contract::new(4, Strain::Spades, Seat::North).doubled(Doubling::Doubled);
        assert_eq!(contract.to_string(), "4SX by N");
    }
}
