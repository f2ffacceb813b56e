use crate::card::{Card, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cards one seat still holds. Shrinks by exactly one card per play.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a suit-descending hand string, "Spades.Hearts.Diamonds.Clubs",
    /// e.g. "AK2.QJ9.T873.64". Empty suits are empty segments.
    /// Panics on malformed input — use for tests and known-good data only.
    pub fn parse(s: &str) -> Self {
        let mut cards = Vec::new();
        for (segment, suit) in s.split('.').zip(Suit::DESCENDING) {
            for c in segment.chars() {
                let rank = Rank::from_char(c)
                    .unwrap_or_else(|| panic!("invalid rank char {c:?} in hand {s:?}"));
                cards.push(Card { rank, suit });
            }
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn holds(&self, rank: Rank, suit: Suit) -> bool {
        self.contains(Card::new(rank, suit))
    }

    /// Removes one card; returns false if the hand does not hold it.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    /// Cards of one suit, highest rank first.
    pub fn cards_in(&self, suit: Suit) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards.iter().copied().filter(|c| c.suit == suit).collect();
        cards.sort_by(|a, b| b.rank.cmp(&a.rank));
        cards
    }

    pub fn highest_in(&self, suit: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| c.suit == suit)
            .max_by_key(|c| c.rank)
    }

    pub fn lowest_in(&self, suit: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| c.suit == suit)
            .min_by_key(|c| c.rank)
    }

    pub fn longest_suit(&self) -> Suit {
        let mut longest = Suit::Spades;
        let mut max_len = 0;
        for suit in Suit::DESCENDING {
            let len = self.length(suit);
            if len > max_len {
                max_len = len;
                longest = suit;
            }
        }
        longest
    }

    pub fn sort(&mut self) {
        self.cards.sort_by(|a, b| {
            if a.suit != b.suit {
                b.suit.cmp(&a.suit)
            } else {
                b.rank.cmp(&a.rank)
            }
        });
    }
}

impl fmt::Display for Hand {
    /// Renders suit-descending with ranks high to low: "AK2.QJ9.T873.64".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, suit) in Suit::DESCENDING.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for card in self.cards_in(*suit) {
                write!(f, "{}", card.rank.to_char())?;
            }
        }
        Ok(())
    }
}
