use crate::Deal;
use bridge_core::{Card, Hand, Rank, Seat, Suit};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("missing ':' seat marker")]
    MissingSeatMarker,

    #[error("invalid starting seat {0:?}")]
    InvalidSeat(String),

    #[error("expected 4 space-separated hands, found {0}")]
    WrongHandCount(usize),

    #[error("hand {hand:?} has {found} suit groups, expected at most 4")]
    TooManySuits { hand: String, found: usize },

    #[error("invalid rank character {rank:?} in hand {hand:?}")]
    InvalidRank { rank: char, hand: String },

    #[error("card {0} appears twice in the deal")]
    DuplicateCard(Card),
}

/// Renders a deal in the compact solver format: an explicit starting-seat
/// marker, then four hands clockwise from that seat, space-separated, each
/// hand suit-descending (S.H.D.C) with ranks high to low:
///
/// `W:T5.A87.QJT6.Q543 K6.QJT5.875.A976 873.96.AK43.KJT8 AQJ942.K432.92.2`
pub fn encode_deal(deal: &Deal) -> String {
    let mut out = format!("{}:", deal.leader.to_char());
    let mut seat = deal.leader;
    for i in 0..4 {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&deal.hands[seat.idx()].to_string());
        seat = seat.next();
    }
    out
}

/// Strict inverse of `encode_deal`. Malformed input is a descriptive error,
/// never a silent repair.
pub fn parse_deal(s: &str) -> Result<Deal, EncodingError> {
    let s = s.trim();
    let (seat_str, rest) = s.split_once(':').ok_or(EncodingError::MissingSeatMarker)?;
    let leader = match seat_str.chars().collect::<Vec<_>>().as_slice() {
        [c] => Seat::from_char(*c).ok_or_else(|| EncodingError::InvalidSeat(seat_str.into()))?,
        _ => return Err(EncodingError::InvalidSeat(seat_str.into())),
    };

    let hand_strs: Vec<&str> = rest.split_whitespace().collect();
    if hand_strs.len() != 4 {
        return Err(EncodingError::WrongHandCount(hand_strs.len()));
    }

    let mut hands: [Hand; 4] = Default::default();
    let mut seen: HashSet<Card> = HashSet::new();
    let mut seat = leader;
    for hand_str in hand_strs {
        hands[seat.idx()] = parse_hand(hand_str, &mut seen)?;
        seat = seat.next();
    }
    Ok(Deal { hands, leader })
}

fn parse_hand(s: &str, seen: &mut HashSet<Card>) -> Result<Hand, EncodingError> {
    let segments: Vec<&str> = s.split('.').collect();
    if segments.len() > 4 {
        return Err(EncodingError::TooManySuits {
            hand: s.into(),
            found: segments.len(),
        });
    }
    let mut cards = Vec::new();
    for (segment, suit) in segments.iter().zip(Suit::DESCENDING) {
        for c in segment.chars() {
            let rank = Rank::from_char(c).ok_or(EncodingError::InvalidRank {
                rank: c,
                hand: s.into(),
            })?;
            let card = Card::new(rank, suit);
            if !seen.insert(card) {
                return Err(EncodingError::DuplicateCard(card));
            }
            cards.push(card);
        }
    }
    Ok(Hand::new(cards))
}
