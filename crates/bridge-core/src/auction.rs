use crate::contract::{Contract, Doubling, Strain};
use crate::seat::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }
}

impl FromStr for Call {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        match s.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = s.chars();
        let level = chars.next().and_then(|c| c.to_digit(10)).ok_or(())? as u8;
        if !(1..=7).contains(&level) {
            return Err(());
        }
        let strain = chars.next().and_then(Strain::from_char).ok_or(())?;
        if chars.next().is_some() {
            return Err(());
        }
        Ok(Call::Bid { level, strain })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Pass => f.write_str("P"),
            Call::Double => f.write_str("X"),
            Call::Redouble => f.write_str("XX"),
            Call::Bid { level, strain } => write!(f, "{}{}", level, strain.to_char()),
        }
    }
}

/// A finished (or in-progress) auction: dealer plus calls in table order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Seat,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    /// Build an auction from space-separated calls like "1S P 4S X P P P".
    /// Panics on invalid input — use for tests and known-good data only.
    pub fn bidding(dealer: Seat, calls: &str) -> Self {
        let mut auction = Self::new(dealer);
        for token in calls.split_whitespace() {
            auction.calls.push(token.parse().expect("invalid call"));
        }
        auction
    }

    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    /// Calls paired with the seat that made them, clockwise from the dealer.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Call)> {
        let mut seat = self.dealer;
        self.calls.iter().map(move |call| {
            let s = seat;
            seat = seat.next();
            (s, call)
        })
    }

    /// An auction is finished after three passes following any call, or
    /// four passes straight away (a passed-out deal).
    pub fn is_complete(&self) -> bool {
        let n = self.calls.len();
        if n >= 4 && self.calls.iter().all(|c| *c == Call::Pass) {
            return true;
        }
        n >= 4 && self.calls[n - 3..].iter().all(|c| *c == Call::Pass)
    }

    /// Extracts the final contract. The declarer is the first seat of the
    /// partnership that made the final bid to have named the final strain;
    /// Pass/X/XX never alter declarer identity, only the doubling counter.
    /// Returns None for a passed-out auction.
    pub fn determine_contract(&self) -> Option<Contract> {
        let mut last_bid: Option<(u8, Strain, Seat)> = None;
        let mut doubling = Doubling::Undoubled;

        // First seat of each side to have named each strain.
        // Outer index: Side (NS = 0, EW = 1); inner: Strain::ALL order.
        let mut first_named: [[Option<Seat>; 5]; 2] = [[None; 5]; 2];

        for (seat, call) in self.iter() {
            match call {
                Call::Bid { level, strain } => {
                    let entry = &mut first_named[seat.side().idx()][strain.idx()];
                    if entry.is_none() {
                        *entry = Some(seat);
                    }
                    last_bid = Some((*level, *strain, seat));
                    doubling = Doubling::Undoubled;
                }
                Call::Double => doubling = Doubling::Doubled,
                Call::Redouble => doubling = Doubling::Redoubled,
                Call::Pass => {}
            }
        }

        last_bid.map(|(level, strain, bidder)| {
            // The lookup cannot miss: the final bid itself recorded an entry
            // for this side and strain. The final-bidder fallback stays as a
            // defensive branch only.
            let declarer = first_named[bidder.side().idx()][strain.idx()].unwrap_or(bidder);
            Contract {
                level,
                strain,
                declarer,
                doubling,
            }
        })
    }
}
