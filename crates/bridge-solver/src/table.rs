use bridge_core::{Seat, Strain};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Double-dummy makeable tricks for every declarer seat and strain:
/// `get(seat, strain)` is the tricks that seat takes declaring that strain
/// against perfect defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrickTable {
    tricks: [[u8; 5]; 4],
}

impl TrickTable {
    pub fn get(&self, seat: Seat, strain: Strain) -> u8 {
        self.tricks[seat.idx()][strain.idx()]
    }

    pub fn set(&mut self, seat: Seat, strain: Strain, tricks: u8) {
        self.tricks[seat.idx()][strain.idx()] = tricks;
    }

    /// Highest-scoring strain for a seat, ties broken toward the higher
    /// strain (NT over spades over hearts, and so on).
    pub fn best_strain(&self, seat: Seat) -> Strain {
        let mut best = Strain::Clubs;
        for strain in Strain::ALL {
            if self.get(seat, strain) >= self.get(seat, best) {
                best = strain;
            }
        }
        best
    }
}

impl fmt::Display for TrickTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "     C  D  H  S  N")?;
        for seat in Seat::ALL {
            write!(f, "{}: ", seat.to_char())?;
            for strain in Strain::ALL {
                write!(f, " {:2}", self.get(seat, strain))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut table = TrickTable::default();
        table.set(Seat::South, Strain::Hearts, 10);
        assert_eq!(table.get(Seat::South, Strain::Hearts), 10);
        assert_eq!(table.get(Seat::North, Strain::Hearts), 0);
    }

    #[test]
    fn test_best_strain_prefers_higher_on_tie() {
        let mut table = TrickTable::default();
        table.set(Seat::North, Strain::Clubs, 9);
        table.set(Seat::North, Strain::NoTrump, 9);
        assert_eq!(table.best_strain(Seat::North), Strain::NoTrump);
    }

    #[test]
    fn test_serializes_flat() {
        let table = TrickTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let restored: TrickTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }
}
