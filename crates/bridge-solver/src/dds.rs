//! Adapter over the native `dds-bridge` solver. Compiled only with the
//! `dds` feature; default builds rely on [`crate::RetroSolver`] so the
//! workspace functions with the native library entirely absent.

use crate::{Deal, DoubleDummySolver, SolveError, SolveRequest, TrickTable};
use bridge_core::{Seat, Strain, Suit};
use dds_bridge::contract::Strain as DdsStrain;
use dds_bridge::deal::{Deal as DdsDeal, Seat as DdsSeat, SmallSet, Suit as DdsSuit};
use dds_bridge::solver::{self, StrainFlags};

#[derive(Debug, Clone, Copy, Default)]
pub struct DdsSolver;

fn dds_seat(seat: Seat) -> DdsSeat {
    match seat {
        Seat::North => DdsSeat::North,
        Seat::East => DdsSeat::East,
        Seat::South => DdsSeat::South,
        Seat::West => DdsSeat::West,
    }
}

fn dds_suit(suit: Suit) -> DdsSuit {
    match suit {
        Suit::Clubs => DdsSuit::Clubs,
        Suit::Diamonds => DdsSuit::Diamonds,
        Suit::Hearts => DdsSuit::Hearts,
        Suit::Spades => DdsSuit::Spades,
    }
}

fn dds_strain(strain: Strain) -> DdsStrain {
    match strain {
        Strain::Clubs => DdsStrain::Clubs,
        Strain::Diamonds => DdsStrain::Diamonds,
        Strain::Hearts => DdsStrain::Hearts,
        Strain::Spades => DdsStrain::Spades,
        Strain::NoTrump => DdsStrain::Notrump,
    }
}

impl DoubleDummySolver for DdsSolver {
    /// The table backend only analyses complete deals; mid-play positions
    /// are reported as a backend failure so callers take their fallback.
    fn solve_position(&self, _request: &SolveRequest) -> Result<u8, SolveError> {
        Err(SolveError::Backend(
            "native table backend cannot solve mid-play positions".into(),
        ))
    }

    fn solve_deal(&self, deal: &Deal) -> Result<TrickTable, SolveError> {
        let mut dds_deal = DdsDeal::default();
        for seat in Seat::ALL {
            for card in deal.hands[seat.idx()].cards() {
                dds_deal[dds_seat(seat)][dds_suit(card.suit)].insert(card.rank.value());
            }
        }

        let results = solver::solve_deals(&[dds_deal], StrainFlags::all())
            .map_err(|e| SolveError::Backend(format!("{e:?}")))?;
        let native = results
            .first()
            .ok_or_else(|| SolveError::Backend("solver returned no table".into()))?;

        let mut table = TrickTable::default();
        for seat in Seat::ALL {
            for strain in Strain::ALL {
                let tricks = native[dds_strain(strain)].get(dds_seat(seat));
                table.set(seat, strain, tricks as u8);
            }
        }
        Ok(table)
    }
}
