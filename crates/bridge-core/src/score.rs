use crate::card::Rank;
use crate::contract::{Contract, Doubling, Strain};
use crate::hand::Hand;
use crate::seat::{Seat, Vulnerability};
use serde::{Deserialize, Serialize};

/// Post-hand scoring breakdown, signed from the declaring side's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tricks_taken: u8,
    pub made: bool,
    pub trick_score: i32,
    pub overtrick_score: i32,
    pub game_bonus: i32,
    pub slam_bonus: i32,
    pub insult_bonus: i32,
    pub undertrick_penalty: i32,
    pub honors_bonus: i32,
    pub total: i32,
}

/// Value of one contracted trick over six.
fn trick_value(strain: Strain) -> i32 {
    if strain.is_minor() {
        20
    } else {
        30
    }
}

fn undertrick_penalty(contract: &Contract, down: i32, vulnerable: bool) -> i32 {
    match contract.doubling {
        Doubling::Undoubled => down * if vulnerable { 100 } else { 50 },
        Doubling::Doubled => doubled_undertricks(down, vulnerable),
        Doubling::Redoubled => 2 * doubled_undertricks(down, vulnerable),
    }
}

/// Doubled penalty ladder: 100 then 200,200 then 300 each (not vulnerable);
/// 200 then 300 each (vulnerable).
fn doubled_undertricks(down: i32, vulnerable: bool) -> i32 {
    let mut total = 0;
    for n in 1..=down {
        total += match (vulnerable, n) {
            (false, 1) => 100,
            (false, 2) | (false, 3) => 200,
            (false, _) => 300,
            (true, 1) => 200,
            (true, _) => 300,
        };
    }
    total
}

/// Duplicate score for a played-out contract.
pub fn calculate_score(
    contract: &Contract,
    tricks_taken: u8,
    vulnerability: Vulnerability,
) -> ScoreBreakdown {
    let vulnerable = vulnerability.is_vulnerable(contract.declarer);
    let needed = contract.tricks_needed() as i32;
    let taken = tricks_taken as i32;
    let made = taken >= needed;

    if !made {
        let penalty = undertrick_penalty(contract, needed - taken, vulnerable);
        return ScoreBreakdown {
            tricks_taken,
            made,
            trick_score: 0,
            overtrick_score: 0,
            game_bonus: 0,
            slam_bonus: 0,
            insult_bonus: 0,
            undertrick_penalty: penalty,
            honors_bonus: 0,
            total: -penalty,
        };
    }

    let value = trick_value(contract.strain);
    let nt_premium = if contract.strain == Strain::NoTrump { 10 } else { 0 };
    let trick_score = (value * contract.level as i32 + nt_premium) * contract.doubling.multiplier();

    let overtricks = taken - needed;
    let per_overtrick = match contract.doubling {
        Doubling::Undoubled => value,
        Doubling::Doubled => {
            if vulnerable {
                200
            } else {
                100
            }
        }
        Doubling::Redoubled => {
            if vulnerable {
                400
            } else {
                200
            }
        }
    };
    let overtrick_score = overtricks * per_overtrick;

    let game_bonus = if trick_score >= 100 {
        if vulnerable {
            500
        } else {
            300
        }
    } else {
        50
    };

    let slam_bonus = match contract.level {
        6 => {
            if vulnerable {
                750
            } else {
                500
            }
        }
        7 => {
            if vulnerable {
                1500
            } else {
                1000
            }
        }
        _ => 0,
    };

    let insult_bonus = match contract.doubling {
        Doubling::Undoubled => 0,
        Doubling::Doubled => 50,
        Doubling::Redoubled => 100,
    };

    let total = trick_score + overtrick_score + game_bonus + slam_bonus + insult_bonus;
    ScoreBreakdown {
        tricks_taken,
        made,
        trick_score,
        overtrick_score,
        game_bonus,
        slam_bonus,
        insult_bonus,
        undertrick_penalty: 0,
        honors_bonus: 0,
        total,
    }
}

/// As `calculate_score`, plus the optional honors bonus computed from the
/// original dealt hands (indexed by `Seat::idx`).
pub fn calculate_score_with_honors(
    contract: &Contract,
    tricks_taken: u8,
    vulnerability: Vulnerability,
    hands: &[Hand; 4],
) -> ScoreBreakdown {
    let mut breakdown = calculate_score(contract, tricks_taken, vulnerability);
    let honors = honors_bonus(contract, hands);
    breakdown.honors_bonus = honors;
    breakdown.total += honors;
    breakdown
}

/// 4 of the 5 trump honors in one hand scores 100, all 5 scores 150;
/// all four aces in one hand under no-trump scores 150.
pub fn honors_bonus(contract: &Contract, hands: &[Hand; 4]) -> i32 {
    match contract.trump() {
        Some(trump) => {
            const TRUMP_HONORS: [Rank; 5] =
                [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten];
            for seat in Seat::ALL {
                let held = TRUMP_HONORS
                    .iter()
                    .filter(|&&r| hands[seat.idx()].holds(r, trump))
                    .count();
                match held {
                    5 => return 150,
                    4 => return 100,
                    _ => {}
                }
            }
            0
        }
        None => {
            for seat in Seat::ALL {
                let hand = &hands[seat.idx()];
                let aces = hand.cards().iter().filter(|c| c.rank == Rank::Ace).count();
                if aces == 4 {
                    return 150;
                }
            }
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_game_made_exactly() {
        // 4S making, not vulnerable: 120 + 300 = 420.
        let contract = Contract::new(4, Strain::Spades, Seat::South);
        let score = calculate_score(&contract, 10, Vulnerability::None);
        assert_eq!(score.trick_score, 120);
        assert_eq!(score.game_bonus, 300);
        assert_eq!(score.total, 420);
    }

    #[test]
    fn test_part_score() {
        // 2D making with an overtrick: 40 + 20 + 50 = 110.
        let contract = Contract::new(2, Strain::Diamonds, Seat::North);
        let score = calculate_score(&contract, 9, Vulnerability::Both);
        assert_eq!(score.trick_score, 40);
        assert_eq!(score.overtrick_score, 20);
        assert_eq!(score.game_bonus, 50);
        assert_eq!(score.total, 110);
    }

    #[test]
    fn test_notrump_first_trick_premium() {
        // 1N making, not vulnerable: 40 + 50 = 90.
        let contract = Contract::new(1, Strain::NoTrump, Seat::East);
        let score = calculate_score(&contract, 7, Vulnerability::None);
        assert_eq!(score.trick_score, 40);
        assert_eq!(score.total, 90);
    }

    #[test]
    fn test_doubled_down_two_vulnerable() {
        // 3NX down 2 vulnerable: -(200 + 300) = -500.
        let contract =
            Contract::new(3, Strain::NoTrump, Seat::South).doubled(Doubling::Doubled);
        let score = calculate_score(&contract, 7, Vulnerability::Both);
        assert!(!score.made);
        assert_eq!(score.undertrick_penalty, 500);
        assert_eq!(score.total, -500);
    }

    #[test]
    fn test_grand_slam_doubled_vulnerable() {
        // 7NX= vulnerable: 440 + 500 + 1500 + 50 = 2490.
        let contract =
            Contract::new(7, Strain::NoTrump, Seat::West).doubled(Doubling::Doubled);
        let score = calculate_score(&contract, 13, Vulnerability::Both);
        assert_eq!(score.trick_score, 440);
        assert_eq!(score.game_bonus, 500);
        assert_eq!(score.slam_bonus, 1500);
        assert_eq!(score.insult_bonus, 50);
        assert_eq!(score.total, 2490);
    }

    #[test]
    fn test_doubled_undertrick_ladder() {
        let contract = Contract::new(4, Strain::Hearts, Seat::North).doubled(Doubling::Doubled);
        // Not vulnerable: 100, 300, 500, 800, 1100.
        for (down, expected) in [(1, 100), (2, 300), (3, 500), (4, 800), (5, 1100)] {
            let taken = contract.tricks_needed() - down;
            let score = calculate_score(&contract, taken, Vulnerability::None);
            assert_eq!(score.total, -expected, "down {down}");
        }
        // Vulnerable: 200, 500, 800.
        for (down, expected) in [(1, 200), (2, 500), (3, 800)] {
            let taken = contract.tricks_needed() - down;
            let score = calculate_score(&contract, taken, Vulnerability::Both);
            assert_eq!(score.total, -expected, "down {down} vul");
        }
    }

    #[test]
    fn test_redoubled_penalties_double_the_doubled_ladder() {
        let contract =
            Contract::new(3, Strain::NoTrump, Seat::East).doubled(Doubling::Redoubled);
        let score = calculate_score(&contract, 7, Vulnerability::None);
        assert_eq!(score.total, -600); // 2 * (100 + 200)
    }

    #[test]
    fn test_redoubled_overtricks() {
        // 2SXX making 9 tricks, vulnerable: 240 + 400 + 500 + 100 = 1240.
        let contract =
            Contract::new(2, Strain::Spades, Seat::South).doubled(Doubling::Redoubled);
        let score = calculate_score(&contract, 9, Vulnerability::Both);
        assert_eq!(score.trick_score, 240);
        assert_eq!(score.overtrick_score, 400);
        assert_eq!(score.game_bonus, 500);
        assert_eq!(score.insult_bonus, 100);
        assert_eq!(score.total, 1240);
    }

    #[test]
    fn test_small_slam_bonus() {
        // 6C= not vulnerable: 120 + 300 + 500 = 920.
        let contract = Contract::new(6, Strain::Clubs, Seat::North);
        let score = calculate_score(&contract, 12, Vulnerability::None);
        assert_eq!(score.total, 920);
    }

    #[test]
    fn test_trump_honors_bonus() {
        let contract = Contract::new(4, Strain::Spades, Seat::South);
        let hands = [
            Hand::parse("AKQJT.234.567.89"),
            Hand::parse("987.AKQ.432.234"),
            Hand::parse("65432.JT9.98.765"),
            Hand::parse(".8765.AKQJT.AKQJ"),
        ];
        assert_eq!(honors_bonus(&contract, &hands), 150);

        let contract_nt = Contract::new(3, Strain::NoTrump, Seat::South);
        assert_eq!(honors_bonus(&contract_nt, &hands), 0);
    }

    #[test]
    fn test_four_trump_honors() {
        let contract = Contract::new(4, Strain::Hearts, Seat::South);
        let hands = [
            Hand::parse(".AKQJ.."),
            Hand::parse(".T932.."),
            Hand::parse("..."),
            Hand::parse("..."),
        ];
        assert_eq!(honors_bonus(&contract, &hands), 100);
    }

    #[test]
    fn test_four_aces_in_notrump() {
        let contract = Contract::new(3, Strain::NoTrump, Seat::South);
        let hands = [
            Hand::parse("A.A.A.A"),
            Hand::parse("K.K.K.K"),
            Hand::parse("Q.Q.Q.Q"),
            Hand::parse("J.J.J.J"),
        ];
        assert_eq!(honors_bonus(&contract, &hands), 150);
        let with_honors =
            calculate_score_with_honors(&contract, 9, Vulnerability::None, &hands);
        assert_eq!(with_honors.honors_bonus, 150);
        assert_eq!(with_honors.total, 400 + 150);
    }
}
