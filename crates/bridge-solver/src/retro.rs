use crate::{Deal, DoubleDummySolver, SolveError, SolveRequest, TrickTable};
use bridge_core::{Hand, Card, Seat, Side, Strain, Suit, Trick};

/// Exhaustive backward-induction solver: alpha-beta over every remaining
/// card. Exact on any position it finishes; the node budget turns
/// intractable positions into an explicit `SolveError` instead of an
/// unbounded search.
#[derive(Debug, Clone)]
pub struct RetroSolver {
    node_budget: u64,
}

impl Default for RetroSolver {
    fn default() -> Self {
        Self {
            node_budget: 20_000_000,
        }
    }
}

impl RetroSolver {
    pub fn with_budget(node_budget: u64) -> Self {
        Self { node_budget }
    }

    /// Checks the position is reachable in a real deal and returns the
    /// number of tricks left to play, counting the open trick.
    fn validate(&self, request: &SolveRequest) -> Result<u8, SolveError> {
        let plays = &request.trick_so_far;
        if plays.len() > 3 {
            return Err(SolveError::Malformed(format!(
                "open trick has {} cards",
                plays.len()
            )));
        }
        if let Some((leader, _)) = plays.first() {
            let mut seat = *leader;
            for (played_seat, _) in plays {
                if *played_seat != seat {
                    return Err(SolveError::Malformed(
                        "open trick plays are not clockwise".into(),
                    ));
                }
                seat = seat.next();
            }
            if seat != request.next_to_play {
                return Err(SolveError::Malformed(
                    "next_to_play does not continue the open trick".into(),
                ));
            }
        }

        let base = request.hands[request.next_to_play.idx()].len();
        for seat in Seat::ALL {
            let has_played = plays.iter().any(|(s, _)| *s == seat);
            let expected = if has_played {
                base.checked_sub(1).ok_or_else(|| {
                    SolveError::Malformed("seat played a card but holds none".into())
                })?
            } else {
                base
            };
            if request.hands[seat.idx()].len() != expected {
                return Err(SolveError::Malformed(format!(
                    "{} holds {} cards, expected {}",
                    seat,
                    request.hands[seat.idx()].len(),
                    expected
                )));
            }
        }
        for (_, card) in plays {
            if request.hands.iter().any(|h| h.contains(*card)) {
                return Err(SolveError::Malformed(format!(
                    "{card} is both played and still held"
                )));
            }
        }
        Ok(base as u8)
    }

    fn search(
        &self,
        hands: &mut [Hand; 4],
        trick: &mut Trick,
        trump: Option<Suit>,
        nodes: &mut u64,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, SolveError> {
        *nodes += 1;
        if *nodes > self.node_budget {
            return Err(SolveError::BudgetExceeded(self.node_budget));
        }

        let seat = trick.next_seat();
        let legal = legal_moves(&hands[seat.idx()], trick);
        let maximizing = seat.side() == Side::NS;
        let mut best: Option<i32> = None;

        for card in legal {
            hands[seat.idx()].remove(card);
            trick
                .push(seat, card)
                .map_err(|e| SolveError::Malformed(e.to_string()))?;

            let value = if trick.is_complete() {
                let winner = trick
                    .winner(trump)
                    .map_err(|e| SolveError::Malformed(e.to_string()))?;
                let won = i32::from(winner.side() == Side::NS);
                if hands.iter().all(Hand::is_empty) {
                    won
                } else {
                    let mut next = Trick::new(winner);
                    won + self.search(hands, &mut next, trump, nodes, alpha - won, beta - won)?
                }
            } else {
                self.search(hands, trick, trump, nodes, alpha, beta)?
            };

            trick.pop();
            hands[seat.idx()].add(card);

            let better = match best {
                None => true,
                Some(b) => {
                    if maximizing {
                        value > b
                    } else {
                        value < b
                    }
                }
            };
            if better {
                best = Some(value);
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        best.ok_or_else(|| SolveError::Malformed(format!("{seat} has no card to play")))
    }
}

/// Follow the led suit when possible, high cards first (better cutoffs).
fn legal_moves(hand: &Hand, trick: &Trick) -> Vec<Card> {
    if let Some(led) = trick.led_suit() {
        let follows = hand.cards_in(led);
        if !follows.is_empty() {
            return follows;
        }
    }
    let mut cards = hand.cards().to_vec();
    cards.sort_by(|a, b| (b.suit, b.rank).cmp(&(a.suit, a.rank)));
    cards
}

impl DoubleDummySolver for RetroSolver {
    fn solve_position(&self, request: &SolveRequest) -> Result<u8, SolveError> {
        let remaining = self.validate(request)?;
        if remaining == 0 {
            return Ok(0);
        }
        let mut hands = request.hands.clone();
        let leader = request
            .trick_so_far
            .first()
            .map(|(seat, _)| *seat)
            .unwrap_or(request.next_to_play);
        let mut trick = Trick::new(leader);
        for (seat, card) in &request.trick_so_far {
            trick
                .push(*seat, *card)
                .map_err(|e| SolveError::Malformed(e.to_string()))?;
        }
        let mut nodes = 0;
        let tricks = self.search(
            &mut hands,
            &mut trick,
            request.trump,
            &mut nodes,
            0,
            i32::from(remaining),
        )?;
        Ok(tricks as u8)
    }

    fn solve_deal(&self, deal: &Deal) -> Result<TrickTable, SolveError> {
        let n = deal.hands[0].len();
        if deal.hands.iter().any(|h| h.len() != n) {
            return Err(SolveError::Malformed("hands are not the same size".into()));
        }
        let mut table = TrickTable::default();
        for strain in Strain::ALL {
            for declarer in Seat::ALL {
                let request = SolveRequest {
                    hands: deal.hands.clone(),
                    trump: strain.to_suit(),
                    next_to_play: declarer.lho(),
                    trick_so_far: Vec::new(),
                };
                let ns = i32::from(self.solve_position(&request)?);
                let tricks = if declarer.side() == Side::NS {
                    ns
                } else {
                    n as i32 - ns
                };
                table.set(declarer, strain, tricks as u8);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hands: [&str; 4], trump: Option<Suit>, next: Seat) -> SolveRequest {
        SolveRequest {
            hands: hands.map(Hand::parse),
            trump,
            next_to_play: next,
            trick_so_far: Vec::new(),
        }
    }

    #[test]
    fn test_running_suit_takes_all() {
        // North cashes the top spades; nobody can ruff at no-trump.
        let req = request(["AK...", "54...", "32...", ".32.."], None, Seat::North);
        let solver = RetroSolver::default();
        assert_eq!(solver.solve_position(&req).unwrap(), 2);
    }

    #[test]
    fn test_defense_ruffs_when_best() {
        // Hearts are trump and East is void in spades: ruffing both of
        // North's winners holds NS to zero.
        let req = request(
            ["AK...", ".2..2", "32...", "..32."],
            Some(Suit::Hearts),
            Seat::North,
        );
        let solver = RetroSolver::default();
        assert_eq!(solver.solve_position(&req).unwrap(), 0);
    }

    #[test]
    fn test_mid_trick_position() {
        // One-card ending: West has led the club king into North's ace.
        let mut req = request(["...A", "...5", "...2", "..."], None, Seat::North);
        req.trick_so_far = vec![(Seat::West, "CK".parse().unwrap())];
        let solver = RetroSolver::default();
        assert_eq!(solver.solve_position(&req).unwrap(), 1);
    }

    #[test]
    fn test_inconsistent_open_trick_rejected() {
        let mut req = request(["...A", "...5", "...2", "..."], None, Seat::North);
        // West on the table and still holding a card is impossible.
        req.trick_so_far = vec![(Seat::West, "CK".parse().unwrap())];
        req.hands[Seat::West.idx()] = Hand::parse("...3");
        let solver = RetroSolver::default();
        assert!(matches!(
            solver.solve_position(&req),
            Err(SolveError::Malformed(_))
        ));
    }

    #[test]
    fn test_budget_exhaustion_is_an_error() {
        let req = request(
            [
                "AKQJ.T98.765.432",
                "T98.765.432.AKQJ",
                "765.432.AKQJ.T98",
                "432.AKQJ.T98.765",
            ],
            None,
            Seat::West,
        );
        let solver = RetroSolver::with_budget(50);
        assert_eq!(
            solver.solve_position(&req),
            Err(SolveError::BudgetExceeded(50))
        );
    }

    #[test]
    fn test_unbalanced_hands_rejected() {
        let req = request(["AK...", "5...", "32...", ".32.."], None, Seat::North);
        let solver = RetroSolver::default();
        assert!(matches!(
            solver.solve_position(&req),
            Err(SolveError::Malformed(_))
        ));
    }

    #[test]
    fn test_solve_deal_table() {
        // Two-card deal: North-South own spades, East-West own hearts.
        let deal = Deal::new(
            [
                Hand::parse("AK..."),
                Hand::parse(".AK.."),
                Hand::parse("QJ..."),
                Hand::parse(".QJ.."),
            ],
            Seat::North,
        );
        let solver = RetroSolver::default();
        let table = solver.solve_deal(&deal).unwrap();
        // With spades trump, North ruffs the forced heart lead and runs
        // trumps; hearts trump is the mirror image for East.
        assert_eq!(table.get(Seat::North, Strain::Spades), 2);
        assert_eq!(table.get(Seat::East, Strain::Hearts), 2);
    }
}
