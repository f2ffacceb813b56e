use bridge_core::{Card, Contract, Hand, PlayError, PlayState, Seat};
use bridge_solver::DoubleDummySolver;

use crate::audit::SignalDecision;
use crate::player::{solved_declarer_tricks, CardPlayer};
use crate::signal::{PlayContext, SignalContext, TacticalSignalFilter};

/// Drives one deal from opening lead to the last trick, keeping a log of
/// every choice made among tactically equivalent cards. The log feeds the
/// signal integrity auditor after the deal.
pub struct DealSession<S: DoubleDummySolver> {
    state: PlayState,
    solver: S,
    filter: TacticalSignalFilter,
    log: Vec<SignalDecision>,
    has_discarded: [bool; 4],
}

impl<S: DoubleDummySolver> DealSession<S> {
    pub fn new(contract: Contract, hands: [Hand; 4], solver: S) -> Self {
        Self {
            state: PlayState::new(contract, hands),
            solver,
            filter: TacticalSignalFilter,
            log: Vec::new(),
            has_discarded: [false; 4],
        }
    }

    pub fn state(&self) -> &PlayState {
        &self.state
    }

    pub fn decisions(&self) -> &[SignalDecision] {
        &self.log
    }

    pub fn into_decisions(self) -> Vec<SignalDecision> {
        self.log
    }

    /// Plays a caller-chosen card, recording how it compares with the
    /// conventional pick whenever a genuine choice existed, including a
    /// card played from outside the equivalence set. Illegal plays are
    /// rejected before any state or log mutation.
    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), PlayError> {
        self.state.is_legal_play(seat, card)?;
        let set = self.equivalence_set(seat);
        self.apply(seat, card, set)
    }

    /// Asks the player for a card, then lets the signal filter override it
    /// within its equivalence set so AI carding stays conventional.
    pub fn play_ai(&mut self, player: &mut dyn CardPlayer) -> Result<Card, PlayError> {
        let seat = self.state.next_to_play;
        let suggested = player.choose_card(&self.state, seat)?;
        let set = self.equivalence_set(seat);
        let card = if set.len() > 1 && set.contains(&suggested) {
            let context = self.classify_context(seat);
            let sig_ctx = SignalContext {
                context,
                trump: self.state.trump(),
                trick: &self.state.current_trick,
                hand: self.state.hand(seat),
                seat,
            };
            self.filter.select(&set, &sig_ctx)?.card
        } else {
            suggested
        };
        self.apply(seat, card, set)?;
        Ok(card)
    }

    fn apply(&mut self, seat: Seat, card: Card, set: Vec<Card>) -> Result<(), PlayError> {
        self.state.is_legal_play(seat, card)?;

        // A set with more than one member means a genuine choice existed,
        // so the play is graded even when the chosen card lies outside the
        // set entirely: ignoring the equivalence class is the violation the
        // auditor most needs to see.
        let decision = if set.len() > 1 {
            let context = self.classify_context(seat);
            let sig_ctx = SignalContext {
                context,
                trump: self.state.trump(),
                trick: &self.state.current_trick,
                hand: self.state.hand(seat),
                seat,
            };
            let choice = self.filter.select(&set, &sig_ctx)?;
            tracing::debug!(
                %seat,
                %card,
                recommended = %choice.card,
                heuristic = choice.heuristic.as_str(),
                "signal-relevant play"
            );
            Some(SignalDecision {
                seat,
                context,
                equivalence_set: set,
                chosen: card,
                recommended: Some(choice.card),
                heuristic: Some(choice.heuristic),
                compliant: card == choice.card,
            })
        } else {
            None
        };
        let discarding = match self.state.current_trick.led_suit() {
            Some(led) => !self.state.hand(seat).has_suit(led),
            None => false,
        };

        self.state.play_card(seat, card)?;
        if let Some(decision) = decision {
            self.log.push(decision);
        }
        if discarding {
            self.has_discarded[seat.idx()] = true;
        }
        Ok(())
    }

    /// Legal cards whose double-dummy outcome ties for best from the
    /// mover's side. Solver failure yields an empty set: the play still
    /// happens, it just goes unaudited.
    fn equivalence_set(&self, seat: Seat) -> Vec<Card> {
        let legal = self.state.legal_plays(seat);
        if legal.len() <= 1 {
            return legal;
        }
        let maximizing = seat.side() == self.state.contract.declaring_side();
        let mut scored = Vec::with_capacity(legal.len());
        for card in legal {
            let mut child = self.state.clone();
            if child.play_card(seat, card).is_err() {
                continue;
            }
            match solved_declarer_tricks(&self.solver, &child) {
                Ok(tricks) => scored.push((card, tricks)),
                Err(error) => {
                    tracing::warn!(%seat, %error, "solve failed, skipping signal audit");
                    return Vec::new();
                }
            }
        }
        let best = if maximizing {
            scored.iter().map(|&(_, t)| t).max()
        } else {
            scored.iter().map(|&(_, t)| t).min()
        };
        scored
            .into_iter()
            .filter(|&(_, tricks)| Some(tricks) == best)
            .map(|(card, _)| card)
            .collect()
    }

    fn classify_context(&self, seat: Seat) -> PlayContext {
        let trick = &self.state.current_trick;
        match trick.led_suit() {
            None => {
                if self.state.tricks_played() == 0 {
                    PlayContext::OpeningLead
                } else {
                    PlayContext::MidhandLead
                }
            }
            Some(led) => {
                if self.state.hand(seat).has_suit(led) {
                    match trick.len() {
                        1 => PlayContext::SecondHandFollow,
                        2 => PlayContext::ThirdHandFollow,
                        _ => PlayContext::FourthHandFollow,
                    }
                } else if self.has_discarded[seat.idx()] {
                    PlayContext::DiscardSubsequent
                } else {
                    PlayContext::DiscardFirst
                }
            }
        }
    }
}
