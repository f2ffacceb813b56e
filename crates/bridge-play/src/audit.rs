use std::collections::HashMap;

use bridge_core::{Card, Seat};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::signal::{PlayContext, SignalHeuristic};

/// One logged choice among tactically equivalent cards. The optional
/// fields tolerate logs from sessions whose solver was unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub seat: Seat,
    pub context: PlayContext,
    pub equivalence_set: Vec<Card>,
    pub chosen: Card,
    #[serde(default)]
    pub recommended: Option<Card>,
    #[serde(default)]
    pub heuristic: Option<SignalHeuristic>,
    pub compliant: bool,
}

impl SignalDecision {
    /// A decision carries signal information only when a convention was
    /// identified and there was a genuine choice to make.
    pub fn is_signal_relevant(&self) -> bool {
        self.heuristic.is_some() && self.equivalence_set.len() > 1
    }
}

/// Banded judgement of how readable a player's carding was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Expert,
    Competent,
    Inconsistent,
    Chaotic,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Expert => "expert",
            Confidence::Competent => "competent",
            Confidence::Inconsistent => "inconsistent",
            Confidence::Chaotic => "chaotic",
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Confidence::Expert
        } else if score >= 70.0 {
            Confidence::Competent
        } else if score >= 50.0 {
            Confidence::Inconsistent
        } else {
            Confidence::Chaotic
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCount {
    pub heuristic: SignalHeuristic,
    pub count: u32,
}

/// The auditor's verdict over one deal's worth of decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalIntegrityReport {
    pub score: f64,
    pub confidence: Confidence,
    pub total_signals: u32,
    pub compliant_signals: u32,
    /// Most-violated conventions first.
    pub violations: Vec<ViolationCount>,
    pub recommendations: Vec<String>,
    pub details: Vec<SignalDecision>,
}

static HEURISTIC_TIPS: Lazy<HashMap<SignalHeuristic, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            SignalHeuristic::TopOfSequence,
            "Lead the top card from touching honors so partner can read the sequence below it.",
        ),
        (
            SignalHeuristic::AvoidTrumpLead,
            "Prefer a side-suit lead when an equivalent card exists outside trumps.",
        ),
        (
            SignalHeuristic::LowestEquivalent,
            "Without a sequence, lead the lowest of equivalent cards to conserve intermediates.",
        ),
        (
            SignalHeuristic::SecondHandLow,
            "In second seat, play the cheapest equivalent and keep honors over declarer.",
        ),
        (
            SignalHeuristic::BottomOfSequence,
            "Follow with the bottom of touching cards; winning with the lower card shows the higher.",
        ),
        (
            SignalHeuristic::ConserveHonors,
            "When partner already holds the trick, contribute the cheapest card.",
        ),
        (
            SignalHeuristic::ThirdHandHigh,
            "In third seat with the trick undecided, put up the strongest equivalent.",
        ),
        (
            SignalHeuristic::CheapestWinner,
            "Win the trick in fourth seat with the cheapest card that takes it.",
        ),
        (
            SignalHeuristic::FourthHandLow,
            "Unable to win in fourth seat, throw the cheapest equivalent.",
        ),
        (
            SignalHeuristic::AttitudeEncourage,
            "Make the first discard a high spot in a suit worth leading to you.",
        ),
        (
            SignalHeuristic::AttitudeDiscourage,
            "With nothing to show on the first discard, throw the lowest safe card.",
        ),
        (
            SignalHeuristic::DiscardLow,
            "Keep later discards low and away from suits you need to guard.",
        ),
    ])
});

/// Grades a deal's carding against the conventional picks. Stateless: the
/// report is a pure function of the decision log.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalIntegrityAuditor;

impl SignalIntegrityAuditor {
    pub fn audit(&self, decisions: &[SignalDecision]) -> SignalIntegrityReport {
        let relevant: Vec<&SignalDecision> = decisions
            .iter()
            .filter(|d| d.is_signal_relevant())
            .collect();
        let total = relevant.len() as u32;
        let compliant = relevant.iter().filter(|d| d.compliant).count() as u32;
        let score = if total == 0 {
            100.0
        } else {
            100.0 * f64::from(compliant) / f64::from(total)
        };

        let mut by_heuristic: HashMap<SignalHeuristic, u32> = HashMap::new();
        for decision in &relevant {
            if !decision.compliant {
                if let Some(heuristic) = decision.heuristic {
                    *by_heuristic.entry(heuristic).or_insert(0) += 1;
                }
            }
        }
        let mut violations: Vec<ViolationCount> = by_heuristic
            .into_iter()
            .map(|(heuristic, count)| ViolationCount { heuristic, count })
            .collect();
        violations.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.heuristic.as_str().cmp(b.heuristic.as_str()))
        });

        let mut recommendations: Vec<String> = violations
            .iter()
            .take(3)
            .filter_map(|v| HEURISTIC_TIPS.get(&v.heuristic).map(|tip| (*tip).to_string()))
            .collect();
        recommendations.push(overall_remark(score).to_string());

        tracing::info!(
            score,
            total_signals = total,
            compliant_signals = compliant,
            "signal integrity audit complete"
        );

        SignalIntegrityReport {
            score,
            confidence: Confidence::from_score(score),
            total_signals: total,
            compliant_signals: compliant,
            violations,
            recommendations,
            details: decisions.to_vec(),
        }
    }
}

fn overall_remark(score: f64) -> &'static str {
    match Confidence::from_score(score) {
        Confidence::Expert => "Carding is consistently readable; partner can trust every spot card.",
        Confidence::Competent => "Carding is mostly readable; tighten up the flagged conventions.",
        Confidence::Inconsistent => {
            "Carding sends mixed messages; partner cannot rely on spot cards yet."
        }
        Confidence::Chaotic => {
            "Carding is effectively random; start by fixing one convention at a time."
        }
    }
}
