//! Custom Hybrid Branch Predictor.
//!
//! Extends the tournament predictor with a perceptron. While the global and
//! local components agree, the tournament answer stands. When they disagree,
//! an address gate decides: branches whose low PC byte is above the gate
//! blend all three signals, the others fall back to the selector.
//!
//! The blend is `(global + local + (perceptron >> 2)) / 2` with all three
//! predictions as 0/1, an arithmetic shift and integer division truncating
//! toward zero. The branch is predicted taken if the blend is non-negative,
//! which holds for every 0/1 input: a gated disagreement always predicts taken.

use tracing::trace;

use super::BranchPredictor;
use super::perceptron::PerceptronTable;
use super::tournament::TournamentPredictor;
use crate::common::Outcome;
use crate::config::CustomConfig;

/// Custom Hybrid Predictor structure.
#[derive(Clone, Debug)]
pub struct CustomPredictor {
    /// Global, local and selector tables at the custom widths.
    tournament: TournamentPredictor,
    /// Perceptron rows and their narrow history register.
    perceptron: PerceptronTable,
    /// Low PC byte above which disagreeing components are blended.
    gate_threshold: u32,
}

impl CustomPredictor {
    /// Creates a new Custom Hybrid Predictor based on configuration.
    pub fn new(config: &CustomConfig) -> Self {
        Self {
            tournament: TournamentPredictor::from_custom(config),
            perceptron: PerceptronTable::new(config),
            gate_threshold: config.gate_threshold,
        }
    }

    /// Whether the branch at `pc` is past the address gate.
    #[inline(always)]
    pub const fn gated(&self, pc: u32) -> bool {
        (pc & 0xFF) > self.gate_threshold
    }

    /// Blends the three component predictions.
    #[inline]
    pub fn blend(global: Outcome, local: Outcome, perceptron: Outcome) -> i32 {
        let vote = |outcome: Outcome| i32::from(outcome.is_taken());
        (vote(global) + vote(local) + (vote(perceptron) >> 2)) / 2
    }

    /// The tournament component.
    pub const fn tournament(&self) -> &TournamentPredictor {
        &self.tournament
    }

    /// The perceptron component.
    pub const fn perceptron(&self) -> &PerceptronTable {
        &self.perceptron
    }
}

impl BranchPredictor for CustomPredictor {
    fn name(&self) -> &'static str {
        "Custom"
    }

    fn predict_branch(&self, pc: u32) -> Outcome {
        let (global, local) = self.tournament.components(pc);

        if global == local || !self.gated(pc) {
            return self.tournament.choose(pc, global, local);
        }

        let perceptron = self.perceptron.predict(pc);
        let blend = Self::blend(global, local, perceptron);
        trace!(pc, %global, %local, %perceptron, blend, "custom blend");
        Outcome::from(blend >= 0)
    }

    /// Trains the perceptron first, then runs the tournament update sequence.
    fn update_branch(&mut self, pc: u32, outcome: Outcome) {
        self.perceptron.train(pc, outcome);
        self.tournament.update_branch(pc, outcome);
    }

    fn reset(&mut self) {
        self.tournament.reset();
        self.perceptron.reset();
    }
}
