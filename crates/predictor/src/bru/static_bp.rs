//! Static Branch Predictor.
//!
//! Implements a simple "Always Taken" prediction policy for conditional branches.
//! It keeps no tables and ignores both history and training.

use super::BranchPredictor;
use crate::common::Outcome;

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        "Static"
    }

    /// Always predicts conditional branches as taken.
    fn predict_branch(&self, _pc: u32) -> Outcome {
        Outcome::Taken
    }

    fn update_branch(&mut self, _pc: u32, _outcome: Outcome) {}

    fn reset(&mut self) {}
}
