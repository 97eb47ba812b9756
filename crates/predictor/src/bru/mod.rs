//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors: static, gshare, tournament
//! and the custom tournament/perceptron hybrid, together with the shared
//! saturating-counter primitive they are built from.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// 2-bit saturating counters and counter tables.
pub mod counter;

/// Tournament + perceptron hybrid with an address-gated blend.
pub mod custom;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Perceptron sub-predictor used by the custom hybrid.
pub mod perceptron;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use self::{
    custom::CustomPredictor, gshare::GSharePredictor, static_bp::StaticPredictor,
    tournament::TournamentPredictor,
};
use crate::common::Outcome;
use crate::config::{BranchPredictor as BpType, Config};

/// Enum wrapper for static dispatch of Branch Predictors.
///
/// The variant is fixed when the wrapper is built. Only the selected
/// predictor's tables are allocated.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always-taken predictor.
    Static(StaticPredictor),
    /// Gshare predictor.
    GShare(GSharePredictor),
    /// Tournament predictor.
    Tournament(TournamentPredictor),
    /// Custom hybrid predictor.
    Custom(CustomPredictor),
    /// Placeholder for a strategy tag the driver does not know.
    ///
    /// Predicts not-taken and never trains.
    Unrecognized(u32),
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    ///
    /// The configuration is expected to be validated already.
    pub fn new(config: &Config) -> Self {
        match config.branch_predictor {
            BpType::Static => Self::Static(StaticPredictor::new()),
            BpType::Gshare => Self::GShare(GSharePredictor::new(&config.gshare)),
            BpType::Tournament => Self::Tournament(TournamentPredictor::new(&config.tournament)),
            BpType::Custom => Self::Custom(CustomPredictor::new(&config.custom)),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::GShare(bp) => bp.name(),
            Self::Tournament(bp) => bp.name(),
            Self::Custom(bp) => bp.name(),
            Self::Unrecognized(_) => "Unrecognized",
        }
    }

    /// Predicts whether a branch at the given PC will be taken.
    #[inline(always)]
    fn predict_branch(&self, pc: u32) -> Outcome {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
            Self::Tournament(bp) => bp.predict_branch(pc),
            Self::Custom(bp) => bp.predict_branch(pc),
            Self::Unrecognized(_) => Outcome::NotTaken,
        }
    }

    /// Updates the branch predictor with the actual outcome of a branch.
    #[inline(always)]
    fn update_branch(&mut self, pc: u32, outcome: Outcome) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, outcome),
            Self::GShare(bp) => bp.update_branch(pc, outcome),
            Self::Tournament(bp) => bp.update_branch(pc, outcome),
            Self::Custom(bp) => bp.update_branch(pc, outcome),
            Self::Unrecognized(_) => {}
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(bp) => bp.reset(),
            Self::GShare(bp) => bp.reset(),
            Self::Tournament(bp) => bp.reset(),
            Self::Custom(bp) => bp.reset(),
            Self::Unrecognized(_) => {}
        }
    }
}
