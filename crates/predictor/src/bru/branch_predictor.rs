//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. The trace driver asks for a prediction before the
//! branch resolves and reports the real outcome afterwards.

use crate::common::Outcome;

/// Trait for branch direction prediction algorithms.
///
/// Implementations are deterministic state machines: the same sequence of
/// `predict_branch` / `update_branch` calls always yields the same
/// predictions and the same final tables.
pub trait BranchPredictor {
    /// Short strategy name used in reports ("Static", "Gshare", ...).
    fn name(&self) -> &'static str;

    /// Predicts whether the conditional branch at `pc` will be taken.
    ///
    /// Reads state only; the prediction reflects every update applied so far.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    fn predict_branch(&self, pc: u32) -> Outcome;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// Called exactly once per conditional branch, after `predict_branch`
    /// and before the next branch is predicted.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `outcome` - Whether the branch was actually taken
    fn update_branch(&mut self, pc: u32, outcome: Outcome);

    /// Restores every table and history register to its initial state.
    fn reset(&mut self);
}
