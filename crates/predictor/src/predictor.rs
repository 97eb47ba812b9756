//! Trace-driver facade.
//!
//! The external trace driver talks to the predictors through three calls:
//! 1. **Initialization:** [`Predictor::init_predictor`] validates the configuration
//!    and allocates the tables of the selected strategy.
//! 2. **Prediction:** [`Predictor::make_prediction`] guesses a branch direction
//!    from the current state.
//! 3. **Training:** [`Predictor::train_predictor`] reports the resolved branch.
//!
//! Each `Predictor` owns all of its state, so several instances can replay the
//! same trace side by side for comparison.

use tracing::{debug, trace, warn};

use crate::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::common::{BranchEvent, ConfigError, Outcome};
use crate::config::{BranchPredictor as BpType, Config};

/// A configured branch direction predictor.
#[derive(Clone, Debug)]
pub struct Predictor {
    /// Selected engine; fixed for the lifetime of the predictor.
    bp: BranchPredictorWrapper,
    /// Log every prediction and training event at trace level.
    verbose: bool,
}

impl Predictor {
    /// Validates `config` and allocates neutral tables for the selected strategy.
    ///
    /// Counters start weakly not-taken, perceptron weights at zero and every
    /// history register cleared.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected strategy's section is out of range.
    pub fn init_predictor(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let bp = BranchPredictorWrapper::new(config);
        debug!(predictor = bp.name(), "branch predictor initialized");
        Ok(Self {
            bp,
            verbose: config.verbose,
        })
    }

    /// Builds a predictor from the driver's integer strategy tag.
    ///
    /// The tag overrides `config.branch_predictor`. An unknown tag is not an
    /// error: it yields a predictor that always answers not-taken and ignores
    /// training.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the tag is known and its section is out of range.
    pub fn from_raw_type(tag: u32, config: &Config) -> Result<Self, ConfigError> {
        match BpType::from_raw(tag) {
            Some(branch_predictor) => Self::init_predictor(&Config {
                branch_predictor,
                ..config.clone()
            }),
            None => {
                warn!(tag, "unrecognized branch predictor type, predicting not-taken");
                Ok(Self {
                    bp: BranchPredictorWrapper::Unrecognized(tag),
                    verbose: config.verbose,
                })
            }
        }
    }

    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// `target` and `is_direct` are accepted for interface uniformity with
    /// target predictors; direction prediction depends on `pc` only.
    pub fn make_prediction(&self, pc: u32, target: u32, is_direct: bool) -> Outcome {
        let prediction = self.bp.predict_branch(pc);
        if self.verbose {
            trace!(
                pc,
                branch_target = target,
                is_direct,
                %prediction,
                "predict"
            );
        }
        prediction
    }

    /// Trains the predictor with a resolved branch.
    ///
    /// Only conditional branches reach the tables; calls, returns and other
    /// unconditional transfers are ignored.
    pub fn train_predictor(&mut self, event: &BranchEvent) {
        if !event.is_conditional {
            return;
        }
        if self.verbose {
            trace!(
                pc = event.pc,
                outcome = %event.outcome,
                "train"
            );
        }
        self.bp.update_branch(event.pc, event.outcome);
    }

    /// Restores every table and history register to the initial state.
    pub fn reset(&mut self) {
        debug!(predictor = self.bp.name(), "branch predictor reset");
        self.bp.reset();
    }

    /// Tears the predictor down, releasing its tables.
    pub fn cleanup(self) {
        debug!(predictor = self.bp.name(), "branch predictor released");
    }

    /// Name of the selected strategy.
    pub fn name(&self) -> &'static str {
        self.bp.name()
    }

    /// The selected engine, for inspection of its tables.
    pub const fn engine(&self) -> &BranchPredictorWrapper {
        &self.bp
    }
}
