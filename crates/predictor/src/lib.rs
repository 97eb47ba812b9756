//! Branch direction predictor library for trace-driven CPU simulation.
//!
//! This crate implements pluggable conditional branch predictors with the following:
//! 1. **Predictors:** Static (always taken), gshare, tournament and a tournament/perceptron hybrid.
//! 2. **Primitives:** 2-bit saturating counters, history registers and perceptron rows.
//! 3. **Facade:** A single [`Predictor`] type exposing the driver's init/predict/train calls.
//! 4. **Configuration:** JSON-loadable, validated table geometry per strategy.
//!
//! A predictor is a deterministic, single-threaded state machine consumed one
//! branch event at a time:
//!
//! ```
//! use bpsim_core::{BranchEvent, Config, Outcome, Predictor};
//! use bpsim_core::config::BranchPredictor;
//!
//! let mut bp = Predictor::init_predictor(&Config::with_predictor(BranchPredictor::Gshare)).unwrap();
//! let guess = bp.make_prediction(0x4000, 0x4010, true);
//! assert_eq!(guess, Outcome::NotTaken);
//! bp.train_predictor(&BranchEvent::conditional(0x4000, 0x4010, Outcome::Taken));
//! ```

/// Common types (outcomes, branch events, errors).
pub mod common;
/// Predictor configuration (defaults, strategy enum, per-strategy sections).
pub mod config;
/// Branch prediction unit: counters, engines and enum dispatch.
pub mod bru;
/// Trace-driver facade over the selected engine.
pub mod predictor;

/// Outcome and event types exchanged with the trace driver.
pub use crate::common::{BranchEvent, ConfigError, Outcome};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main predictor type; construct with `Predictor::init_predictor`.
pub use crate::predictor::Predictor;
