//! Common types shared by the predictors and the trace-driver facade.
//!
//! This module provides the small vocabulary every component speaks:
//! 1. **Branch Types:** Branch outcomes and resolved branch events.
//! 2. **Error Handling:** Configuration errors and the limits they enforce.

/// Branch outcome and branch event definitions.
pub mod branch;

/// Configuration error types.
pub mod error;

pub use branch::{BranchEvent, Outcome};
pub use error::{ConfigError, MAX_PERCEPTRON_HISTORY, MAX_TABLE_BITS};
