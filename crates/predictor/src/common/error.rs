//! Configuration error definitions.
//!
//! Predictions and training never fail; the only fallible surface of the crate
//! is building a predictor from a configuration. This module defines the errors
//! reported when a configuration is malformed or describes impossible tables.

use thiserror::Error;

/// Largest supported table index width in bits (256 Mi entries).
pub const MAX_TABLE_BITS: usize = 28;

/// Largest supported perceptron history length.
///
/// The perceptron history register is a `u64` and must keep one spare bit for
/// the shift-in.
pub const MAX_PERCEPTRON_HISTORY: usize = 63;

/// Errors raised while loading or validating a predictor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A table width is zero or too large to allocate.
    #[error("{field} must be in 1..={max}, got {bits}", max = MAX_TABLE_BITS)]
    TableBits {
        /// Dotted path of the offending field (e.g. `tournament.chooser_bits`).
        field: &'static str,
        /// The rejected width.
        bits: usize,
    },

    /// The perceptron history length cannot be held in the history register.
    #[error("custom.history_length must be in 1..={max}, got {0}", max = MAX_PERCEPTRON_HISTORY)]
    PerceptronHistory(usize),

    /// The perceptron table has no rows.
    #[error("custom.num_perceptrons must be at least 1")]
    NoPerceptrons,

    /// An explicit perceptron training threshold is negative.
    #[error("custom.threshold must be non-negative, got {0}")]
    NegativeThreshold(i32),

    /// The address gate compares against `pc & 0xFF` and must fit in a byte.
    #[error("custom.gate_threshold must be at most 255, got {0}")]
    GateThreshold(u32),

    /// The configuration document could not be parsed.
    #[error("failed to parse predictor configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
