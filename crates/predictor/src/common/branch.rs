//! Branch Outcome and Event Types.
//!
//! This module defines the values exchanged between the trace driver and the predictors:
//! 1. **Outcome:** The resolved (or predicted) direction of a conditional branch.
//! 2. **Branch Event:** Everything the driver knows about a retired control-flow instruction.

use std::fmt;

/// Direction of a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// The branch falls through to the next sequential instruction.
    #[default]
    NotTaken,
    /// The branch redirects control flow to its target.
    Taken,
}

impl Outcome {
    /// Returns the history bit for this outcome (1 for taken, 0 otherwise).
    ///
    /// This is the value shifted into global and local history registers.
    #[inline(always)]
    pub const fn bit(self) -> u64 {
        match self {
            Self::Taken => 1,
            Self::NotTaken => 0,
        }
    }

    /// Returns `true` if the outcome is [`Outcome::Taken`].
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }

    /// Returns the bipolar encoding used by perceptron training (+1 / -1).
    #[inline(always)]
    pub const fn signum(self) -> i32 {
        match self {
            Self::Taken => 1,
            Self::NotTaken => -1,
        }
    }
}

impl From<bool> for Outcome {
    fn from(taken: bool) -> Self {
        if taken { Self::Taken } else { Self::NotTaken }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Taken => Self::NotTaken,
            Self::NotTaken => Self::Taken,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taken => write!(f, "T"),
            Self::NotTaken => write!(f, "N"),
        }
    }
}

/// A resolved control-flow instruction as reported by the trace driver.
///
/// The predictors only learn from conditional branches; the remaining flags
/// are carried so the driver can hand over every branch record unfiltered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BranchEvent {
    /// Program counter of the branch instruction.
    pub pc: u32,
    /// Target address of the branch.
    pub target: u32,
    /// Resolved direction.
    pub outcome: Outcome,
    /// Set for conditional branches; the only events that train the predictor.
    pub is_conditional: bool,
    /// Set for call instructions.
    pub is_call: bool,
    /// Set for return instructions.
    pub is_return: bool,
    /// Set for direct (PC-relative) branches.
    pub is_direct: bool,
}

impl BranchEvent {
    /// Creates a direct conditional branch event.
    pub const fn conditional(pc: u32, target: u32, outcome: Outcome) -> Self {
        Self {
            pc,
            target,
            outcome,
            is_conditional: true,
            is_call: false,
            is_return: false,
            is_direct: true,
        }
    }
}
