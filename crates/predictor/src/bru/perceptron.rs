//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Instead of
//! saturating counters, it keeps a table of weight vectors. The prediction is
//! the bias plus the dot product of the weights and the bipolar history
//! vector (+1 for a taken history bit, -1 otherwise).
//!
//! The perceptron keeps its own narrow global history register, separate from
//! the wide register used by the counter-based components.

use tracing::warn;

use crate::common::{MAX_PERCEPTRON_HISTORY, Outcome};
use crate::config::CustomConfig;

/// Perceptron table and its history register.
#[derive(Clone, Debug)]
pub struct PerceptronTable {
    /// Perceptron history register (newest outcome in bit 0).
    ghr: u64,
    /// Table of weights (flattened); each row is `[bias, w0, .., w(H-1)]`.
    table: Vec<i8>,
    /// Number of perceptron rows.
    rows: usize,
    /// Length of the history vector.
    history_length: usize,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Mask keeping the low `history_length` bits of the history register.
    history_mask: u64,
    /// Training threshold (theta).
    threshold: i32,
}

impl PerceptronTable {
    /// Creates a zeroed perceptron table based on configuration.
    ///
    /// An unvalidated configuration is clamped rather than rejected: the
    /// history length to [`MAX_PERCEPTRON_HISTORY`] and the row count to at
    /// least one.
    pub fn new(config: &CustomConfig) -> Self {
        let history_length = config.history_length.min(MAX_PERCEPTRON_HISTORY);
        let rows = config.num_perceptrons.max(1);
        if history_length != config.history_length || rows != config.num_perceptrons {
            warn!(
                history_length = config.history_length,
                num_perceptrons = config.num_perceptrons,
                "perceptron geometry out of range, clamping"
            );
        }
        let row_size = history_length + 1;

        Self {
            ghr: 0,
            table: vec![0; rows * row_size],
            rows,
            history_length,
            row_size,
            history_mask: (1u64 << history_length) - 1,
            threshold: config.effective_threshold(),
        }
    }

    /// Row selected by `pc`: `pc mod rows`.
    #[inline(always)]
    pub const fn row(&self, pc: u32) -> usize {
        (pc as usize) % self.rows
    }

    /// Bipolar value of history bit `i`.
    #[inline(always)]
    const fn input(&self, i: usize) -> i32 {
        if (self.ghr >> i) & 1 != 0 { 1 } else { -1 }
    }

    /// Computes the perceptron output `y` for the branch at `pc`.
    ///
    /// Sums the bias weight and the product of history bits and weights.
    pub fn output(&self, pc: u32) -> i32 {
        let base = self.row(pc) * self.row_size;
        let weights = &self.table[base + 1..base + self.row_size];

        weights
            .iter()
            .enumerate()
            .fold(i32::from(self.table[base]), |y, (i, &w)| {
                y + i32::from(w) * self.input(i)
            })
    }

    /// Predicts taken if the output is non-negative.
    #[inline]
    pub fn predict(&self, pc: u32) -> Outcome {
        Outcome::from(self.output(pc) >= 0)
    }

    /// Trains the row for `pc` and shifts the outcome into the history.
    ///
    /// Weights move on a misprediction or when the output magnitude is within
    /// the threshold. The history register advances on every call.
    pub fn train(&mut self, pc: u32, outcome: Outcome) {
        let y = self.output(pc);
        let t = outcome.signum();

        if (y >= 0) != outcome.is_taken() || y.abs() <= self.threshold {
            let base = self.row(pc) * self.row_size;

            let v = i32::from(self.table[base]) + t;
            self.table[base] = clamp_weight(v);

            for i in 0..self.history_length {
                let x = self.input(i);
                let w_idx = base + 1 + i;
                let v = i32::from(self.table[w_idx]) + t * x;
                self.table[w_idx] = clamp_weight(v);
            }
        }

        self.ghr = ((self.ghr << 1) | outcome.bit()) & self.history_mask;
    }

    /// Bias weight of row `row`.
    pub fn bias(&self, row: usize) -> i8 {
        self.table[row * self.row_size]
    }

    /// History weights of row `row`.
    pub fn weights(&self, row: usize) -> &[i8] {
        let base = row * self.row_size;
        &self.table[base + 1..base + self.row_size]
    }

    /// Current perceptron history register.
    pub const fn history(&self) -> u64 {
        self.ghr
    }

    /// Training threshold in use.
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Zeroes every weight and the history register.
    pub fn reset(&mut self) {
        self.ghr = 0;
        self.table.fill(0);
    }
}

/// Clamps a weight value to the 8-bit signed integer range.
fn clamp_weight(v: i32) -> i8 {
    v.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8
}
