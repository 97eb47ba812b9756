//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts, at the price of letting unrelated branches
//! whose `pc ^ history` collide share a counter.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is `ghistory_bits` (one byte per 2-bit counter)
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::BranchPredictor;
use super::counter::CounterTable;
use crate::common::Outcome;
use crate::config::GshareConfig;

/// Global-history indexed direction table.
///
/// This is the building block shared by the gshare, tournament and custom
/// engines: a BHT plus the global history register that indexes it. The
/// register is kept at full 64-bit width and truncated to the table width
/// only when forming an index.
#[derive(Clone, Debug)]
pub struct GlobalBht {
    /// Global History Register storing recent branch outcomes (newest in bit 0).
    ghistory: u64,
    /// Branch History Table of 2-bit saturating counters.
    bht: CounterTable,
}

impl GlobalBht {
    /// Allocates `2^bits` weakly not-taken counters and clears the history.
    pub fn new(bits: usize) -> Self {
        Self {
            ghistory: 0,
            bht: CounterTable::new(bits),
        }
    }

    /// Computes `(pc & mask) ^ (ghistory & mask)` for a table of `mask + 1` entries.
    ///
    /// Used for the BHT itself and for any companion table (such as a
    /// selector) that is addressed with the same formula at another width.
    #[inline(always)]
    pub const fn hashed_index(&self, pc: u32, mask: u64) -> usize {
        (((pc as u64) & mask) ^ (self.ghistory & mask)) as usize
    }

    /// Index into the BHT for the branch at `pc`.
    #[inline(always)]
    pub const fn index(&self, pc: u32) -> usize {
        self.hashed_index(pc, self.bht.mask())
    }

    /// Predicts from the counter at `index(pc)`.
    #[inline]
    pub fn predict(&self, pc: u32) -> Outcome {
        self.bht.predict(self.index(pc))
    }

    /// Trains the counter at `index(pc)`, then shifts the outcome into the history.
    ///
    /// The history advances on every trained branch, whether or not the
    /// prediction was correct.
    #[inline]
    pub fn train(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.bht.update(idx, outcome);
        self.ghistory = (self.ghistory << 1) | outcome.bit();
    }

    /// Current value of the global history register.
    pub const fn ghistory(&self) -> u64 {
        self.ghistory
    }

    /// The underlying counter table.
    pub const fn table(&self) -> &CounterTable {
        &self.bht
    }

    /// Clears the history and restores every counter to weakly not-taken.
    pub fn reset(&mut self) {
        self.ghistory = 0;
        self.bht.reset();
    }
}

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global BHT and its history register.
    global: GlobalBht,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor sized by the configuration.
    pub fn new(config: &GshareConfig) -> Self {
        Self {
            global: GlobalBht::new(config.ghistory_bits),
        }
    }

    /// Index into the BHT that `pc` maps to under the current history.
    pub const fn index(&self, pc: u32) -> usize {
        self.global.index(pc)
    }

    /// Current value of the global history register.
    pub const fn ghistory(&self) -> u64 {
        self.global.ghistory()
    }

    /// The Branch History Table.
    pub const fn bht(&self) -> &CounterTable {
        self.global.table()
    }
}

impl BranchPredictor for GSharePredictor {
    fn name(&self) -> &'static str {
        "Gshare"
    }

    /// Predicts taken if the 2-bit counter at the hashed index is WT or ST.
    fn predict_branch(&self, pc: u32) -> Outcome {
        self.global.predict(pc)
    }

    /// Updates the 2-bit saturating counter in the BHT and shifts the new
    /// outcome into the Global History Register.
    fn update_branch(&mut self, pc: u32, outcome: Outcome) {
        self.global.train(pc, outcome);
    }

    fn reset(&mut self) {
        self.global.reset();
    }
}
