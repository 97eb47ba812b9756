//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (selector) to choose
//! between a Global predictor (gshare-like) and a Local predictor indexed by
//! the branch address alone. This allows the predictor to adapt to different
//! types of branch behaviors.
//!
//! The selector is addressed with the global predictor's formula,
//! `(pc ^ ghistory)`, masked to its own width. Local history registers are
//! maintained per local bucket but do not feed the local prediction; the
//! local prediction is read straight from the address-indexed counters.

use super::BranchPredictor;
use super::counter::CounterTable;
use super::gshare::GlobalBht;
use crate::common::Outcome;
use crate::config::{CustomConfig, TournamentConfig};

/// Per-address local predictor: counters plus 64-bit local history registers.
#[derive(Clone, Debug)]
pub struct LocalTable {
    /// Local BHT indexed by `pc & mask`.
    bht: CounterTable,
    /// Last 64 outcomes of every local bucket (newest in bit 0).
    histories: Vec<u64>,
}

impl LocalTable {
    /// Allocates `2^bits` counters and history registers.
    pub fn new(bits: usize) -> Self {
        let bht = CounterTable::new(bits);
        let histories = vec![0; bht.len()];
        Self { bht, histories }
    }

    /// Local index for `pc`; global history plays no part.
    #[inline(always)]
    pub const fn index(&self, pc: u32) -> usize {
        ((pc as u64) & self.bht.mask()) as usize
    }

    /// Predicts from the counter of the bucket `pc` falls in.
    #[inline]
    pub fn predict(&self, pc: u32) -> Outcome {
        self.bht.predict(self.index(pc))
    }

    /// Trains the bucket's counter and shifts the outcome into its history.
    #[inline]
    pub fn train(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.bht.update(idx, outcome);
        self.histories[idx] = (self.histories[idx] << 1) | outcome.bit();
    }

    /// The local counter table.
    pub const fn table(&self) -> &CounterTable {
        &self.bht
    }

    /// Local history register of bucket `idx`.
    pub fn history(&self, idx: usize) -> u64 {
        self.histories[idx]
    }

    /// Restores counters to weakly not-taken and clears every history.
    pub fn reset(&mut self) {
        self.bht.reset();
        self.histories.fill(0);
    }
}

/// Tournament Predictor structure.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Global BHT and the global history register shared by every component.
    global: GlobalBht,
    /// Address-indexed local predictor.
    local: LocalTable,
    /// Selector counters: WT/ST favour global, SN/WN favour local.
    selector: CounterTable,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    pub fn new(config: &TournamentConfig) -> Self {
        Self::with_widths(config.ghistory_bits, config.lhistory_bits, config.chooser_bits)
    }

    /// Creates the tournament component of the custom hybrid predictor.
    pub fn from_custom(config: &CustomConfig) -> Self {
        Self::with_widths(config.ghistory_bits, config.lhistory_bits, config.chooser_bits)
    }

    fn with_widths(ghistory_bits: usize, lhistory_bits: usize, chooser_bits: usize) -> Self {
        Self {
            global: GlobalBht::new(ghistory_bits),
            local: LocalTable::new(lhistory_bits),
            selector: CounterTable::new(chooser_bits),
        }
    }

    /// Selector index: the global index formula at selector width.
    #[inline(always)]
    pub const fn selector_index(&self, pc: u32) -> usize {
        self.global.hashed_index(pc, self.selector.mask())
    }

    /// Global and local component predictions for `pc`, in that order.
    #[inline]
    pub fn components(&self, pc: u32) -> (Outcome, Outcome) {
        (self.global.predict(pc), self.local.predict(pc))
    }

    /// Picks between the component predictions using the selector counter.
    ///
    /// WT/ST favour global. A corrupt selector entry is reported and
    /// favours local.
    #[inline]
    pub fn choose(&self, pc: u32, global: Outcome, local: Outcome) -> Outcome {
        if self.selector.predict(self.selector_index(pc)).is_taken() {
            global
        } else {
            local
        }
    }

    /// The global component.
    pub const fn global(&self) -> &GlobalBht {
        &self.global
    }

    /// The local component.
    pub const fn local(&self) -> &LocalTable {
        &self.local
    }

    /// The selector table.
    pub const fn selector(&self) -> &CounterTable {
        &self.selector
    }

    /// Current value of the global history register.
    pub const fn ghistory(&self) -> u64 {
        self.global.ghistory()
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str {
        "Tournament"
    }

    /// Queries both components and lets the selector decide which one to use.
    fn predict_branch(&self, pc: u32) -> Outcome {
        let (global, local) = self.components(pc);
        self.choose(pc, global, local)
    }

    /// Updates the selector towards whichever component alone was correct,
    /// then trains the local table and finally the global table, which
    /// advances the global history.
    ///
    /// Component predictions are recomputed from the current state rather
    /// than carried over from `predict_branch`, and every index is formed
    /// from the history as it was before this update.
    fn update_branch(&mut self, pc: u32, outcome: Outcome) {
        let (global, local) = self.components(pc);
        let global_correct = global == outcome;
        let local_correct = local == outcome;

        if global_correct != local_correct {
            let idx = self.selector_index(pc);
            self.selector.update(idx, Outcome::from(global_correct));
        }

        self.local.train(pc, outcome);
        self.global.train(pc, outcome);
    }

    fn reset(&mut self) {
        self.global.reset();
        self.local.reset();
        self.selector.reset();
    }
}
