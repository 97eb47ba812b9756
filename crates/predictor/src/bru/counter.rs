//! 2-bit Saturating Counters.
//!
//! Every direction table in the crate (gshare BHT, tournament global/local
//! BHTs, selector) stores raw 2-bit counters and runs them through the same
//! predict/update policy defined here.
//!
//! Counters are stored as raw `u8` so that a corrupted entry is observable.
//! Such an entry is reported with a warning, predicts not-taken and is never
//! updated.

use tracing::warn;

use crate::common::{MAX_TABLE_BITS, Outcome};

/// Strongly not-taken.
pub const SN: u8 = 0;
/// Weakly not-taken; the neutral initial state of every table.
pub const WN: u8 = 1;
/// Weakly taken; the smallest value that predicts taken.
pub const WT: u8 = 2;
/// Strongly taken.
pub const ST: u8 = 3;

/// Decoded state of a 2-bit saturating counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CounterState {
    /// Strongly not-taken (0).
    StronglyNotTaken,
    /// Weakly not-taken (1).
    WeaklyNotTaken,
    /// Weakly taken (2).
    WeaklyTaken,
    /// Strongly taken (3).
    StronglyTaken,
}

impl CounterState {
    /// Decodes a raw table entry, returning `None` for values outside `0..=3`.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            SN => Some(Self::StronglyNotTaken),
            WN => Some(Self::WeaklyNotTaken),
            WT => Some(Self::WeaklyTaken),
            ST => Some(Self::StronglyTaken),
            _ => None,
        }
    }

    /// Raw encoding of the state.
    pub const fn raw(self) -> u8 {
        match self {
            Self::StronglyNotTaken => SN,
            Self::WeaklyNotTaken => WN,
            Self::WeaklyTaken => WT,
            Self::StronglyTaken => ST,
        }
    }

    /// Direction predicted by this state.
    pub const fn predict(self) -> Outcome {
        match self {
            Self::StronglyNotTaken | Self::WeaklyNotTaken => Outcome::NotTaken,
            Self::WeaklyTaken | Self::StronglyTaken => Outcome::Taken,
        }
    }

    /// Moves one step towards the outcome, saturating at either end.
    #[must_use]
    pub const fn update(self, outcome: Outcome) -> Self {
        match (self, outcome) {
            (Self::StronglyNotTaken, Outcome::Taken) => Self::WeaklyNotTaken,
            (Self::WeaklyNotTaken, Outcome::Taken) => Self::WeaklyTaken,
            (Self::WeaklyTaken | Self::StronglyTaken, Outcome::Taken) => Self::StronglyTaken,
            (Self::StronglyNotTaken | Self::WeaklyNotTaken, Outcome::NotTaken) => {
                Self::StronglyNotTaken
            }
            (Self::WeaklyTaken, Outcome::NotTaken) => Self::WeaklyNotTaken,
            (Self::StronglyTaken, Outcome::NotTaken) => Self::WeaklyTaken,
        }
    }
}

/// Predicts from a raw counter value.
///
/// A value outside the four valid states is logged and treated as not-taken.
#[inline]
pub fn predict(raw: u8) -> Outcome {
    CounterState::from_raw(raw).map_or_else(
        || {
            warn!(value = raw, "undefined saturating counter state, predicting not-taken");
            Outcome::NotTaken
        },
        CounterState::predict,
    )
}

/// Returns the counter value after training with `outcome`.
///
/// A corrupt value is logged and returned unchanged.
#[inline]
#[must_use]
pub fn update(raw: u8, outcome: Outcome) -> u8 {
    CounterState::from_raw(raw).map_or_else(
        || {
            warn!(value = raw, "undefined saturating counter state, skipping update");
            raw
        },
        |state| state.update(outcome).raw(),
    )
}

/// Direct-mapped table of 2-bit saturating counters.
///
/// The table holds `2^bits` entries and is indexed by a pre-computed,
/// already masked index; callers build the index from PC and history bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTable {
    /// Raw counter values.
    entries: Vec<u8>,
    /// Mask selecting the low `bits` of an index source.
    mask: u64,
}

impl CounterTable {
    /// Allocates `2^bits` counters in the weakly not-taken state.
    ///
    /// Widths above [`MAX_TABLE_BITS`] are clamped to it.
    pub fn new(bits: usize) -> Self {
        if bits > MAX_TABLE_BITS {
            warn!(bits, max = MAX_TABLE_BITS, "counter table width out of range, clamping");
        }
        let size = 1usize << bits.min(MAX_TABLE_BITS);
        Self {
            entries: vec![WN; size],
            mask: (size as u64) - 1,
        }
    }

    /// Number of counters in the table.
    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; tables hold at least two entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mask applied to index sources (`2^bits - 1`).
    #[inline(always)]
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// Raw counter value at `idx`.
    #[inline(always)]
    pub fn get(&self, idx: usize) -> u8 {
        self.entries[idx]
    }

    /// Direction predicted by the counter at `idx`.
    #[inline(always)]
    pub fn predict(&self, idx: usize) -> Outcome {
        predict(self.entries[idx])
    }

    /// Trains the counter at `idx` towards `outcome`.
    #[inline(always)]
    pub fn update(&mut self, idx: usize, outcome: Outcome) {
        self.entries[idx] = update(self.entries[idx], outcome);
    }

    /// Raw view of every counter, for inspection and comparison.
    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    /// Restores every counter to weakly not-taken.
    pub fn reset(&mut self) {
        self.entries.fill(WN);
    }

    /// Overwrites the counter at `idx` with an arbitrary raw value.
    #[cfg(test)]
    pub(crate) fn poke(&mut self, idx: usize, raw: u8) {
        self.entries[idx] = raw;
    }
}
