//! Saturating Counter Tests.
//!
//! Verifies the 2-bit counter transition table shared by every engine and the
//! saturation invariant over arbitrary update sequences.

use bpsim_core::Outcome;
use bpsim_core::bru::counter::{self, CounterState, CounterTable, SN, ST, WN, WT};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(SN, Outcome::Taken, WN)]
#[case(WN, Outcome::Taken, WT)]
#[case(WT, Outcome::Taken, ST)]
#[case(ST, Outcome::Taken, ST)]
#[case(SN, Outcome::NotTaken, SN)]
#[case(WN, Outcome::NotTaken, SN)]
#[case(WT, Outcome::NotTaken, WN)]
#[case(ST, Outcome::NotTaken, WT)]
fn transition_table(#[case] from: u8, #[case] outcome: Outcome, #[case] to: u8) {
    assert_eq!(counter::update(from, outcome), to);
}

#[rstest]
#[case(SN, Outcome::NotTaken)]
#[case(WN, Outcome::NotTaken)]
#[case(WT, Outcome::Taken)]
#[case(ST, Outcome::Taken)]
fn prediction_threshold_is_weakly_taken(#[case] raw: u8, #[case] expected: Outcome) {
    assert_eq!(counter::predict(raw), expected);
}

#[test]
fn states_are_ordered() {
    assert!(CounterState::StronglyNotTaken < CounterState::WeaklyNotTaken);
    assert!(CounterState::WeaklyNotTaken < CounterState::WeaklyTaken);
    assert!(CounterState::WeaklyTaken < CounterState::StronglyTaken);
}

#[test]
fn repeated_not_taken_stays_strongly_not_taken() {
    let mut raw = SN;
    for _ in 0..10 {
        raw = counter::update(raw, Outcome::NotTaken);
        assert_eq!(raw, SN);
    }
}

#[test]
fn repeated_taken_stays_strongly_taken() {
    let mut raw = ST;
    for _ in 0..10 {
        raw = counter::update(raw, Outcome::Taken);
        assert_eq!(raw, ST);
    }
}

#[test]
fn table_starts_weakly_not_taken() {
    let table = CounterTable::new(5);
    assert_eq!(table.len(), 32);
    assert_eq!(table.mask(), 31);
    assert!(table.entries().iter().all(|&c| c == WN));
    assert_eq!(table.predict(17), Outcome::NotTaken);
}

#[test]
fn table_reset_restores_neutral_state() {
    let mut table = CounterTable::new(3);
    table.update(2, Outcome::Taken);
    table.update(5, Outcome::NotTaken);
    assert_eq!(table.get(2), WT);
    assert_eq!(table.get(5), SN);

    table.reset();
    assert_eq!(table.entries(), &[WN; 8]);
}

proptest! {
    /// Whatever the update sequence, a counter moves at most one step per
    /// update and never leaves the four valid states.
    #[test]
    fn counter_never_leaves_two_bits(
        start in SN..=ST,
        outcomes in prop::collection::vec(any::<bool>(), 0..128),
    ) {
        let mut raw = start;
        for taken in outcomes {
            let next = counter::update(raw, Outcome::from(taken));
            prop_assert!(next <= ST);
            prop_assert!(next.abs_diff(raw) <= 1);
            raw = next;
        }
    }

    /// Training only touches the addressed entry.
    #[test]
    fn table_update_is_local(idx in 0usize..16, taken in any::<bool>()) {
        let mut table = CounterTable::new(4);
        table.update(idx, Outcome::from(taken));
        for (i, &c) in table.entries().iter().enumerate() {
            if i != idx {
                prop_assert_eq!(c, WN);
            }
        }
    }
}
