//! Evaluation priority scheduling
//!
//! The target engine evaluates manipulators in list order, first match
//! wins. The final order is: all hold activations, then all conditioned
//! presses, then all basic presses; within a bucket, larger chords first;
//! ties keep the author's row order (the sort is stable), so output is
//! deterministic for a fixed input.

use std::cmp::Reverse;

use super::stanza::{BasicPress, HoldActivation, HoldConditionedPress, Manipulator};

fn bucket_rank(manipulator: &Manipulator) -> u8 {
    match manipulator {
        Manipulator::HoldActivation(_) => 0,
        Manipulator::HoldConditionedPress(_) => 1,
        Manipulator::BasicPress(_) => 2,
    }
}

/// Produce the final manipulator ordering
pub fn schedule(
    holds: Vec<HoldActivation>,
    conditioned: Vec<HoldConditionedPress>,
    basics: Vec<BasicPress>,
) -> Vec<Manipulator> {
    let mut manipulators: Vec<Manipulator> = holds
        .into_iter()
        .map(Manipulator::HoldActivation)
        .chain(conditioned.into_iter().map(Manipulator::HoldConditionedPress))
        .chain(basics.into_iter().map(Manipulator::BasicPress))
        .collect();

    // Vec::sort_by_key is a stable sort, which is what keeps equal-size
    // chords in insertion order
    manipulators.sort_by_key(|m| (bucket_rank(m), Reverse(m.chord_size())));
    manipulators
}
