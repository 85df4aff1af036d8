//! Keymap compilation core
//!
//! Turns interpreted table rows into a priority-ordered manipulator list,
//! in one synchronous pass:
//!
//! ```text
//! KeymapTable
//!   → RowInterpreter   (rows → BindingSpec)
//!   → classify         (press vs. hold-and-press)
//!   → StanzaBuilder    (bindings → manipulator stanzas, hold dedup)
//!   → collide::resolve (tap fallbacks for press/hold chord collisions)
//!   → order::schedule  (bucket + chord-size priority, stable)
//! ```
//!
//! Every failure is a [`SpecError`]; nothing is emitted on failure.

mod classify;
mod collide;
mod error;
mod order;
mod row;
mod stanza;

pub use classify::{classify, ClassifiedBinding};
pub use error::SpecError;
pub use row::{
    split_prefix_flag, ActionKind, BindingSpec, CustomOutput, KeyOutput, MouseOutput,
    RowInterpreter,
};
pub use stanza::{
    chord_summary, BasicPress, HoldActivation, HoldConditionedPress, Manipulator, OutputSpec,
    StanzaBuilder, HOLD_VAR_PREFIX,
};

use tracing::info;

use crate::table::KeymapTable;

/// Compile a keymap table into the final, priority-ordered manipulator
/// list
pub fn compile(table: &KeymapTable) -> Result<Vec<Manipulator>, SpecError> {
    let interpreter = RowInterpreter::new(table);

    let mut builder = StanzaBuilder::new();
    for binding in interpreter.bindings(table) {
        builder.add(classify(binding?)?);
    }

    collide::resolve(&mut builder)?;

    let (holds, conditioned, basics) = builder.into_buckets();
    info!(
        activations = holds.len(),
        conditioned = conditioned.len(),
        basic = basics.len(),
        "compiled keymap"
    );

    Ok(order::schedule(holds, conditioned, basics))
}
