//! Press/hold chord collision resolution
//!
//! Hold activations are evaluated ahead of basic presses, so a chord that
//! is both a pure-press binding and the hold prefix of another binding
//! would lose its momentary-press meaning on a tap. The resolver splices
//! the press outputs into the activation as its fallback ("if released
//! without holding long enough, do this instead"). The original basic
//! press stays in the output untouched.

use tracing::debug;

use super::error::SpecError;
use super::stanza::StanzaBuilder;

/// Splice tap fallbacks into colliding hold activations and reject
/// repeated outputs shadowed by a hold chord
pub fn resolve(builder: &mut StanzaBuilder) -> Result<(), SpecError> {
    // Repeat semantics under a hold-shadowed chord are undefined
    let colliding: Vec<String> = builder
        .basic_repeat_index()
        .iter()
        .filter(|summary| builder.hold_index().contains_key(*summary))
        .cloned()
        .collect();
    if !colliding.is_empty() {
        return Err(SpecError::RepeatHoldCollision { chords: colliding });
    }

    let shared: Vec<(usize, usize)> = builder
        .basic_index()
        .iter()
        .filter_map(|(summary, &basic_idx)| {
            builder
                .hold_index()
                .get(summary)
                .map(|&hold_idx| (basic_idx, hold_idx))
        })
        .collect();

    for (basic_idx, hold_idx) in shared {
        let outputs = builder.basics()[basic_idx].outputs.clone();
        let hold = &mut builder.holds_mut()[hold_idx];
        debug!(var = %hold.var_name, "attaching tap fallback to hold activation");
        hold.fallback_outputs = Some(outputs);
    }

    Ok(())
}
