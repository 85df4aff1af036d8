//! Action classification
//!
//! Splits a binding's key actions into press keys and hold keys and
//! decides which manipulator shape the binding produces.

use super::error::SpecError;
use super::row::{ActionKind, BindingSpec};

/// A binding with its input keys partitioned by action kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedBinding {
    /// All keys are momentary presses; compiles to one `BasicPress`
    Press { spec: BindingSpec, chord: Vec<String> },
    /// Held modifier keys gating one pressed key; compiles to an
    /// `HoldActivation` + `HoldConditionedPress` pair
    HoldAndPress {
        spec: BindingSpec,
        press_key: String,
        hold_keys: Vec<String>,
    },
}

/// Partition a binding's keys into press and hold sets and validate the
/// combination
pub fn classify(spec: BindingSpec) -> Result<ClassifiedBinding, SpecError> {
    let (press_keys, hold_keys): (Vec<_>, Vec<_>) = spec
        .key_actions
        .iter()
        .cloned()
        .partition(|(_, kind)| *kind == ActionKind::Press);

    let press_keys: Vec<String> = press_keys.into_iter().map(|(key, _)| key).collect();
    let hold_keys: Vec<String> = hold_keys.into_iter().map(|(key, _)| key).collect();

    if press_keys.is_empty() {
        return Err(SpecError::NoPressKeys { row: spec.row });
    }

    if hold_keys.is_empty() {
        return Ok(ClassifiedBinding::Press {
            spec,
            chord: press_keys,
        });
    }

    if press_keys.len() > 1 {
        return Err(SpecError::MultiPressWithHold { row: spec.row });
    }

    let press_key = press_keys.into_iter().next().unwrap();
    Ok(ClassifiedBinding::HoldAndPress {
        spec,
        press_key,
        hold_keys,
    })
}
