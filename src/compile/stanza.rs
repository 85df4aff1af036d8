//! Manipulator construction
//!
//! Builds the three manipulator shapes out of classified bindings and
//! keeps the per-run registries (keyed by chord summary) that the
//! collision resolver consults afterwards.
//!
//! Chord identity is the *summary*: the sorted concatenation of the
//! chord's key names, so `{a,b}` and `{b,a}` are the same chord.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::classify::ClassifiedBinding;
use super::row::BindingSpec;

/// Prefix for condition-variable names derived from hold-chord summaries
pub const HOLD_VAR_PREFIX: &str = "hold_";

/// Canonical, order-independent identity of a chord
pub fn chord_summary(keys: &[String]) -> String {
    let mut sorted: Vec<&str> = keys.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.concat()
}

/// One output action performed by a manipulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSpec {
    Key {
        code: String,
        modifiers: Vec<String>,
        repeated: bool,
    },
    Mouse {
        button: Option<String>,
        motion: Vec<(String, i64)>,
        repeated: bool,
    },
    Custom {
        action: String,
        argument: String,
        repeated: bool,
    },
}

impl OutputSpec {
    pub fn repeated(&self) -> bool {
        match self {
            OutputSpec::Key { repeated, .. }
            | OutputSpec::Mouse { repeated, .. }
            | OutputSpec::Custom { repeated, .. } => *repeated,
        }
    }
}

/// Fires its outputs when the whole chord is pressed simultaneously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicPress {
    pub chord: Vec<String>,
    pub outputs: Vec<OutputSpec>,
}

/// While the hold-chord is held, sets a condition variable; clears it on
/// release. At most one exists per distinct hold-chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldActivation {
    pub hold_chord: Vec<String>,
    pub var_name: String,
    /// Outputs fired when the chord is released before the hold
    /// threshold; spliced in by the collision resolver
    pub fallback_outputs: Option<Vec<OutputSpec>>,
}

/// Fires its outputs on a single key press, gated by a condition variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldConditionedPress {
    pub press_key: String,
    pub var_name: String,
    pub outputs: Vec<OutputSpec>,
}

/// One remapping rule for the target engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Manipulator {
    BasicPress(BasicPress),
    HoldActivation(HoldActivation),
    HoldConditionedPress(HoldConditionedPress),
}

impl Manipulator {
    /// Number of keys that must be engaged simultaneously to trigger this
    /// manipulator. A conditioned press listens for a single key.
    pub fn chord_size(&self) -> usize {
        match self {
            Manipulator::BasicPress(m) => m.chord.len(),
            Manipulator::HoldActivation(m) => m.hold_chord.len(),
            Manipulator::HoldConditionedPress(_) => 1,
        }
    }
}

/// Build the ordered output list for one binding
///
/// Key output first, then mouse, then custom; the key entry carries the
/// binding's modifiers when non-empty.
fn build_outputs(spec: &BindingSpec) -> Vec<OutputSpec> {
    let mut outputs = Vec::new();
    if let Some(key) = &spec.key {
        outputs.push(OutputSpec::Key {
            code: key.code.clone(),
            modifiers: spec.modifiers.clone(),
            repeated: key.repeated,
        });
    }
    if let Some(mouse) = &spec.mouse {
        outputs.push(OutputSpec::Mouse {
            button: mouse.button.clone(),
            motion: mouse.motion.clone(),
            repeated: mouse.repeated,
        });
    }
    if let Some(custom) = &spec.custom {
        outputs.push(OutputSpec::Custom {
            action: custom.action.clone(),
            argument: custom.argument.clone(),
            repeated: custom.repeated,
        });
    }
    outputs
}

/// Accumulates manipulators and the chord-summary registries for one
/// compilation run
#[derive(Debug, Default)]
pub struct StanzaBuilder {
    basics: Vec<BasicPress>,
    holds: Vec<HoldActivation>,
    conditioned: Vec<HoldConditionedPress>,
    /// Chord summary → index into `basics`, first binding wins
    basic_index: BTreeMap<String, usize>,
    /// Hold-chord summary → index into `holds`
    hold_index: BTreeMap<String, usize>,
    /// Summaries of pure-press chords that carry a repeated output
    basic_repeat_index: BTreeSet<String>,
}

impl StanzaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the manipulator(s) for one classified binding
    pub fn add(&mut self, binding: ClassifiedBinding) {
        match binding {
            ClassifiedBinding::Press { spec, chord } => self.add_press(&spec, chord),
            ClassifiedBinding::HoldAndPress {
                spec,
                press_key,
                hold_keys,
            } => self.add_hold_and_press(&spec, press_key, hold_keys),
        }
    }

    fn add_press(&mut self, spec: &BindingSpec, chord: Vec<String>) {
        let summary = chord_summary(&chord);
        let outputs = build_outputs(spec);
        debug!(row = spec.row, chord = %summary, "basic press");

        if outputs.iter().any(OutputSpec::repeated) {
            self.basic_repeat_index.insert(summary.clone());
        }

        self.basics.push(BasicPress { chord, outputs });
        let idx = self.basics.len() - 1;
        self.basic_index.entry(summary).or_insert(idx);
    }

    fn add_hold_and_press(
        &mut self,
        spec: &BindingSpec,
        press_key: String,
        hold_keys: Vec<String>,
    ) {
        let summary = chord_summary(&hold_keys);
        let var_name = format!("{}{}", HOLD_VAR_PREFIX, summary);
        debug!(row = spec.row, hold = %summary, press = %press_key, "hold and press");

        // One activation per distinct hold-chord; later bindings with the
        // same hold gesture reuse it
        if !self.hold_index.contains_key(&summary) {
            self.holds.push(HoldActivation {
                hold_chord: hold_keys,
                var_name: var_name.clone(),
                fallback_outputs: None,
            });
            self.hold_index.insert(summary, self.holds.len() - 1);
        }

        self.conditioned.push(HoldConditionedPress {
            press_key,
            var_name,
            outputs: build_outputs(spec),
        });
    }

    /// Chord summaries registered for pure-press bindings
    pub fn basic_index(&self) -> &BTreeMap<String, usize> {
        &self.basic_index
    }

    /// Hold-chord summaries registered for hold activations
    pub fn hold_index(&self) -> &BTreeMap<String, usize> {
        &self.hold_index
    }

    /// Summaries of repeated pure-press chords
    pub fn basic_repeat_index(&self) -> &BTreeSet<String> {
        &self.basic_repeat_index
    }

    pub fn basics(&self) -> &[BasicPress] {
        &self.basics
    }

    pub fn holds_mut(&mut self) -> &mut [HoldActivation] {
        &mut self.holds
    }

    /// Tear down into the three manipulator buckets, in insertion order
    pub fn into_buckets(
        self,
    ) -> (
        Vec<HoldActivation>,
        Vec<HoldConditionedPress>,
        Vec<BasicPress>,
    ) {
        (self.holds, self.conditioned, self.basics)
    }
}
