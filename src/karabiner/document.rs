//! Document structure and wire-format conversion
//!
//! Field order in these structs is serialization order, and the conversion
//! is pure, so identical manipulator lists always produce byte-identical
//! JSON.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::compile::{Manipulator, OutputSpec};

/// Default document title when none is given on the command line
pub const DEFAULT_TITLE: &str = "From csv key map";

/// Karabiner's simultaneous-keypress detection window
const SIMULTANEOUS_THRESHOLD_MS: u64 = 100;
/// How long a chord may be held before the tap fallback stops applying
const ALONE_TIMEOUT_MS: u64 = 250;
/// How long a chord must be held before the hold variable is set
const HELD_DOWN_THRESHOLD_MS: u64 = 250;

/// Top-level complex-modifications document
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub title: String,
    pub rules: Vec<Rule>,
}

/// One rule: a description plus its ordered manipulators
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub description: String,
    pub manipulators: Vec<WireManipulator>,
}

#[derive(Debug, Clone, Serialize)]
struct Parameters {
    #[serde(rename = "basic.simultaneous_threshold_milliseconds")]
    simultaneous_threshold_ms: u64,
    #[serde(
        rename = "basic.to_if_alone_timeout_milliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    alone_timeout_ms: Option<u64>,
    #[serde(
        rename = "basic.to_if_held_down_threshold_milliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    held_down_threshold_ms: Option<u64>,
}

impl Parameters {
    fn press() -> Self {
        Self {
            simultaneous_threshold_ms: SIMULTANEOUS_THRESHOLD_MS,
            alone_timeout_ms: None,
            held_down_threshold_ms: None,
        }
    }

    fn hold() -> Self {
        Self {
            simultaneous_threshold_ms: SIMULTANEOUS_THRESHOLD_MS,
            alone_timeout_ms: Some(ALONE_TIMEOUT_MS),
            held_down_threshold_ms: Some(HELD_DOWN_THRESHOLD_MS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct FromModifiers {
    optional: Vec<&'static str>,
}

impl FromModifiers {
    fn any() -> Self {
        Self {
            optional: vec!["any"],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct KeyDef {
    key_code: String,
}

#[derive(Debug, Clone, Serialize)]
struct FromEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    key_code: Option<String>,
    modifiers: FromModifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    simultaneous: Option<Vec<KeyDef>>,
}

impl FromEvent {
    fn simultaneous(chord: &[String]) -> Self {
        Self {
            key_code: None,
            modifiers: FromModifiers::any(),
            simultaneous: Some(
                chord
                    .iter()
                    .map(|key| KeyDef {
                        key_code: key.clone(),
                    })
                    .collect(),
            ),
        }
    }

    fn single(key: &str) -> Self {
        Self {
            key_code: Some(key.to_string()),
            modifiers: FromModifiers::any(),
            simultaneous: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SetVariable {
    name: String,
    value: u8,
}

#[derive(Debug, Clone, Serialize)]
struct SetVariableEntry {
    set_variable: SetVariable,
}

impl SetVariableEntry {
    fn new(name: &str, value: u8) -> Self {
        Self {
            set_variable: SetVariable {
                name: name.to_string(),
                value,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Condition {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    value: u8,
}

/// One entry in a manipulator's `to` (or `to_if_alone`) list
#[derive(Debug, Clone, Serialize)]
pub struct OutputEntry {
    pub repeat: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointing_button: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouse_key: Option<Map<String, Value>>,
    /// Custom actions serialize as `<action>: <argument>`
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl From<&OutputSpec> for OutputEntry {
    fn from(spec: &OutputSpec) -> Self {
        let mut entry = OutputEntry {
            repeat: spec.repeated(),
            key_code: None,
            modifiers: None,
            pointing_button: None,
            mouse_key: None,
            custom: Map::new(),
        };
        match spec {
            OutputSpec::Key {
                code, modifiers, ..
            } => {
                entry.key_code = Some(code.clone());
                if !modifiers.is_empty() {
                    entry.modifiers = Some(modifiers.clone());
                }
            }
            OutputSpec::Mouse { button, motion, .. } => {
                entry.pointing_button = button.clone();
                if !motion.is_empty() {
                    entry.mouse_key = Some(
                        motion
                            .iter()
                            .map(|(axis, amount)| (axis.clone(), Value::from(*amount)))
                            .collect(),
                    );
                }
            }
            OutputSpec::Custom {
                action, argument, ..
            } => {
                entry
                    .custom
                    .insert(action.clone(), Value::from(argument.clone()));
            }
        }
        entry
    }
}

/// Wire form of one manipulator
#[derive(Debug, Clone, Serialize)]
pub struct WireManipulator {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: Parameters,
    from: FromEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Vec<OutputEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_if_held_down: Option<Vec<SetVariableEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_after_key_up: Option<Vec<SetVariableEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_if_alone: Option<Vec<OutputEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditions: Option<Vec<Condition>>,
}

impl From<&Manipulator> for WireManipulator {
    fn from(manipulator: &Manipulator) -> Self {
        let entries = |outputs: &[OutputSpec]| outputs.iter().map(OutputEntry::from).collect();

        match manipulator {
            Manipulator::BasicPress(m) => WireManipulator {
                kind: "basic",
                parameters: Parameters::press(),
                from: FromEvent::simultaneous(&m.chord),
                to: Some(entries(&m.outputs)),
                to_if_held_down: None,
                to_after_key_up: None,
                to_if_alone: None,
                conditions: None,
            },
            Manipulator::HoldActivation(m) => WireManipulator {
                kind: "basic",
                parameters: Parameters::hold(),
                from: FromEvent::simultaneous(&m.hold_chord),
                to: None,
                to_if_held_down: Some(vec![SetVariableEntry::new(&m.var_name, 1)]),
                to_after_key_up: Some(vec![SetVariableEntry::new(&m.var_name, 0)]),
                to_if_alone: m.fallback_outputs.as_deref().map(entries),
                conditions: None,
            },
            Manipulator::HoldConditionedPress(m) => WireManipulator {
                kind: "basic",
                parameters: Parameters::press(),
                from: FromEvent::single(&m.press_key),
                to: Some(entries(&m.outputs)),
                to_if_held_down: None,
                to_after_key_up: None,
                to_if_alone: None,
                conditions: Some(vec![Condition {
                    kind: "variable_if",
                    name: m.var_name.clone(),
                    value: 1,
                }]),
            },
        }
    }
}

impl Document {
    /// Wrap an ordered manipulator list into the final document
    pub fn assemble(title: impl Into<String>, manipulators: &[Manipulator]) -> Self {
        Document {
            title: title.into(),
            rules: vec![Rule {
                description: "rules".to_string(),
                manipulators: manipulators.iter().map(WireManipulator::from).collect(),
            }],
        }
    }
}
