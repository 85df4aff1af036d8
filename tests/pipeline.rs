//! End-to-end pipeline tests: table text in, JSON document out

use chordmap::table::{parse_table, Delimiter};
use chordmap::{compile, Document, Manipulator, SpecError};
use serde_json::Value;

fn compile_csv(content: &str) -> Vec<Manipulator> {
    let table = parse_table(content, Delimiter::Comma).unwrap();
    compile(&table).unwrap()
}

fn compile_to_json(content: &str) -> String {
    let manipulators = compile_csv(content);
    let document = Document::assemble("test", &manipulators);
    serde_json::to_string_pretty(&document).unwrap()
}

fn manipulator_values(json: &str) -> Vec<Value> {
    let value: Value = serde_json::from_str(json).unwrap();
    value["rules"][0]["manipulators"]
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn compiling_twice_is_byte_identical() {
    let content = "key,modifiers,key 0,key 1,key 2\n\
                   ,,j,k,l\n\
                   escape,,press,press,\n\
                   tab,left_shift,hold,press,\n\
                   spacebar,,hold,,press\n";

    assert_eq!(compile_to_json(content), compile_to_json(content));
}

#[test]
fn hold_chord_identity_ignores_key_order() {
    // {d,f} held in one row, {f,d} in another: one shared activation
    let content = "key,key 0,key 1,key 2,key 3\n\
                   ,d,f,j,k\n\
                   left_arrow,hold,hold,press,\n\
                   right_arrow,hold,hold,,press\n";
    // Reversed hold columns
    let swapped = "key,key 0,key 1,key 2,key 3\n\
                   ,f,d,j,k\n\
                   left_arrow,hold,hold,press,\n\
                   right_arrow,hold,hold,,press\n";

    for content in [content, swapped] {
        let manipulators = compile_csv(content);
        let activations: Vec<_> = manipulators
            .iter()
            .filter_map(|m| match m {
                Manipulator::HoldActivation(a) => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(activations.len(), 1);
        assert_eq!(activations[0].var_name, "hold_df");
    }
}

#[test]
fn bucket_precedence_holds_regardless_of_chord_size() {
    // A three-key basic press must still come after every hold stanza
    let content = "key,key 0,key 1,key 2\n\
                   ,j,k,l\n\
                   escape,press,press,press\n\
                   tab,hold,press,\n";

    let manipulators = compile_csv(content);
    let kinds: Vec<u8> = manipulators
        .iter()
        .map(|m| match m {
            Manipulator::HoldActivation(_) => 0,
            Manipulator::HoldConditionedPress(_) => 1,
            Manipulator::BasicPress(_) => 2,
        })
        .collect();

    let mut sorted = kinds.clone();
    sorted.sort_unstable();
    assert_eq!(kinds, sorted);
    assert_eq!(kinds, [0, 1, 2]);
}

#[test]
fn equal_size_chords_keep_row_order() {
    let content = "key,key 0,key 1,key 2,key 3\n\
                   ,a,b,c,d\n\
                   one,press,press,,\n\
                   two,,,press,press\n";

    let manipulators = compile_csv(content);
    let codes: Vec<String> = manipulators
        .iter()
        .filter_map(|m| match m {
            Manipulator::BasicPress(b) => match &b.outputs[0] {
                chordmap::compile::OutputSpec::Key { code, .. } => Some(code.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    assert_eq!(codes, ["one", "two"]);
}

#[test]
fn larger_chords_evaluate_first_within_bucket() {
    let content = "key,key 0,key 1,key 2\n\
                   ,a,b,c\n\
                   small,press,,\n\
                   large,press,press,press\n";

    let manipulators = compile_csv(content);
    let sizes: Vec<usize> = manipulators.iter().map(Manipulator::chord_size).collect();
    assert_eq!(sizes, [3, 1]);
}

#[test]
fn press_hold_collision_gets_tap_fallback() {
    // {j,k} is both a pure press chord and a hold prefix
    let content = "key,key 0,key 1,key 2\n\
                   ,j,k,l\n\
                   escape,press,press,\n\
                   tab,hold,hold,press\n";

    let json = compile_to_json(content);
    let manipulators = manipulator_values(&json);

    // The activation carries the press outputs as to_if_alone
    let activation = manipulators
        .iter()
        .find(|m| m.get("to_if_held_down").is_some())
        .unwrap();
    assert_eq!(activation["to_if_alone"][0]["key_code"], "escape");

    // The basic press is still present, unmodified
    let basic = manipulators
        .iter()
        .find(|m| {
            m.get("conditions").is_none()
                && m.get("to_if_held_down").is_none()
                && m.get("to").is_some()
        })
        .unwrap();
    assert_eq!(basic["to"][0]["key_code"], "escape");
    assert!(basic.get("to_if_alone").is_none());
}

#[test]
fn repeated_press_shadowed_by_hold_is_rejected() {
    let content = "key,key 0,key 1,key 2\n\
                   ,j,k,l\n\
                   repeat delete_or_backspace,press,press,\n\
                   tab,hold,hold,press\n";

    let table = parse_table(content, Delimiter::Comma).unwrap();
    let err = compile(&table).unwrap_err();
    assert_eq!(
        err,
        SpecError::RepeatHoldCollision {
            chords: vec!["jk".to_string()]
        }
    );
}

#[test]
fn two_press_keys_with_hold_are_rejected() {
    let content = "key,key 0,key 1,key 2,key 3\n\
                   ,a,b,c,d\n\
                   x,hold,hold,press,press\n";

    let table = parse_table(content, Delimiter::Comma).unwrap();
    let err = compile(&table).unwrap_err();
    assert_eq!(err, SpecError::MultiPressWithHold { row: 3 });
}

#[test]
fn hold_only_row_is_rejected() {
    let content = "key,key 0,key 1\n,a,b\nx,hold,hold\n";

    let table = parse_table(content, Delimiter::Comma).unwrap();
    let err = compile(&table).unwrap_err();
    assert_eq!(err, SpecError::NoPressKeys { row: 3 });
}

#[test]
fn spec_example_press_and_shared_hold() {
    // One pure press row, then two rows sharing the same hold key
    let content = "key,key 0,key 1\n\
                   ,j,k\n\
                   x,press,press\n\
                   y,hold,press\n\
                   z,hold,press\n";

    let manipulators = compile_csv(content);

    let activations = manipulators
        .iter()
        .filter(|m| matches!(m, Manipulator::HoldActivation(_)))
        .count();
    assert_eq!(activations, 1);

    let conditioned_outputs: Vec<String> = manipulators
        .iter()
        .filter_map(|m| match m {
            Manipulator::HoldConditionedPress(c) => match &c.outputs[0] {
                chordmap::compile::OutputSpec::Key { code, .. } => Some(code.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(conditioned_outputs, ["y", "z"]);

    let basics: Vec<_> = manipulators
        .iter()
        .filter_map(|m| match m {
            Manipulator::BasicPress(b) => Some(b),
            _ => None,
        })
        .collect();
    assert_eq!(basics.len(), 1);
    assert_eq!(basics[0].chord, ["j", "k"]);
}

#[test]
fn ignored_rows_and_unknown_columns_are_skipped() {
    let content = "key,notes,ignore,key 0\n\
                   ,,,j\n\
                   x,left over,,press\n\
                   y,,skip me,press\n";

    let manipulators = compile_csv(content);
    assert_eq!(manipulators.len(), 1);
}

#[test]
fn full_document_shape() {
    let content = "key,mouse,custom action,modifiers,key 0,key 1\n\
                   ,,,,d,f\n\
                   escape,,,left_shift,press,press\n\
                   ,button 1,,,hold,press\n\
                   ,,shell_command say hi,,press,\n";

    let json = compile_to_json(content);
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "test");
    assert_eq!(value["rules"].as_array().unwrap().len(), 1);
    assert_eq!(value["rules"][0]["description"], "rules");

    let manipulators = value["rules"][0]["manipulators"].as_array().unwrap();
    assert_eq!(manipulators.len(), 4);

    // Modifiers ride on the key output entry
    let with_mods = manipulators
        .iter()
        .find(|m| m["to"][0]["key_code"] == "escape")
        .unwrap();
    assert_eq!(with_mods["to"][0]["modifiers"][0], "left_shift");

    // Mouse output under the hold condition
    let mouse = manipulators
        .iter()
        .find(|m| m["to"][0].get("pointing_button").is_some())
        .unwrap();
    assert_eq!(mouse["to"][0]["pointing_button"], "button1");
    assert_eq!(mouse["conditions"][0]["name"], "hold_d");

    // Custom action serialized under its own name
    let custom = manipulators
        .iter()
        .find(|m| m["to"][0].get("shell_command").is_some())
        .unwrap();
    assert_eq!(custom["to"][0]["shell_command"], "say hi");
}
