//! Integration tests for the parse phase: bundle JSON → typed model.

mod helpers;

use helpers::*;
use zis_bundle::ParseError;
use zis_bundle::parse::{self, Resource, State, StateType};

#[test]
fn parse_fixture_bundle() {
    let bundle = parse::parse_bundle(TICKET_SYNC).expect("Should parse successfully");
    assert_eq!(bundle.zis_template_version, "2019-10-14");
    assert_eq!(bundle.name, "ticket_sync");
    assert_eq!(bundle.resources.len(), 2);
    assert_eq!(bundle.job_specs().count(), 1);
    assert_eq!(bundle.flows().count(), 1);
    assert!(matches!(
        bundle.resources.get("on_ticket_created"),
        Some(Resource::JobSpec { .. })
    ));
}

#[test]
fn states_keep_document_order() {
    let bundle = parse::parse_bundle(TICKET_SYNC).expect("Should parse");
    let flow = bundle.flows().next().expect("one flow");
    let names: Vec<&str> = flow.definition.states.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "LoadSettings",
            "Enabled?",
            "NotifyRecipients",
            "ShapePayload",
            "Pause",
            "Done",
            "Skipped",
            "Failed",
        ]
    );
}

#[test]
fn state_types_and_transitions() {
    let bundle = parse::parse_bundle(TICKET_SYNC).expect("Should parse");
    let states = &bundle.flows().next().expect("one flow").definition.states;

    let types: Vec<StateType> = states.values().map(State::state_type).collect();
    for state_type in StateType::ALL {
        assert!(types.contains(&state_type), "missing {state_type}");
    }

    assert_eq!(states["LoadSettings"].next(), Some("Enabled?"));
    assert!(states["Done"].is_terminal());
    assert!(states["Skipped"].is_terminal());
    assert!(!states["Enabled?"].is_terminal());
    assert_eq!(states["ShapePayload"].catchers()[0].next, "Failed");

    let State::Map(map) = &states["NotifyRecipients"] else {
        panic!("NotifyRecipients should be a Map state");
    };
    assert_eq!(map.iterator.start_at, "PostMessage");
}

#[test]
fn parse_invalid_json_returns_error() {
    let result = parse::parse("not valid json");
    assert!(matches!(result, Err(ParseError::Json(_))));
}

#[test]
fn unknown_resource_type_is_a_shape_error() {
    let json = r#"{
        "zis_template_version": "2019-10-14",
        "name": "b",
        "resources": { "x": { "type": "ZIS::Connection", "properties": {} } }
    }"#;
    assert!(matches!(parse::parse_bundle(json), Err(ParseError::Shape(_))));
}

#[test]
fn state_type_names_round_trip() {
    for state_type in StateType::ALL {
        assert_eq!(StateType::from_name(state_type.as_str()), Some(state_type));
    }
    assert_eq!(StateType::from_name("Parallel"), None);
}
