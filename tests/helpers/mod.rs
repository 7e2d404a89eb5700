#![allow(dead_code)]

use serde_json::{Map, Value, json};
use zis_bundle::parse::FlowDefinition;

// =============================================================================
// Bundle builders
// =============================================================================

pub const TICKET_SYNC: &str = include_str!("../fixtures/ticket_sync_bundle.json");

pub fn ticket_sync() -> Value {
    zis_bundle::parse::parse(TICKET_SYNC).expect("fixture parses")
}

/// Smallest bundle that passes the scaffold and job-spec phases, with one
/// flow whose definition is `definition`.
pub fn bundle_with_definition(definition: Value) -> Value {
    json!({
        "zis_template_version": "2019-10-14",
        "name": "test_bundle",
        "resources": {
            "job": {
                "type": "ZIS::JobSpec",
                "properties": {
                    "name": "job",
                    "event_source": "support",
                    "event_type": "ticket.TicketCreated",
                    "flow_name": "zis:test_bundle:flow:main"
                }
            },
            "main": {
                "type": "ZIS::Flow",
                "properties": { "name": "main", "definition": definition }
            }
        }
    })
}

/// Bundle whose flow starts at the first of `states`.
pub fn bundle_with_states(states: Value) -> Value {
    let start = first_key(&states);
    bundle_with_definition(json!({ "StartAt": start, "States": states }))
}

// =============================================================================
// State builders
// =============================================================================

pub fn states(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("states must be an object")
}

pub fn definition(start: &str, states: Value) -> FlowDefinition {
    FlowDefinition::from_value(&json!({ "StartAt": start, "States": states }))
        .expect("definition deserializes")
}

pub fn succeed() -> Value {
    json!({ "Type": "Succeed" })
}

pub fn action(action_name: &str, parameters: Value) -> Value {
    json!({
        "Type": "Action",
        "ActionName": action_name,
        "Parameters": parameters,
        "ResultPath": "$.result",
        "Next": "Done"
    })
}

fn first_key(states: &Value) -> String {
    states
        .as_object()
        .and_then(|m| m.keys().next().cloned())
        .expect("at least one state")
}
