//! State-set validation: dispatch every state to its catalog by `Type`.

use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::states::action::{ACTION, ActionKind};
use crate::catalog::states::catalog;
use crate::parse::types::StateType;
use crate::rules::{Outcome, evaluate, prefix};

/// Validate a flow definition (or Map iterator): its states, then `StartAt`.
pub fn validate_definition(definition: &Value) -> Outcome {
    let Some(states) = definition.get("States").and_then(Value::as_object) else {
        return Outcome::fail(vec!["States is not an object".to_string()]);
    };
    let mut errors = validate_states(states).errors;
    match definition.get("StartAt").and_then(Value::as_str) {
        Some(start) if !states.contains_key(start) => {
            errors.push(format!("StartAt refers to unknown state '{start}'"));
        }
        _ => {}
    }
    outcome(errors)
}

/// Validate every state of `states`, in document order.
///
/// Messages are prefixed with the state's name and deduplicated per state.
/// States are independent: one failing state does not stop the others.
pub fn validate_states(states: &Map<String, Value>) -> Outcome {
    let mut errors = Vec::new();
    for (name, body) in states {
        let Some(type_name) = body.get("Type").and_then(Value::as_str) else {
            warn!(state = %name, "state without Type");
            errors.push(format!("Missing state type for state '{name}'."));
            continue;
        };
        let Some(state_type) = StateType::from_name(type_name) else {
            warn!(state = %name, state_type = %type_name, "unknown state type");
            errors.push(format!("Invalid state type '{type_name}' for state '{name}'."));
            continue;
        };
        debug!(state = %name, %state_type, "validating state");

        let found: IndexSet<String> = validate_state(state_type, body, states)
            .into_iter()
            .collect();
        errors.extend(found.iter().map(|e| prefix(name, e)));
    }
    outcome(errors)
}

/// Unprefixed findings for one state whose type is already known.
fn validate_state(state_type: StateType, body: &Value, siblings: &Map<String, Value>) -> Vec<String> {
    let result = match state_type {
        StateType::Action => validate_action(body),
        StateType::Map => validate_map(body),
        other => evaluate(catalog(other), body),
    };
    if !result.passed {
        return result.errors;
    }
    dangling_targets(body, siblings)
}

fn validate_action(body: &Value) -> Outcome {
    // Without a usable ActionName the base rules report the problem.
    let Some(action_name) = body.get("ActionName").and_then(Value::as_str) else {
        return evaluate(ACTION.as_slice(), body);
    };
    let kind = match ActionKind::resolve(action_name) {
        Ok(kind) => kind,
        Err(unsupported) => {
            warn!(action = %action_name, "unsupported action");
            return Outcome::fail(vec![unsupported.to_string()]);
        }
    };
    let base = evaluate(ACTION.as_slice(), body);
    if !base.passed {
        return base;
    }
    evaluate(kind.parameters(), body)
}

fn validate_map(body: &Value) -> Outcome {
    let base = evaluate(catalog(StateType::Map), body);
    if !base.passed {
        return base;
    }
    match body.get("Iterator") {
        Some(iterator) => validate_definition(iterator),
        None => base,
    }
}

/// Transition targets that do not name a state of `siblings`.
fn dangling_targets(body: &Value, siblings: &Map<String, Value>) -> Vec<String> {
    let mut targets: Vec<(String, &str)> = Vec::new();
    for field in ["Next", "Default"] {
        if let Some(target) = body.get(field).and_then(Value::as_str) {
            targets.push((field.to_string(), target));
        }
    }
    for list in ["Choices", "Catch"] {
        let Some(entries) = body.get(list).and_then(Value::as_array) else {
            continue;
        };
        for (index, entry) in entries.iter().enumerate() {
            if let Some(target) = entry.get("Next").and_then(Value::as_str) {
                let context = prefix(&prefix(list, &index.to_string()), "Next");
                targets.push((context, target));
            }
        }
    }

    targets
        .into_iter()
        .filter(|(_, target)| !siblings.contains_key(*target))
        .map(|(context, target)| format!("{context} refers to unknown state '{target}'"))
        .collect()
}

fn outcome(errors: Vec<String>) -> Outcome {
    if errors.is_empty() {
        Outcome::pass()
    } else {
        Outcome::fail(errors)
    }
}
