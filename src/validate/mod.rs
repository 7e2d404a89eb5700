//! Bundle validation: scaffold, job specs, flows, then each flow's states.
//!
//! Each phase runs only when every earlier phase came back clean, so a
//! report carries the findings of exactly one phase.

pub mod states;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::catalog::{FLOW, JOB_SPEC, SCAFFOLD};
use crate::error::Phase;
use crate::parse::types::{FLOW_TYPE, JOB_SPEC_TYPE};
use crate::rules::evaluate;

pub use states::{validate_definition, validate_states};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// The phase that produced `errors`; `None` when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn passed() -> Self {
        ValidationReport { valid: true, phase: None, errors: Vec::new() }
    }

    fn failed(phase: Phase, errors: Vec<String>) -> Self {
        ValidationReport { valid: false, phase: Some(phase), errors }
    }
}

/// Parse `json` and validate it. Unparseable input fails in the parse phase.
pub fn validate_json(json: &str) -> ValidationReport {
    match crate::parse::parse(json) {
        Ok(bundle) => validate_bundle(&bundle),
        Err(e) => ValidationReport::failed(Phase::Parse, vec![e.to_string()]),
    }
}

#[instrument(skip_all)]
pub fn validate_bundle(bundle: &Value) -> ValidationReport {
    let scaffold = evaluate(SCAFFOLD.as_slice(), bundle);
    if !scaffold.passed {
        debug!(errors = scaffold.errors.len(), "scaffold rejected");
        return ValidationReport::failed(Phase::Scaffold, scaffold.errors);
    }

    let mut errors = Vec::new();
    for (key, resource) in resources_of_type(bundle, JOB_SPEC_TYPE) {
        let outcome = evaluate(JOB_SPEC.as_slice(), resource);
        if !outcome.passed {
            errors.extend(outcome.prefixed(resource_name(key, resource)).errors);
        }
    }
    if !errors.is_empty() {
        return ValidationReport::failed(Phase::JobSpecs, errors);
    }

    let mut phase = Phase::Flows;
    for (key, resource) in resources_of_type(bundle, FLOW_TYPE) {
        let name = resource_name(key, resource);
        let outcome = evaluate(FLOW.as_slice(), resource);
        if !outcome.passed {
            phase = Phase::Flows;
            errors.extend(outcome.prefixed(name).errors);
            continue;
        }
        // States are only looked at while every flow seen so far is clean.
        if !errors.is_empty() {
            continue;
        }
        debug!(flow = %name, "validating states");
        let definition = &resource["properties"]["definition"];
        let outcome = validate_definition(definition);
        if !outcome.passed {
            phase = Phase::States;
            errors.extend(outcome.prefixed(name).errors);
        }
    }
    if !errors.is_empty() {
        return ValidationReport::failed(phase, errors);
    }

    ValidationReport::passed()
}

/// Resources of one `type`, in document order.
fn resources_of_type<'a>(
    bundle: &'a Value,
    resource_type: &'a str,
) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    bundle
        .get("resources")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|resources| resources.iter())
        .filter(move |(_, r)| r.get("type").and_then(Value::as_str) == Some(resource_type))
        .map(|(key, r)| (key.as_str(), r))
}

/// `properties.name`, or the resource key when that is not a string.
fn resource_name<'a>(key: &'a str, resource: &'a Value) -> &'a str {
    resource
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(key)
}
