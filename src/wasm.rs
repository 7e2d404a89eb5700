//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::graph::{self, FlowGraph};
use crate::validate::{self, ValidationReport};

/// Validate a bundle JSON document.
/// Returns `{ valid, phase?, errors }`.
#[wasm_bindgen]
pub fn validate_bundle(json: &str) -> JsValue {
    let report = validate::validate_json(json);
    serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
}

/// Validate a bundle, then build the edge list of each of its flows.
/// Returns `{ status: "success", flows }` or `{ status: "errors", errors }`.
#[wasm_bindgen]
pub fn construct_states_flow(json: &str) -> JsValue {
    let result = construct_states_flow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn construct_states_flow_inner(json: &str) -> FlowResult {
    let ValidationReport { valid, errors, .. } = validate::validate_json(json);
    if !valid {
        return FlowResult::Errors { errors };
    }

    let bundle = match crate::parse::parse_bundle(json) {
        Ok(b) => b,
        Err(e) => return FlowResult::Errors { errors: vec![e.to_string()] },
    };

    match graph::build_bundle_graphs(&bundle) {
        Ok(flows) => FlowResult::Success { flows },
        Err(e) => FlowResult::Errors { errors: vec![e.to_string()] },
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum FlowResult {
    #[serde(rename = "success")]
    Success { flows: Vec<FlowGraph> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<String> },
}
