//! Parse phase: JSON text → order-preserving `Value` or typed `Bundle`.

pub mod types;

pub use types::*;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;

/// Deserialize bundle JSON into a `Value`, keeping object key order.
pub fn parse(json: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize bundle JSON straight into the typed model.
pub fn parse_bundle(json: &str) -> Result<Bundle, ParseError> {
    Bundle::from_value(&parse(json)?)
}

impl Bundle {
    /// Convert an already-validated bundle document into the typed model.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        Bundle::deserialize(value).map_err(|e| ParseError::Shape(e.to_string()))
    }
}

impl FlowDefinition {
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        FlowDefinition::deserialize(value).map_err(|e| ParseError::Shape(e.to_string()))
    }
}
