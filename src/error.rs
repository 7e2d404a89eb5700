//! Error types shared across phases.
//!
//! Validation findings are not errors: they travel as strings inside
//! `rules::Outcome` and `validate::ValidationReport`. The types here cover
//! inputs that cannot be processed at all.

use serde::Serialize;
use thiserror::Error;

/// Phase of bundle validation that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Parse,
    Scaffold,
    JobSpecs,
    Flows,
    States,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Scaffold => write!(f, "Scaffold"),
            Phase::JobSpecs => write!(f, "Job Specs"),
            Phase::Flows => write!(f, "Flows"),
            Phase::States => write!(f, "States"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse bundle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bundle does not match the expected shape: {0}")]
    Shape(String),
}

/// An `ActionName` outside every known action family. Fatal for the state
/// that carries it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ActionName: {0} is not supported")]
pub struct UnsupportedAction(pub String);

/// Failures of the flow-graph builder. All of them mean the flow was not
/// validated (or failed validation) before the graph was requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("State '{from}' transitions to unknown state '{target}'")]
    UnknownState { from: String, target: String },

    #[error("Start state '{0}' does not exist")]
    UnknownStart(String),

    #[error("State '{0}' has neither Next nor End")]
    MissingTransition(String),

    #[error("Cycle detected at state '{0}'")]
    CycleDetected(String),

    #[error("Flow nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("Flow graph exceeds the maximum of {0} edges")]
    PathLimitExceeded(usize),
}
