//! Edge types handed to the renderer.
//!
//! A `StatePath` serializes as a two-element JSON array
//! `[source, target]`, e.g.
//! `[{"name":"Check","type":"Choice","branchId":-1,"childPaths":[...]},{"name":"Done","type":"Succeed"}]`.

use serde::{Deserialize, Serialize};

use crate::parse::types::StateType;

/// Branch id of a Choice state's `Default` edge.
pub const DEFAULT_BRANCH: i64 = -1;

/// Name of the synthetic node terminal states point at.
pub const END_NODE: &str = "End";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Action,
    Choice,
    Fail,
    Map,
    Pass,
    Succeed,
    Wait,
    End,
}

impl From<StateType> for NodeType {
    fn from(state_type: StateType) -> Self {
        match state_type {
            StateType::Action => NodeType::Action,
            StateType::Choice => NodeType::Choice,
            StateType::Fail => NodeType::Fail,
            StateType::Map => NodeType::Map,
            StateType::Pass => NodeType::Pass,
            StateType::Succeed => NodeType::Succeed,
            StateType::Wait => NodeType::Wait,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceState {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Choice index, Catch index, or `DEFAULT_BRANCH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    /// Edges of the nested scope: a Map iterator, or the walk from a branch target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_paths: Option<Vec<StatePath>>,
}

impl SourceState {
    pub fn new(name: &str, state_type: StateType) -> Self {
        SourceState {
            name: name.to_string(),
            node_type: state_type.into(),
            branch_id: None,
            child_paths: None,
        }
    }

    pub fn branch(mut self, branch_id: i64, child_paths: Vec<StatePath>) -> Self {
        self.branch_id = Some(branch_id);
        self.child_paths = Some(child_paths);
        self
    }

    pub fn with_children(mut self, child_paths: Vec<StatePath>) -> Self {
        self.child_paths = Some(child_paths);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetState {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl TargetState {
    pub fn new(name: &str, state_type: StateType) -> Self {
        TargetState { name: name.to_string(), node_type: state_type.into() }
    }

    pub fn end() -> Self {
        TargetState { name: END_NODE.to_string(), node_type: NodeType::End }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePath(pub SourceState, pub TargetState);

impl StatePath {
    pub fn source(&self) -> &SourceState {
        &self.0
    }

    pub fn target(&self) -> &TargetState {
        &self.1
    }
}
