//! Typed model of a ZIS bundle.
//!
//! These types are the serde target for bundle JSON that has already passed
//! validation. Validation itself runs on raw `serde_json::Value` so that it
//! can describe documents these types would refuse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JOB_SPEC_TYPE: &str = "ZIS::JobSpec";
pub const FLOW_TYPE: &str = "ZIS::Flow";

// =============================================================================
// BUNDLE SCAFFOLD
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub zis_template_version: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resources: IndexMap<String, Resource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Resource {
    #[serde(rename = "ZIS::JobSpec")]
    JobSpec { properties: JobSpec },
    #[serde(rename = "ZIS::Flow")]
    Flow { properties: Flow },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub event_source: String,
    pub event_type: String,
    pub flow_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    pub definition: FlowDefinition,
}

/// A start state plus the states it can reach. Also the shape of a Map
/// state's `Iterator`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlowDefinition {
    pub start_at: String,
    pub states: IndexMap<String, State>,
}

impl Bundle {
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.resources.values().filter_map(|r| match r {
            Resource::Flow { properties } => Some(properties),
            Resource::JobSpec { .. } => None,
        })
    }

    pub fn job_specs(&self) -> impl Iterator<Item = &JobSpec> {
        self.resources.values().filter_map(|r| match r {
            Resource::JobSpec { properties } => Some(properties),
            Resource::Flow { .. } => None,
        })
    }
}

// =============================================================================
// STATES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    Action,
    Choice,
    Fail,
    Map,
    Pass,
    Succeed,
    Wait,
}

impl StateType {
    pub const ALL: [StateType; 7] = [
        StateType::Action,
        StateType::Choice,
        StateType::Fail,
        StateType::Map,
        StateType::Pass,
        StateType::Succeed,
        StateType::Wait,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StateType::Action => "Action",
            StateType::Choice => "Choice",
            StateType::Fail => "Fail",
            StateType::Map => "Map",
            StateType::Pass => "Pass",
            StateType::Succeed => "Succeed",
            StateType::Wait => "Wait",
        }
    }
}

impl std::fmt::Display for StateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum State {
    Action(ActionState),
    Choice(ChoiceState),
    Fail(FailState),
    Map(MapState),
    Pass(PassState),
    Succeed(SucceedState),
    Wait(WaitState),
}

impl State {
    pub fn state_type(&self) -> StateType {
        match self {
            State::Action(_) => StateType::Action,
            State::Choice(_) => StateType::Choice,
            State::Fail(_) => StateType::Fail,
            State::Map(_) => StateType::Map,
            State::Pass(_) => StateType::Pass,
            State::Succeed(_) => StateType::Succeed,
            State::Wait(_) => StateType::Wait,
        }
    }

    pub fn next(&self) -> Option<&str> {
        match self {
            State::Action(s) => s.next.as_deref(),
            State::Map(s) => s.next.as_deref(),
            State::Pass(s) => s.next.as_deref(),
            State::Wait(s) => s.next.as_deref(),
            State::Choice(_) | State::Fail(_) | State::Succeed(_) => None,
        }
    }

    /// Terminal either by type or by `End: true`.
    pub fn is_terminal(&self) -> bool {
        match self {
            State::Succeed(_) | State::Fail(_) => true,
            State::Action(s) => s.end == Some(true),
            State::Map(s) => s.end == Some(true),
            State::Pass(s) => s.end == Some(true),
            State::Wait(s) => s.end == Some(true),
            State::Choice(_) => false,
        }
    }

    pub fn catchers(&self) -> &[Catcher] {
        match self {
            State::Action(s) => &s.catch,
            State::Map(s) => &s.catch,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Catcher {
    #[serde(default)]
    pub error_equals: Vec<String>,
    pub next: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionState {
    pub action_name: String,
    #[serde(default)]
    pub parameters: Option<Value>,
    pub result_path: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub end: Option<bool>,
    #[serde(default)]
    pub catch: Vec<Catcher>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceState {
    #[serde(default)]
    pub comment: Option<String>,
    pub choices: Vec<ChoiceRule>,
    #[serde(default)]
    pub default: Option<String>,
}

/// One entry of `Choices`: its target plus the condition keys
/// (`Variable` + operator, or `And` / `Or` / `Not`), kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceRule {
    pub next: String,
    #[serde(flatten)]
    pub condition: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailState {
    pub error: String,
    pub cause: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapState {
    #[serde(default)]
    pub input_path: Option<String>,
    pub items_path: String,
    pub iterator: FlowDefinition,
    pub result_path: String,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub end: Option<bool>,
    #[serde(default)]
    pub catch: Vec<Catcher>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PassState {
    #[serde(default)]
    pub result: Option<Value>,
    pub result_path: String,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub end: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SucceedState {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaitState {
    #[serde(default)]
    pub seconds: Option<f64>,
    #[serde(default)]
    pub seconds_path: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub end: Option<bool>,
}
