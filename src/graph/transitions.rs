//! petgraph view of one scope's transitions (a flow, or a Map iterator).
//!
//! Only the transitions the walk in `walk.rs` follows become edges: a
//! Map's `Catch` and the `Catch` of an ending state are never drawn, so
//! they cannot make the walk loop.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Control, DfsEvent, depth_first_search};

use crate::error::GraphError;
use crate::parse::types::{FlowDefinition, State};

pub struct TransitionGraph {
    pub graph: DiGraph<String, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
    pub start: NodeIndex,
}

impl TransitionGraph {
    pub fn build(definition: &FlowDefinition) -> Result<Self, GraphError> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for name in definition.states.keys() {
            let idx = graph.add_node(name.clone());
            node_indices.insert(name.clone(), idx);
        }

        let Some(&start) = node_indices.get(&definition.start_at) else {
            return Err(GraphError::UnknownStart(definition.start_at.clone()));
        };

        for (name, state) in &definition.states {
            let targets = followed_targets(state);
            if targets.is_empty() && !state.is_terminal() {
                return Err(GraphError::MissingTransition(name.clone()));
            }
            let source = node_indices[name];
            for target in targets {
                let Some(&target_idx) = node_indices.get(target) else {
                    return Err(GraphError::UnknownState {
                        from: name.clone(),
                        target: target.to_string(),
                    });
                };
                graph.add_edge(source, target_idx, ());
            }
        }

        Ok(TransitionGraph { graph, node_indices, start })
    }

    /// Fails on the first state found on a cycle reachable from the start
    /// state, self-loops included. Loops among unreachable states are
    /// never walked and pass.
    pub fn check_acyclic(&self) -> Result<(), GraphError> {
        let looped = depth_first_search(&self.graph, Some(self.start), |event| match event {
            DfsEvent::BackEdge(_, target) => Control::Break(target),
            _ => Control::Continue,
        });
        match looped.break_value() {
            Some(idx) => Err(GraphError::CycleDetected(self.graph[idx].clone())),
            None => Ok(()),
        }
    }
}

/// State names the walk hands control to from `state`.
fn followed_targets(state: &State) -> Vec<&str> {
    match state {
        State::Choice(choice) => choice
            .default
            .as_deref()
            .into_iter()
            .chain(choice.choices.iter().map(|c| c.next.as_str()))
            .collect(),
        _ if state.is_terminal() => Vec::new(),
        State::Map(map) => map.next.as_deref().into_iter().collect(),
        _ => state
            .next()
            .into_iter()
            .chain(state.catchers().iter().map(|c| c.next.as_str()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(value: serde_json::Value) -> FlowDefinition {
        FlowDefinition::from_value(&value).expect("definition")
    }

    #[test]
    fn choice_loop_is_a_cycle() {
        let def = definition(json!({
            "StartAt": "Poll",
            "States": {
                "Poll": { "Type": "Wait", "Seconds": 5, "Next": "Ready?" },
                "Ready?": {
                    "Type": "Choice",
                    "Choices": [{ "Variable": "$.done", "BooleanEquals": true, "Next": "Done" }],
                    "Default": "Poll"
                },
                "Done": { "Type": "Succeed" }
            }
        }));
        let graph = TransitionGraph::build(&def).expect("graph");
        assert!(matches!(graph.check_acyclic(), Err(GraphError::CycleDetected(_))));
    }

    #[test]
    fn loops_off_the_walked_path_are_ignored() {
        let def = definition(json!({
            "StartAt": "Start",
            "States": {
                "Start": { "Type": "Pass", "ResultPath": "$.a", "Next": "Done" },
                "Done": { "Type": "Succeed" },
                "OrphanA": { "Type": "Pass", "ResultPath": "$.b", "Next": "OrphanB" },
                "OrphanB": { "Type": "Pass", "ResultPath": "$.c", "Next": "OrphanA" }
            }
        }));
        let graph = TransitionGraph::build(&def).expect("graph");
        assert_eq!(graph.check_acyclic(), Ok(()));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let def = definition(json!({
            "StartAt": "Spin",
            "States": {
                "Spin": { "Type": "Pass", "ResultPath": "$.a", "Next": "Spin" }
            }
        }));
        let graph = TransitionGraph::build(&def).expect("graph");
        assert_eq!(
            graph.check_acyclic(),
            Err(GraphError::CycleDetected("Spin".to_string()))
        );
    }

    #[test]
    fn unknown_start_is_rejected() {
        let def = definition(json!({
            "StartAt": "Missing",
            "States": { "Done": { "Type": "Succeed" } }
        }));
        assert_eq!(
            TransitionGraph::build(&def).err(),
            Some(GraphError::UnknownStart("Missing".to_string()))
        );
    }
}
