//! Flow-graph builder: a validated flow → ordered edge list for the renderer.

pub mod path;
pub mod transitions;
mod walk;

pub use path::{DEFAULT_BRANCH, END_NODE, NodeType, SourceState, StatePath, TargetState};
pub use transitions::TransitionGraph;

use serde::Serialize;
use tracing::instrument;

use crate::config::GraphOptions;
use crate::error::GraphError;
use crate::parse::types::{Bundle, FlowDefinition};
use walk::Walker;

/// Edge list of one flow resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub flow_name: String,
    pub paths: Vec<StatePath>,
}

pub fn build_graph(definition: &FlowDefinition) -> Result<Vec<StatePath>, GraphError> {
    build_graph_with(definition, &GraphOptions::default())
}

/// Walks `definition` from `StartAt`. References and cycles are checked per
/// scope before walking it, so a bad flow yields an error instead of an
/// unbounded walk.
#[instrument(skip_all, fields(start = %definition.start_at))]
pub fn build_graph_with(
    definition: &FlowDefinition,
    options: &GraphOptions,
) -> Result<Vec<StatePath>, GraphError> {
    Walker::new(options).scope(definition, 0)
}

/// One graph per flow resource, in resource order.
pub fn build_bundle_graphs(bundle: &Bundle) -> Result<Vec<FlowGraph>, GraphError> {
    build_bundle_graphs_with(bundle, &GraphOptions::default())
}

pub fn build_bundle_graphs_with(
    bundle: &Bundle,
    options: &GraphOptions,
) -> Result<Vec<FlowGraph>, GraphError> {
    bundle
        .flows()
        .map(|flow| {
            Ok(FlowGraph {
                flow_name: flow.name.clone(),
                paths: build_graph_with(&flow.definition, options)?,
            })
        })
        .collect()
}
