pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod parse;
pub mod rules;
pub mod validate;
pub mod wasm;

pub use config::GraphOptions;
pub use error::{GraphError, ParseError, Phase};
pub use graph::{FlowGraph, StatePath, build_bundle_graphs, build_graph, build_graph_with};
pub use validate::{ValidationReport, validate_bundle, validate_json, validate_states};
