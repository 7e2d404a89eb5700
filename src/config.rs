//! Tunables for validation and graph construction.

use serde::{Deserialize, Serialize};

/// The only `zis_template_version` a bundle may declare.
pub const SUPPORTED_TEMPLATE_VERSION: &str = "2019-10-14";

/// Prefix that marks a string as a reference into flow data.
pub const REFERENCE_PATH_PREFIX: &str = "$.";

/// Separator placed between a context name and the message it qualifies.
pub const MESSAGE_SEPARATOR: &str = " => ";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphOptions {
    /// Maximum nesting of branch and iterator scopes the builder will follow.
    pub max_depth: usize,
    /// Maximum number of edges in one flow's output, nested edges included.
    /// Every branch re-walks its subtree, so Choice states whose branches
    /// converge grow the output exponentially with their count.
    pub max_paths: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions { max_depth: 256, max_paths: 10_000 }
    }
}
