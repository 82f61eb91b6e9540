//! Error types.
//!
//! Interaction never fails: clicks on inert nodes are silent no-ops. Errors
//! only come out of building a tree from data.

use thiserror::Error;

use crate::key::TreeKey;

/// Errors raised while loading or building a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Nesting went past the configured depth bound.
    #[error("Tree nesting exceeds the maximum depth of {limit}")]
    DepthExceeded {
        /// The configured bound.
        limit: usize,
    },

    /// Two nodes carry the same key (only with `validate_keys`).
    #[error("Duplicate node key '{0}'")]
    DuplicateKey(TreeKey),

    /// A node carries no key (only with `validate_keys`).
    #[error("Node at {path} has no key")]
    MissingKey {
        /// Sibling positions from the top level, e.g. `0/2/1`.
        path: String,
    },

    /// The tree data could not be parsed.
    #[error("Invalid tree data: {0}")]
    Parse(#[from] serde_json::Error),
}
