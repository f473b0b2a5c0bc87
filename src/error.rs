//! Typed errors for the two hard preconditions of the render pipeline.
//!
//! Every other malformed-input case degrades silently to plain paragraph
//! rendering (spec.md §7); only a truncated table span or an empty list run
//! surface as a [`RenderError`].

use thiserror::Error;

/// Failure raised when a structural precondition is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A table span supplied fewer than the required header and alignment
    /// lines.
    #[error("truncated table span: expected at least 2 lines, found {lines}")]
    TruncatedTable {
        /// Number of lines actually present in the span.
        lines: usize,
    },

    /// A list run was assembled without any items.
    #[error("empty list run: a list must contain at least one item")]
    EmptyListRun,
}
