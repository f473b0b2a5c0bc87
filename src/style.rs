//! Embedded stylesheet for rendered fragments.

/// Companion stylesheet for the markup the pipeline emits.
pub const STYLESHEET: &str = include_str!("style.css");
