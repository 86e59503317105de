//! Export identifier generation.
//!
//! Every exported entity gets an opaque identifier that is unique within
//! one pass. Identifiers are never persisted and carry no meaning across
//! passes.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// An opaque identifier for an exported entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExportId(String);

impl ExportId {
    /// Issue a fresh identifier. UUID v4 makes collisions within a pass a
    /// non-concern, so no registry-wide collision checking is needed.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Derive a composite identifier by appending a suffix.
    ///
    /// Texture bindings are keyed as `<material-id><slot-suffix>` so that a
    /// material entry can reference them without a second lookup table.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
