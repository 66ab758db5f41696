use serde::{Deserialize, Serialize};

use aac_store::DEFAULT_CAPACITY;

/// How per-line and per-entry failures during import and export are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log a warning, skip the offending line or entry, and carry on.
    #[default]
    Lenient,
    /// Abort the whole import or export with the first error.
    Strict,
}

/// Configuration for a [`BoardController`](crate::BoardController).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Failure handling for import and export.
    pub on_error: ErrorPolicy,
    /// Initial capacity of each category store the controller creates.
    pub initial_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            on_error: ErrorPolicy::Lenient,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl BoardConfig {
    /// A configuration that aborts on the first bad line or entry.
    pub fn strict() -> Self {
        Self {
            on_error: ErrorPolicy::Strict,
            ..Default::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.on_error == ErrorPolicy::Strict
    }
}
