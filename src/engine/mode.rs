// src/engine/mode.rs

use serde::{Deserialize, Serialize};

/// How a mapping call attributes errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMode {
    /// Every error goes to the summary key.
    Unscoped,
    /// Errors are matched against a display model's fields.
    Scoped,
}

impl Default for MappingMode {
    fn default() -> Self {
        MappingMode::Unscoped
    }
}

impl MappingMode {
    pub fn for_model<M: ?Sized>(model: Option<&M>) -> Self {
        if model.is_some() {
            MappingMode::Scoped
        } else {
            MappingMode::Unscoped
        }
    }
}
