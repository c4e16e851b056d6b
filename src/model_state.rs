// src/model_state.rs

//! Presentation-side error dictionary.
//!
//! `ModelState` is what a page renders from: field key to messages, with
//! `""` holding the summary. Mapping results are merged in pair by pair, so
//! several mapping calls accumulate into one dictionary.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::{map_errors, map_errors_unscoped, DisplayModel, FieldErrorMap, UNATTRIBUTED_KEY};
use crate::status::ExecutionStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Append every `(key, message)` pair of `map`. Nothing is replaced.
    pub fn merge(&mut self, map: FieldErrorMap) {
        for (key, messages) in map {
            for message in messages {
                self.add_model_error(key.as_str(), message);
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors_for(&self, key: &str) -> &[String] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Messages not attributed to any field.
    pub fn summary(&self) -> &[String] {
        self.errors_for(UNATTRIBUTED_KEY)
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Copy a status' errors into a [`ModelState`].
///
/// Implemented for every [`ExecutionStatus`]; both methods do nothing when
/// the status carries no errors.
pub trait CopyErrorsExt {
    /// Errors naming a field of `display` go next to that field, the rest go
    /// to the summary. `None` for `display` behaves like
    /// [`copy_errors_to_summary`](CopyErrorsExt::copy_errors_to_summary).
    fn copy_errors_to_model_state<M>(
        &self,
        state: &mut ModelState,
        display: Option<&M>,
        prefix: Option<&str>,
    ) where
        M: DisplayModel + ?Sized;

    /// For pages that do not show the fields: everything goes to the summary.
    fn copy_errors_to_summary(&self, state: &mut ModelState);
}

impl<S: ExecutionStatus + ?Sized> CopyErrorsExt for S {
    fn copy_errors_to_model_state<M>(
        &self,
        state: &mut ModelState,
        display: Option<&M>,
        prefix: Option<&str>,
    ) where
        M: DisplayModel + ?Sized,
    {
        state.merge(map_errors(self, display, prefix));
    }

    fn copy_errors_to_summary(&self, state: &mut ModelState) {
        state.merge(map_errors_unscoped(self));
    }
}
