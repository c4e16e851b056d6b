// src/engine/attribute.rs

//! Field attribution.
//!
//! Turns the normalised error list of an [`ExecutionStatus`] into a
//! [`FieldErrorMap`]. Errors whose member names match a field of the display
//! model land under that field's key; everything else lands under the
//! unattributed key `""` so it can still be shown in a summary.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::fields::{DisplayModel, FieldSet};
use crate::status::{ErrorRecord, ExecutionStatus};

/// Key for errors not attributed to any displayed field.
pub const UNATTRIBUTED_KEY: &str = "";

/// Field key to ordered list of messages.
///
/// Built fresh per mapping call; the caller owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrorMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl FieldErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under `key`. Existing messages are kept.
    pub fn push(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn unattributed(&self) -> &[String] {
        self.get(UNATTRIBUTED_KEY).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages across all keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.entries
    }
}

impl IntoIterator for FieldErrorMap {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Map a status onto the fields of `display`.
///
/// - No errors: returns an empty map without touching `display`.
/// - `display` is `None`: every error goes under `""`.
/// - Otherwise each member name is resolved on its own, so one error can
///   land under several keys (including `""` for unknown names).
///
/// A `prefix` of `Some("Model")` turns key `Email` into `Model.Email`. An
/// empty prefix is ignored.
pub fn map_errors<S, M>(status: &S, display: Option<&M>, prefix: Option<&str>) -> FieldErrorMap
where
    S: ExecutionStatus + ?Sized,
    M: DisplayModel + ?Sized,
{
    if !status.has_errors() {
        return FieldErrorMap::new();
    }

    let normalized = status.normalize();
    let scoped = display.is_some();

    let map = match display {
        Some(model) => {
            let fields = model.field_names();
            let prefix = prefix.filter(|p| !p.is_empty());
            attribute_scoped(&normalized.errors, &fields, prefix)
        }
        None => attribute_unscoped(&normalized.errors),
    };

    tracing::debug!(
        records = normalized.errors.len(),
        keys = map.entries.len(),
        messages = map.len(),
        scoped,
        "mapped status errors"
    );

    map
}

/// Map a status for a summary-only surface: every error goes under `""`.
pub fn map_errors_unscoped<S>(status: &S) -> FieldErrorMap
where
    S: ExecutionStatus + ?Sized,
{
    if !status.has_errors() {
        return FieldErrorMap::new();
    }

    let normalized = status.normalize();
    attribute_unscoped(&normalized.errors)
}

fn attribute_unscoped(errors: &[&ErrorRecord]) -> FieldErrorMap {
    let mut map = FieldErrorMap::new();
    for error in errors {
        map.push(UNATTRIBUTED_KEY, error.message.as_str());
    }
    map
}

fn attribute_scoped(
    errors: &[&ErrorRecord],
    fields: &FieldSet<'_>,
    prefix: Option<&str>,
) -> FieldErrorMap {
    let mut map = FieldErrorMap::new();

    for error in errors {
        if !error.has_members() {
            map.push(UNATTRIBUTED_KEY, error.message.as_str());
            continue;
        }

        for name in &error.member_names {
            let key = resolve_key(name, fields, prefix);
            if key.is_empty() {
                tracing::trace!(member = %name, "member not on display model");
            }
            map.push(key, error.message.as_str());
        }
    }

    map
}

fn resolve_key(name: &str, fields: &FieldSet<'_>, prefix: Option<&str>) -> String {
    if !fields.contains(name) {
        return UNATTRIBUTED_KEY.to_string();
    }

    match prefix {
        Some(p) => format!("{}.{}", p, name),
        None => name.to_string(),
    }
}
