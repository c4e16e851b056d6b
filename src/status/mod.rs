// src/status/mod.rs

//! Status adapter.
//!
//! Business operations report their outcome through one of two independently
//! evolved status shapes:
//! - [`ServiceStatus`]: service layer, each error wrapped in a [`ServiceError`]
//! - [`BizStatus`]: business-rule runner, errors exposed directly
//!
//! Both normalise into a [`NormalizedStatus`] through the [`ExecutionStatus`]
//! trait. Callers pick the shape statically; nothing here inspects types at
//! runtime.

use serde::{Deserialize, Serialize};

pub mod biz;
pub mod service;

pub use biz::BizStatus;
pub use service::{ServiceError, ServiceStatus};

/// One reported problem, optionally tied to one or more named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorRecord {
    /// Fields the error pertains to. Empty means "no specific field".
    ///
    /// Order is preserved as given by the producer.
    #[serde(default)]
    pub member_names: Vec<String>,

    /// Human-readable message.
    pub message: String,
}

impl ErrorRecord {
    /// An error that applies to no specific field.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            member_names: Vec::new(),
            message: message.into(),
        }
    }

    /// An error tied to the given member names.
    pub fn for_members<I, S>(members: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut member_names: Vec<String> = Vec::new();
        for name in members {
            let name = name.into();
            if !member_names.contains(&name) {
                member_names.push(name);
            }
        }

        Self {
            member_names,
            message: message.into(),
        }
    }

    pub fn has_members(&self) -> bool {
        !self.member_names.is_empty()
    }
}

/// Uniform view over either status shape.
///
/// Contract: when `has_errors` is false, `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStatus<'a> {
    pub has_errors: bool,
    pub errors: Vec<&'a ErrorRecord>,
}

impl<'a> NormalizedStatus<'a> {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ErrorRecord>,
    {
        let errors: Vec<&'a ErrorRecord> = records.into_iter().collect();
        Self {
            has_errors: !errors.is_empty(),
            errors,
        }
    }
}

/// Outcome report produced by a business-logic operation.
///
/// Implemented once per producer shape.
pub trait ExecutionStatus {
    fn has_errors(&self) -> bool;

    fn normalize(&self) -> NormalizedStatus<'_>;
}

impl<S: ExecutionStatus + ?Sized> ExecutionStatus for &S {
    fn has_errors(&self) -> bool {
        (**self).has_errors()
    }

    fn normalize(&self) -> NormalizedStatus<'_> {
        (**self).normalize()
    }
}

/// Summary line shared by both shapes.
pub(crate) fn summary_message(error_count: usize) -> String {
    match error_count {
        0 => "Success".to_string(),
        1 => "Failed with 1 error".to_string(),
        n => format!("Failed with {} errors", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_members_drops_repeated_names_keeping_first_position() {
        let record = ErrorRecord::for_members(["Email", "Name", "Email"], "bad");
        assert_eq!(record.member_names, vec!["Email", "Name"]);
    }

    #[test]
    fn new_record_has_no_members() {
        let record = ErrorRecord::new("General failure");
        assert!(!record.has_members());
        assert_eq!(record.message, "General failure");
    }

    #[test]
    fn normalized_from_empty_records_has_no_errors() {
        let normalized = NormalizedStatus::from_records(std::iter::empty());
        assert!(!normalized.has_errors);
        assert!(normalized.errors.is_empty());
    }

    #[test]
    fn summary_message_counts_errors() {
        assert_eq!(summary_message(0), "Success");
        assert_eq!(summary_message(1), "Failed with 1 error");
        assert_eq!(summary_message(3), "Failed with 3 errors");
    }
}
