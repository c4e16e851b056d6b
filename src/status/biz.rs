// src/status/biz.rs

use serde::{Deserialize, Serialize};

use super::{summary_message, ErrorRecord, ExecutionStatus, NormalizedStatus};

/// Status returned by the business-rule runner.
///
/// Errors are exposed directly as [`ErrorRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BizStatus {
    #[serde(default)]
    errors: Vec<ErrorRecord>,
}

impl BizStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn add_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.errors.push(ErrorRecord::new(message));
        self
    }

    pub fn add_member_error<I, S>(&mut self, members: I, message: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.push(ErrorRecord::for_members(members, message));
        self
    }

    pub fn add_validation_result(&mut self, record: ErrorRecord) -> &mut Self {
        self.errors.push(record);
        self
    }

    pub fn combine_errors(&mut self, other: &BizStatus) -> &mut Self {
        self.errors.extend(other.errors.iter().cloned());
        self
    }

    pub fn message(&self) -> String {
        summary_message(self.errors.len())
    }
}

impl FromIterator<ErrorRecord> for BizStatus {
    fn from_iter<T: IntoIterator<Item = ErrorRecord>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl ExecutionStatus for BizStatus {
    fn has_errors(&self) -> bool {
        BizStatus::has_errors(self)
    }

    fn normalize(&self) -> NormalizedStatus<'_> {
        NormalizedStatus::from_records(&self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_matches_direct_records() {
        let mut status = BizStatus::new();
        status.add_validation_result(ErrorRecord::for_members(["Name", "Unknown"], "bad"));

        let normalized = status.normalize();
        assert!(normalized.has_errors);
        assert_eq!(normalized.errors, vec![&status.errors()[0]]);
    }

    #[test]
    fn status_without_errors_normalizes_empty() {
        let status = BizStatus::new();
        let normalized = status.normalize();
        assert!(!normalized.has_errors);
        assert!(normalized.errors.is_empty());
    }

    #[test]
    fn message_reports_error_count() {
        let mut status = BizStatus::new();
        status.add_error("a").add_error("b");
        assert_eq!(status.message(), "Failed with 2 errors");
    }
}
