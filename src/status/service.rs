// src/status/service.rs

use serde::{Deserialize, Serialize};

use super::{summary_message, ErrorRecord, ExecutionStatus, NormalizedStatus};

/// Service-layer error: the record is nested inside a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceError {
    pub error_result: ErrorRecord,
}

impl From<ErrorRecord> for ServiceError {
    fn from(error_result: ErrorRecord) -> Self {
        Self { error_result }
    }
}

/// Status returned by the service layer.
///
/// Validity is derived from the error list, so `is_valid()` is true exactly
/// when there are no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceStatus {
    #[serde(default)]
    errors: Vec<ServiceError>,
}

impl ServiceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ServiceError] {
        &self.errors
    }

    /// Add an error that applies to no specific field.
    pub fn add_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.errors.push(ErrorRecord::new(message).into());
        self
    }

    /// Add an error tied to one or more member names.
    pub fn add_member_error<I, S>(&mut self, members: I, message: impl Into<String>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.push(ErrorRecord::for_members(members, message).into());
        self
    }

    /// Append another status' errors after this one's, preserving order.
    pub fn combine_errors(&mut self, other: &ServiceStatus) -> &mut Self {
        self.errors.extend(other.errors.iter().cloned());
        self
    }

    pub fn message(&self) -> String {
        summary_message(self.errors.len())
    }
}

impl FromIterator<ErrorRecord> for ServiceStatus {
    fn from_iter<T: IntoIterator<Item = ErrorRecord>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().map(ServiceError::from).collect(),
        }
    }
}

impl ExecutionStatus for ServiceStatus {
    fn has_errors(&self) -> bool {
        !self.is_valid()
    }

    fn normalize(&self) -> NormalizedStatus<'_> {
        NormalizedStatus::from_records(self.errors.iter().map(|e| &e.error_result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_is_valid() {
        let status = ServiceStatus::new();
        assert!(status.is_valid());
        assert!(!status.has_errors());
        assert_eq!(status.message(), "Success");
    }

    #[test]
    fn normalize_unwraps_error_results_in_order() {
        let mut status = ServiceStatus::new();
        status
            .add_member_error(["Email"], "Invalid format")
            .add_error("General failure");

        let normalized = status.normalize();
        assert!(normalized.has_errors);
        let messages: Vec<&str> = normalized
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages, vec!["Invalid format", "General failure"]);
        assert_eq!(normalized.errors[0].member_names, vec!["Email"]);
    }

    #[test]
    fn combine_errors_appends_other_status() {
        let mut first = ServiceStatus::new();
        first.add_error("one");
        let mut second = ServiceStatus::new();
        second.add_error("two");

        first.combine_errors(&second);
        assert_eq!(first.errors().len(), 2);
        assert_eq!(first.errors()[1].error_result.message, "two");
    }

    #[test]
    fn deserializes_wrapped_records() {
        let raw = r#"{"errors":[{"error_result":{"member_names":["Name"],"message":"required"}}]}"#;
        let status: ServiceStatus = serde_json::from_str(raw).unwrap();
        assert!(!status.is_valid());
        assert_eq!(status.errors()[0].error_result.member_names, vec!["Name"]);
    }
}
