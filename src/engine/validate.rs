// src/engine/validate.rs

//! Contract checks for status reports that come from outside the process.
//!
//! Statuses built in code uphold their invariants by construction. Reports
//! read from files do not, so they are checked before any mapping happens.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::report::StatusReport;
use crate::status::ErrorRecord;

#[derive(Debug, Clone, Serialize)]
pub struct ReportValidation {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub code: &'static str,
    pub message: String,
}

impl ReportValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn push_error(&mut self, code: &'static str, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue {
            code,
            message: message.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.valid && self.errors.is_empty()
    }
}

pub fn validate_report(report: &StatusReport) -> ReportValidation {
    let mut result = ReportValidation::ok();
    let records = report.records();

    validate_flag(report.valid, records.len(), &mut result);

    for (index, record) in records.iter().enumerate() {
        validate_record(index, record, &mut result);
    }

    result
}

/* ---------------- status flag ---------------- */

fn validate_flag(declared: Option<bool>, error_count: usize, result: &mut ReportValidation) {
    let declared = match declared {
        Some(v) => v,
        None => return,
    };

    let derived = error_count == 0;
    if declared != derived {
        result.push_error(
            "STATUS_FLAG_MISMATCH",
            format!(
                "Report declares valid = {} but carries {} error(s)",
                declared, error_count
            ),
        );
    }
}

/* ---------------- records ---------------- */

fn validate_record(index: usize, record: &ErrorRecord, result: &mut ReportValidation) {
    if record.message.trim().is_empty() {
        result.push_error(
            "ERROR_MESSAGE_EMPTY",
            format!("Error #{} has an empty message", index),
        );
    }

    let mut seen = BTreeSet::new();
    for name in &record.member_names {
        if name.trim().is_empty() {
            result.push_error(
                "MEMBER_NAME_EMPTY",
                format!("Error #{} lists an empty member name", index),
            );
            continue;
        }

        if !seen.insert(name.as_str()) {
            result.push_error(
                "MEMBER_NAME_DUPLICATE",
                format!("Error #{} lists member '{}' more than once", index, name),
            );
        }
    }
}
