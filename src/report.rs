// src/report.rs

//! Status report files.
//!
//! A report is one execution status serialized by the host, tagged with the
//! shape that produced it:
//!
//! ```json
//! {
//!   "kind": "biz",
//!   "valid": false,
//!   "errors": [{ "member_names": ["Email"], "message": "Invalid format" }]
//! }
//! ```
//!
//! `kind: service` reports wrap each record in `error_result`. The optional
//! `valid` flag is cross-checked by `engine::validate`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::{map_errors, map_errors_unscoped, DisplayModel, FieldErrorMap};
use crate::status::{BizStatus, ErrorRecord, ExecutionStatus, ServiceStatus};
use crate::util::read_to_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Validity as declared by the producer, if it sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,

    #[serde(flatten)]
    pub body: ReportBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportBody {
    Service(ServiceStatus),
    Biz(BizStatus),
}

impl StatusReport {
    pub fn has_errors(&self) -> bool {
        match &self.body {
            ReportBody::Service(s) => s.has_errors(),
            ReportBody::Biz(s) => ExecutionStatus::has_errors(s),
        }
    }

    /// Normalised error records, in report order.
    pub fn records(&self) -> Vec<&ErrorRecord> {
        match &self.body {
            ReportBody::Service(s) => s.normalize().errors,
            ReportBody::Biz(s) => s.normalize().errors,
        }
    }

    /// Map this report, dispatching on its shape.
    pub fn map_errors<M>(&self, display: Option<&M>, prefix: Option<&str>) -> FieldErrorMap
    where
        M: DisplayModel + ?Sized,
    {
        match &self.body {
            ReportBody::Service(s) => map_errors(s, display, prefix),
            ReportBody::Biz(s) => map_errors(s, display, prefix),
        }
    }

    pub fn map_errors_unscoped(&self) -> FieldErrorMap {
        match &self.body {
            ReportBody::Service(s) => map_errors_unscoped(s),
            ReportBody::Biz(s) => map_errors_unscoped(s),
        }
    }

    pub fn kind(&self) -> &'static str {
        match &self.body {
            ReportBody::Service(_) => "service",
            ReportBody::Biz(_) => "biz",
        }
    }
}

/// Load a report from a `.json`, `.yaml` or `.yml` file.
pub fn load_report(path: &Path) -> Result<StatusReport> {
    let raw = read_to_string(path)?;

    let report = match report_format(path) {
        Some(ReportFormat::Json) => serde_json::from_str(&raw)
            .with_context(|| format!("Report is not a valid status JSON: {}", path.display()))?,
        Some(ReportFormat::Yaml) => serde_yaml::from_str(&raw)
            .with_context(|| format!("Report is not a valid status YAML: {}", path.display()))?,
        None => bail!("Unsupported report file extension: {}", path.display()),
    };

    tracing::debug!(path = %path.display(), "loaded status report");
    Ok(report)
}

/// Collect report files under `dir`, sorted for stable output.
pub fn discover_reports(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut reports = Vec::new();

    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && report_format(entry.path()).is_some() {
            reports.push(entry.path().to_path_buf());
        }
    }

    reports.sort();
    Ok(reports)
}

enum ReportFormat {
    Json,
    Yaml,
}

fn report_format(path: &Path) -> Option<ReportFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "json" => Some(ReportFormat::Json),
        "yaml" | "yml" => Some(ReportFormat::Yaml),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ModelDescriptor;

    #[test]
    fn parses_both_shapes_to_the_same_records() {
        let service: StatusReport = serde_json::from_str(
            r#"{"kind":"service","errors":[{"error_result":{"member_names":["Email"],"message":"bad"}}]}"#,
        )
        .unwrap();
        let biz: StatusReport = serde_json::from_str(
            r#"{"kind":"biz","errors":[{"member_names":["Email"],"message":"bad"}]}"#,
        )
        .unwrap();

        assert_eq!(service.kind(), "service");
        assert_eq!(biz.kind(), "biz");
        assert_eq!(service.records(), biz.records());
        assert!(service.has_errors());
    }

    #[test]
    fn report_without_errors_maps_to_nothing() {
        let report: StatusReport = serde_yaml::from_str("kind: biz\nvalid: true\n").unwrap();
        let model = ModelDescriptor::new("member", ["Email"]);

        assert!(!report.has_errors());
        assert!(report.map_errors(Some(&model), None).is_empty());
        assert!(report.map_errors_unscoped().is_empty());
    }

    #[test]
    fn discovers_json_and_yaml_reports_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("nested/a.yml"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let found = discover_reports(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("b.json"), dir.path().join("nested/a.yml")]
        );
    }

    #[test]
    fn rejects_misspelled_keys_instead_of_dropping_errors() {
        let biz = serde_json::from_str::<StatusReport>(
            r#"{"kind":"biz","Errors":[{"member_names":["Email"],"message":"bad"}]}"#,
        );
        assert!(biz.is_err());

        let record = serde_json::from_str::<StatusReport>(
            r#"{"kind":"biz","errors":[{"memberNames":["Email"],"message":"bad"}]}"#,
        );
        assert!(record.is_err());

        let wrapper = serde_json::from_str::<StatusReport>(
            r#"{"kind":"service","errors":[{"ErrorResult":{"message":"bad"}}]}"#,
        );
        assert!(wrapper.is_err());
    }

    #[test]
    fn declared_flag_still_loads_alongside_body() {
        let report: StatusReport = serde_json::from_str(
            r#"{"kind":"service","valid":false,"errors":[{"error_result":{"message":"bad"}}]}"#,
        )
        .unwrap();
        assert_eq!(report.valid, Some(false));
        assert!(report.has_errors());
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.txt");
        std::fs::write(&path, "kind: biz").unwrap();

        let err = load_report(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported report file extension"));
    }
}
