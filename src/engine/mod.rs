// src/engine/mod.rs

//! Field attribution engine.
//!
//! - `fields`: which names a display model exposes
//! - `attribute`: the mapping from status errors to field keys
//! - `validate`: contract checks on status reports loaded from outside
//! - `mode`: scoped vs unscoped mapping

pub mod attribute;
pub mod fields;
pub mod mode;
pub mod validate;

pub use attribute::{map_errors, map_errors_unscoped, FieldErrorMap, UNATTRIBUTED_KEY};
pub use fields::{DisplayModel, FieldSet, ModelDescriptor, Reflected};
pub use mode::MappingMode;
pub use validate::{validate_report, ReportValidation, ValidationIssue};
