// src/lib.rs

//! Maps business-layer execution statuses onto field-addressable errors.
//!
//! A status (either [`ServiceStatus`] or [`BizStatus`]) is normalised, then
//! each error is attributed to the display-model field it names, or to the
//! summary key `""` when it names none the model shows.
//!
//! ```
//! use statusmap::{map_errors, BizStatus, ModelDescriptor};
//!
//! let mut status = BizStatus::new();
//! status
//!     .add_member_error(["Email"], "Invalid format")
//!     .add_error("General failure");
//!
//! let model = ModelDescriptor::new("member", ["Name", "Email", "Phone"]);
//! let map = map_errors(&status, Some(&model), None);
//!
//! assert_eq!(map.get("Email").unwrap(), ["Invalid format"]);
//! assert_eq!(map.unattributed(), ["General failure"]);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model_state;
pub mod render;
pub mod report;
pub mod runner;
pub mod status;
pub mod util;

pub use engine::{
    map_errors, map_errors_unscoped, DisplayModel, FieldErrorMap, FieldSet, MappingMode,
    ModelDescriptor, Reflected, UNATTRIBUTED_KEY,
};
pub use model_state::{CopyErrorsExt, ModelState};
pub use report::StatusReport;
pub use status::{BizStatus, ErrorRecord, ExecutionStatus, NormalizedStatus, ServiceError, ServiceStatus};
