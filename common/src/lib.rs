//! Exam Admin Common Library
//!
//! CLIとWeb(WASM)で共有される型と正規化ロジック

pub mod types;
pub mod error;
pub mod assignment;
pub mod convocation;
pub mod display;
pub mod events;
pub mod export;

pub use types::{AggregateStats, AssignmentSummary, Candidate, ClassroomAssignment};
pub use error::{Error, Result};
pub use assignment::{
    normalize_assignment, normalize_assignments, parse_assignments_response,
    resolve_classroom_capacity, resolve_classroom_name, RawField,
};
pub use convocation::{convocation_reference, issue_all, parse_scan, read_scan, Convocation, QrPayload};
pub use events::{filter_events, paginate, parse_events, EventFilter, EventKind, ExamEvent, Page, Period};
