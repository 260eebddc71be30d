//! Repository modules for survey records and the comparison scans.
//!
//! Each module adds methods to `SurveyService` via `impl SurveyService` blocks.

pub mod clause;
pub mod comparison;
pub mod organization;
pub mod question;
pub mod response;
