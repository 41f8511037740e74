//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: lenient page parameters for browse listings
//! - **filters**: allowlisted query-string filters for reference lookups
//! - **validation**: car submission field rules
//! - **ordering**: finishing-position ordering for result lists
//! - **test_helpers**: F1 fixture builders (test-only)

pub mod filters;
pub mod ordering;
pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use filters::{push_filters, select_filters, FieldFilter, MatchKind};
pub use pagination::PaginationParams;
pub use validation::FieldValidationError;
