//! Gridbook Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging and error handling for the Gridbook workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`GridbookError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup shared by every binary
//! - **Types**: car catalog choice sets and submission lifecycle
//!
//! # Example
//!
//! ```no_run
//! use gridbook_common::types::EngineType;
//!
//! fn parse(raw: &str) -> gridbook_common::Result<EngineType> {
//!     raw.parse()
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{GridbookError, Result};
