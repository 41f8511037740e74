//! Shared pagination utilities
//!
//! Browse listings paginate in memory after search filtering, so the request
//! side is deliberately forgiving: a missing, garbled or out-of-range `page`
//! lands on a valid page instead of failing the request.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gridbook_server::features::shared::pagination::PaginationParams;
//!
//! let params = PaginationParams::new(Some("2"), None);
//! let page = params.apply(drivers);
//! assert_eq!(page.info.page, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::aggregate::listing::{paginate, Page, DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// Common pagination request parameters
///
/// Both values are kept as raw strings so that `?page=abc` degrades to the
/// first page rather than a 400 from the query extractor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Items per page. Defaults to 20, clamped to 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
}

impl PaginationParams {
    pub fn new(page: Option<&str>, per_page: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
            per_page: per_page.map(str::to_string),
        }
    }

    /// Requested page, 1 when absent or unparsable
    ///
    /// The value is not clamped against the last page here; that needs the
    /// item count and happens in [`paginate`].
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }

    /// Items per page, defaulting to 20 and clamped to 1-100
    pub fn per_page(&self) -> usize {
        self.per_page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(|n| n.clamp(1, MAX_PER_PAGE as i64) as usize)
            .unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Cut the requested page out of a fully loaded listing
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        paginate(items, self.page(), self.per_page())
    }
}
