//! Listing helpers shared by the browse views: season grouping, free-text
//! search and in-memory pagination.

use serde::Serialize;
use std::collections::BTreeMap;

/// Items per page when the caller does not ask for a size
pub const DEFAULT_PER_PAGE: usize = 20;

/// Upper bound on a requested page size
pub const MAX_PER_PAGE: usize = 100;

// ============================================================================
// Season grouping
// ============================================================================

/// Anything that belongs to one championship season
pub trait Seasonal {
    fn season(&self) -> i32;
}

/// One season's worth of items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonGroup<T> {
    pub year: i32,
    pub races: Vec<T>,
}

/// Group items by season, newest season first
///
/// Items keep their input order inside a season.
pub fn group_races_by_year<T, I>(items: I) -> Vec<SeasonGroup<T>>
where
    T: Seasonal,
    I: IntoIterator<Item = T>,
{
    let mut by_year: BTreeMap<i32, Vec<T>> = BTreeMap::new();
    for item in items {
        by_year.entry(item.season()).or_default().push(item);
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, races)| SeasonGroup { year, races })
        .collect()
}

// ============================================================================
// Search
// ============================================================================

/// Exposes the text fields a listing search looks at
pub trait Searchable {
    fn search_fields(&self) -> Vec<String>;
}

/// Lower-cased whitespace-separated terms of a search query
pub fn search_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// True when every term occurs in at least one field, ignoring case
///
/// A query with no terms matches everything.
pub fn matches_search<S: AsRef<str>>(fields: &[S], query: &str) -> bool {
    let fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_lowercase()).collect();
    search_terms(query)
        .iter()
        .all(|term| fields.iter().any(|field| field.contains(term.as_str())))
}

/// Keep the items matching `query`; `None` or a blank query keeps everything
pub fn filter_by_search<T: Searchable>(items: Vec<T>, query: Option<&str>) -> Vec<T> {
    match query {
        Some(q) if !q.trim().is_empty() => items
            .into_iter()
            .filter(|item| matches_search(&item.search_fields(), q))
            .collect(),
        _ => items,
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Position of a page within a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page number (1-indexed)
    pub page: usize,
    pub per_page: usize,
    /// Items across all pages
    pub total: usize,
    /// Number of pages, at least 1
    pub pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// A slice of a listing plus its position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

/// Cut one page out of `items`
///
/// Out-of-range requests are clamped instead of rejected: anything below 1
/// becomes page 1 and anything past the end becomes the last page. An empty
/// listing still has a page 1.
pub fn paginate<T>(items: Vec<T>, requested_page: i64, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total = items.len();
    let pages = total.div_ceil(per_page).max(1);

    let page = if requested_page < 1 {
        1
    } else {
        usize::try_from(requested_page).unwrap_or(usize::MAX).min(pages)
    };

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        info: PageInfo {
            page,
            per_page,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        },
    }
}
