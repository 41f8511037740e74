//! Allowlisted query-string filters for the reference lookup endpoints
//!
//! Every reference entity declares which query keys it understands and what
//! each one compares against. Keys outside the allowlist never reach SQL, and
//! values are always bound, never spliced into the statement text.

use sqlx::{Postgres, QueryBuilder};
use std::collections::HashMap;

/// How a filter value is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Text equality against the column's text form
    Exact,
    /// Case-insensitive containment
    Substring,
}

/// One permitted query key
#[derive(Debug, Clone, Copy)]
pub struct FieldFilter {
    pub key: &'static str,
    /// SQL expressions compared against the value; a row matches when any
    /// of them does
    pub columns: &'static [&'static str],
    pub kind: MatchKind,
}

impl FieldFilter {
    pub const fn exact(key: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            key,
            columns,
            kind: MatchKind::Exact,
        }
    }

    pub const fn substring(key: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            key,
            columns,
            kind: MatchKind::Substring,
        }
    }
}

/// Pick the allowlisted keys present in `params`, in allowlist order
///
/// Blank values count as absent. Unknown keys are dropped silently.
pub fn select_filters<'a>(
    allowlist: &'a [FieldFilter],
    params: &HashMap<String, String>,
) -> Vec<(&'a FieldFilter, String)> {
    allowlist
        .iter()
        .filter_map(|filter| {
            params
                .get(filter.key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| (filter, v.to_string()))
        })
        .collect()
}

/// Escape LIKE metacharacters so user input matches literally
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append `WHERE ... AND ...` for the selected filters
///
/// Does nothing when `selected` is empty.
pub fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, selected: &[(&FieldFilter, String)]) {
    for (i, (filter, value)) in selected.iter().enumerate() {
        builder.push(if i == 0 { " WHERE (" } else { " AND (" });

        for (j, column) in filter.columns.iter().enumerate() {
            if j > 0 {
                builder.push(" OR ");
            }
            match filter.kind {
                MatchKind::Exact => {
                    builder.push(format!("({})::text = ", column));
                    builder.push_bind(value.clone());
                },
                MatchKind::Substring => {
                    builder.push(format!("({}) ILIKE ", column));
                    builder.push_bind(format!("%{}%", escape_like(value)));
                },
            }
        }

        builder.push(")");
    }
}
