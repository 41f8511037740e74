//! Finishing-position ordering
//!
//! `final_position` is display text: "1", "12", "DNF", "R". Classified
//! finishers sort numerically first, everything else follows alphabetically.

use std::cmp::Ordering;

/// Compare two finishing positions
pub fn compare_positions(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u32>(), b.trim().parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Stable sort by the position returned from `key`
pub fn sort_by_position<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_positions(key(a), key(b)));
}
