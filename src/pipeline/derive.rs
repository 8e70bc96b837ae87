//! Derive - filter and order one snapshot under one view state.
//!
//! Pure and total. The same (snapshot, state) always gives the same output
//! and nothing here can fail:
//!
//! 1. drop the `NoResource` sentinel, whatever the state says
//! 2. keep records the filter mode accepts (judged on demand)
//! 3. stable sort with the comparator for the active sort key
//!
//! Numbers that are not numbers (NaN) compare as zero.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::state::ViewState;
use crate::types::{Record, SortKey};

/// Filtered, ordered records.
pub type DerivedView = Vec<Record>;

/// Record ordering for one sort key.
pub type Comparator = fn(&Record, &Record) -> Ordering;

/// Filter and sort `snapshot` under `state`. Never mutates the input.
pub fn derive(snapshot: &[Record], state: &ViewState) -> DerivedView {
    let mut rows: DerivedView = snapshot
        .iter()
        .filter(|record| !record.is_sentinel())
        .filter(|record| state.filter_mode.accepts(or_zero(record.demand)))
        .cloned()
        .collect();

    // sort_by is stable: ties keep snapshot order
    rows.sort_by(comparator(state.sort_key));
    rows
}

/// The comparator table.
pub fn comparator(key: SortKey) -> Comparator {
    match key {
        SortKey::Name => by_name,
        SortKey::Demand => by_demand,
        SortKey::Workers => by_workers,
        SortKey::Tax => by_tax,
    }
}

fn by_name(a: &Record, b: &Record) -> Ordering {
    collate(&a.resource_name, &b.resource_name)
}

fn by_demand(a: &Record, b: &Record) -> Ordering {
    descending(a.demand, b.demand)
}

fn by_workers(a: &Record, b: &Record) -> Ordering {
    descending(a.workers, b.workers)
}

fn by_tax(a: &Record, b: &Record) -> Ordering {
    descending(a.tax_factor, b.tax_factor)
}

fn descending(a: f64, b: f64) -> Ordering {
    // NaN is gone after or_zero, so partial_cmp is total here
    or_zero(b)
        .partial_cmp(&or_zero(a))
        .unwrap_or(Ordering::Equal)
}

pub(crate) fn or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

// =============================================================================
// Name collation
// =============================================================================

/// Reading-order comparison of two names.
///
/// Letters compare case-insensitively first ("apple" < "Banana" < "cherry").
/// Names that differ only in case put the lowercase form first, so the
/// order stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a.cmp(folded_b).then_with(|| case_order(a, b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.len().cmp(&b.len())
}

/// Identifiers that appear more than once in a snapshot, in first-seen order.
pub fn duplicate_identifiers(snapshot: &[Record]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for record in snapshot {
        let name = record.resource_name.as_str();
        if !seen.insert(name) && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    duplicates
}

// =============================================================================
// Tests
// =============================================================================
