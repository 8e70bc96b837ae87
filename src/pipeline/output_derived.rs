//! Output Derived - reactive table output.
//!
//! Creates a Derived that recomputes the view output whenever:
//! - a new snapshot is pushed
//! - the view state changes
//!
//! Reading it again without either changing returns the memoized output.

use std::rc::Rc;

use spark_signals::{derived, Derived, Signal};

use super::derive::derive;
use super::projection::{header, project, DisplayNameFormatter, HeaderCell, Row};
use crate::state::ViewState;
use crate::types::{ColumnVisibility, Record, Snapshot};

/// A table ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Row>,
    pub columns: ColumnVisibility,
}

/// What the view shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutput {
    /// No data pushed yet (empty snapshot).
    Waiting { label: String },
    Table(Table),
}

impl ViewOutput {
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Waiting { .. })
    }

    /// Rows, empty while waiting.
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Waiting { .. } => &[],
            Self::Table(table) => &table.rows,
        }
    }
}

/// One full pass: derive, then project.
///
/// An empty snapshot yields the waiting placeholder. A snapshot holding only
/// filtered-out records yields an empty table.
pub fn compute_output(
    snapshot: &[Record],
    state: &ViewState,
    formatter: &dyn DisplayNameFormatter,
    waiting_label: &str,
) -> ViewOutput {
    if snapshot.is_empty() {
        return ViewOutput::Waiting {
            label: waiting_label.to_string(),
        };
    }

    let view = derive(snapshot, state);
    tracing::trace!(
        target: "commerce_view::pipeline",
        input = snapshot.len(),
        output = view.len(),
        sort = ?state.sort_key,
        filter = ?state.filter_mode,
        "derived view"
    );

    ViewOutput::Table(Table {
        header: header(state.columns),
        rows: project(&view, state.columns, formatter),
        columns: state.columns,
    })
}

/// Create the output derived over the snapshot and state signals.
pub fn create_output_derived(
    snapshot: Signal<Snapshot>,
    state: Signal<ViewState>,
    formatter: Rc<dyn DisplayNameFormatter>,
    waiting_label: String,
) -> Derived<ViewOutput> {
    derived(move || {
        // Both reads register dependencies
        let snapshot = snapshot.get();
        let state = state.get();
        compute_output(&snapshot, &state, formatter.as_ref(), &waiting_label)
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::projection::WordFormatter;
    use crate::types::{empty_snapshot, snapshot as make_snapshot, FilterMode, SortKey};
    use spark_signals::signal;

    fn keys(output: &ViewOutput) -> Vec<String> {
        output.rows().iter().map(|r| r.key.clone()).collect()
    }

    #[test]
    fn test_empty_snapshot_is_waiting() {
        let output = compute_output(&[], &ViewState::new(), &WordFormatter, "Waiting...");
        assert_eq!(
            output,
            ViewOutput::Waiting {
                label: "Waiting...".to_string()
            }
        );
        assert!(output.rows().is_empty());
    }

    #[test]
    fn test_sentinel_only_is_empty_table() {
        let output = compute_output(
            &[Record::named("NoResource")],
            &ViewState::new(),
            &WordFormatter,
            "Waiting...",
        );
        assert!(!output.is_waiting());
        assert!(output.rows().is_empty());
    }

    #[test]
    fn test_derived_initial_output() {
        let snapshot = signal(make_snapshot(vec![Record::named("B"), Record::named("A")]));
        let state = signal(ViewState::new());

        let output = create_output_derived(
            snapshot.clone(),
            state.clone(),
            Rc::new(WordFormatter),
            "Waiting...".to_string(),
        );

        assert_eq!(keys(&output.get()), vec!["A", "B"]);
    }

    #[test]
    fn test_derived_reacts_to_state_and_snapshot() {
        let snapshot = signal(empty_snapshot());
        let state = signal(ViewState::new());

        let output = create_output_derived(
            snapshot.clone(),
            state.clone(),
            Rc::new(WordFormatter),
            "Waiting...".to_string(),
        );
        assert!(output.get().is_waiting());

        snapshot.set(make_snapshot(vec![
            Record::named("Alpha").with_demand(1.0),
            Record::named("Zulu").with_demand(9.0),
        ]));
        assert_eq!(keys(&output.get()), vec!["Alpha", "Zulu"]);

        state.set(ViewState::new().sort_by(SortKey::Demand));
        assert_eq!(keys(&output.get()), vec!["Zulu", "Alpha"]);

        state.set(ViewState::new().filter_by(FilterMode::Negative));
        assert!(output.get().rows().is_empty());
        assert!(!output.get().is_waiting());
    }
}
