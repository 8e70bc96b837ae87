//! View State - the user's sort, filter and column choices
//!
//! Plain `Copy` value. Every transition takes the old state and returns the
//! new one; nothing here touches the feed or the output.
//!
//! - `sort_by(key)` - replace the sort key
//! - `filter_by(mode)` - replace the filter mode
//! - `toggle_column(group)` - flip one group's visibility
//!
//! Setting the same key or mode twice gives the same state. Toggling the
//! same group twice restores the original visibility.

use crate::types::{ColumnGroup, ColumnVisibility, FilterMode, SortKey};

/// User-controlled view parameters. Lives as long as the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub filter_mode: FilterMode,
    pub columns: ColumnVisibility,
}

impl ViewState {
    /// Name order, all records, every column shown.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort_by(self, sort_key: SortKey) -> Self {
        Self { sort_key, ..self }
    }

    #[must_use]
    pub fn filter_by(self, filter_mode: FilterMode) -> Self {
        Self { filter_mode, ..self }
    }

    #[must_use]
    pub fn toggle_column(self, group: ColumnGroup) -> Self {
        let mut columns = self.columns;
        columns.toggle(group.flag());
        Self { columns, ..self }
    }

    /// Replace the whole visibility set.
    #[must_use]
    pub fn with_columns(self, columns: ColumnVisibility) -> Self {
        Self { columns, ..self }
    }

    pub fn is_visible(&self, group: ColumnGroup) -> bool {
        self.columns.shows(group)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ViewState::new();
        assert_eq!(state.sort_key, SortKey::Name);
        assert_eq!(state.filter_mode, FilterMode::All);
        assert_eq!(state.columns, ColumnVisibility::all());
    }

    #[test]
    fn test_sort_by_replaces_and_is_idempotent() {
        let state = ViewState::new().sort_by(SortKey::Tax);
        assert_eq!(state.sort_key, SortKey::Tax);
        assert_eq!(state.sort_by(SortKey::Tax), state);
        assert_eq!(state.filter_mode, FilterMode::All);
    }

    #[test]
    fn test_filter_by_replaces_and_is_idempotent() {
        let state = ViewState::new().filter_by(FilterMode::Negative);
        assert_eq!(state.filter_mode, FilterMode::Negative);
        assert_eq!(state.filter_by(FilterMode::Negative), state);
        assert_eq!(state.sort_key, SortKey::Name);
    }

    #[test]
    fn test_toggle_column_flips_only_one() {
        let state = ViewState::new().toggle_column(ColumnGroup::Service);

        assert!(!state.is_visible(ColumnGroup::Service));
        for group in ColumnGroup::ALL {
            if group != ColumnGroup::Service {
                assert!(state.is_visible(group), "{group} should stay visible");
            }
        }
    }

    #[test]
    fn test_toggle_column_twice_restores() {
        let original = ViewState::new().toggle_column(ColumnGroup::Tax);
        for group in ColumnGroup::ALL {
            assert_eq!(original.toggle_column(group).toggle_column(group), original);
        }
    }

    #[test]
    fn test_all_columns_can_be_hidden() {
        let state = ColumnGroup::ALL
            .into_iter()
            .fold(ViewState::new(), ViewState::toggle_column);
        assert!(state.columns.is_empty());
    }
}
