//! Menu Module - view state exposed as checkbox menus
//!
//! The widget layer draws checkboxes from `(is_checked, on_toggle)` pairs and
//! nothing else. This module produces those pairs from a [`ViewState`] and
//! maps a toggle back to a state transition, so the view stays the only
//! owner of the state.
//!
//! Sort and filter menus behave like radio groups: toggling any option
//! selects it, whatever the checkbox reports. Column options flip.

use crate::types::{ColumnGroup, FilterMode, SortKey};

use super::view_state::ViewState;

/// Something a checkbox can do to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAction {
    SortBy(SortKey),
    FilterBy(FilterMode),
    ToggleColumn(ColumnGroup),
}

impl ViewAction {
    /// Checkbox label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SortBy(SortKey::Name) => "Sort by Name",
            Self::SortBy(SortKey::Demand) => "Sort by Demand",
            Self::SortBy(SortKey::Workers) => "Sort by Workers",
            Self::SortBy(SortKey::Tax) => "Sort by Tax",
            Self::FilterBy(FilterMode::All) => "All Demand",
            Self::FilterBy(FilterMode::Positive) => "Positive Demand",
            Self::FilterBy(FilterMode::Negative) => "Negative Demand",
            Self::ToggleColumn(ColumnGroup::Demand) => "Show Demand",
            Self::ToggleColumn(ColumnGroup::Service) => "Show Service",
            Self::ToggleColumn(ColumnGroup::Capacity) => "Show Capacity",
            Self::ToggleColumn(ColumnGroup::Workers) => "Show Workers",
            Self::ToggleColumn(ColumnGroup::Tax) => "Show Tax",
        }
    }

    /// Whether the checkbox for this action is ticked under `state`.
    pub fn is_checked(self, state: &ViewState) -> bool {
        match self {
            Self::SortBy(key) => state.sort_key == key,
            Self::FilterBy(mode) => state.filter_mode == mode,
            Self::ToggleColumn(group) => state.is_visible(group),
        }
    }

    /// Transition for a checkbox toggle. `new_value` is what the widget
    /// reports; radio options ignore it and column options flip.
    #[must_use]
    pub fn on_toggle(self, state: ViewState, _new_value: bool) -> ViewState {
        match self {
            Self::SortBy(key) => state.sort_by(key),
            Self::FilterBy(mode) => state.filter_by(mode),
            Self::ToggleColumn(group) => state.toggle_column(group),
        }
    }
}

/// One checkbox row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOption {
    pub label: &'static str,
    pub is_checked: bool,
    pub action: ViewAction,
}

impl ToggleOption {
    fn for_action(action: ViewAction, state: &ViewState) -> Self {
        Self {
            label: action.label(),
            is_checked: action.is_checked(state),
            action,
        }
    }
}

/// A dropdown of checkboxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub options: Vec<ToggleOption>,
}

pub fn sort_menu(state: &ViewState) -> Menu {
    Menu {
        title: "Sort Options",
        options: SortKey::ALL
            .into_iter()
            .map(|key| ToggleOption::for_action(ViewAction::SortBy(key), state))
            .collect(),
    }
}

pub fn column_menu(state: &ViewState) -> Menu {
    Menu {
        title: "Column Options",
        options: ColumnGroup::ALL
            .into_iter()
            .map(|group| ToggleOption::for_action(ViewAction::ToggleColumn(group), state))
            .collect(),
    }
}

pub fn filter_menu(state: &ViewState) -> Menu {
    Menu {
        title: "Filter Options",
        options: FilterMode::ALL
            .into_iter()
            .map(|mode| ToggleOption::for_action(ViewAction::FilterBy(mode), state))
            .collect(),
    }
}

/// All three menus in toolbar order: sort, columns, filter.
pub fn menus(state: &ViewState) -> [Menu; 3] {
    [sort_menu(state), column_menu(state), filter_menu(state)]
}

// =============================================================================
// Tests
// =============================================================================
