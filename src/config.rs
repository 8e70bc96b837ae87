//! View configuration.
//!
//! Defaults describe the commercial products panel. Hosts can override any
//! field from JSON; missing fields keep their default, unknown fields are
//! rejected.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::feed::FeedKey;
use crate::state::ViewState;
use crate::types::{ColumnGroup, ColumnVisibility, FilterMode, SortKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Feed the view binds to.
    pub feed: FeedKey,
    /// Stable panel identifier for the host's window manager.
    pub panel_id: String,
    pub title: String,
    /// Shown instead of the table while the snapshot is empty.
    pub waiting_label: String,
    pub sort_key: SortKey,
    pub filter_mode: FilterMode,
    /// Groups hidden when the view opens.
    pub hidden_columns: Vec<ColumnGroup>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            feed: FeedKey::new("InfoLoom", "commercialProducts"),
            panel_id: "infoloom-commercial-products".to_string(),
            title: "Commercial Products".to_string(),
            waiting_label: "Waiting...".to_string(),
            sort_key: SortKey::default(),
            filter_mode: FilterMode::default(),
            hidden_columns: Vec::new(),
        }
    }
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// View state the panel opens with.
    pub fn initial_state(&self) -> ViewState {
        let mut columns = ColumnVisibility::all();
        for group in &self.hidden_columns {
            columns.remove(group.flag());
        }
        ViewState::new()
            .sort_by(self.sort_key)
            .filter_by(self.filter_mode)
            .with_columns(columns)
    }
}
