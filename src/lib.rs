//! # commerce-view
//!
//! Reactive table view over a live feed of commercial product records.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! The simulation pushes whole snapshots. Each push, and each change to the
//! user's view state, runs the same synchronous pipeline:
//! ```text
//! LiveValue<Snapshot> + ViewState → derive → projection → ViewOutput → render observers
//! ```
//!
//! Nothing in the pipeline fails or mutates a snapshot. Malformed payloads
//! are rejected at the feed and the previous snapshot stays current.
//!
//! ## Modules
//!
//! - [`types`] - Records, snapshots, sort keys, filter modes, column groups
//! - [`feed`] - Live values, subscriptions, the keyed feed hub
//! - [`state`] - View state and its checkbox menus
//! - [`pipeline`] - Derive, projection, output derived, view lifecycle
//! - [`renderer`] - Taffy column layout and crossterm output
//! - [`config`] - Panel configuration
//! - [`error`] - Error type

pub mod config;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::ViewConfig;
pub use error::{Result, ViewError};

pub use feed::{FeedHub, FeedKey, LiveValue, Subscription};

pub use state::{menus, Menu, ToggleOption, ViewAction, ViewState};

pub use pipeline::{
    compute_output, derive, CommercialView, DerivedView, DisplayNameFormatter, Row, Table, Tone,
    ViewOutput, WordFormatter,
};

pub use renderer::{Line, Segment, TableRenderer};
