//! Reactive Pipeline
//!
//! Connects the snapshot feed to whatever draws the table.
//!
//! # Pipeline Architecture
//!
//! ```text
//! LiveValue<Snapshot> → snapshot signal ┐
//!                                       ├→ outputDerived → render observers
//!            ViewState signal ──────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. **derive** - Drops the sentinel, filters by demand sign, stable sorts
//! 2. **projection** - Turns records into rows of typed, toned cells
//! 3. **outputDerived** - Memoizes derive + projection over both signals
//! 4. **mount** - Owns the view, forwards pushes and state changes to observers
//!
//! ## Key Design Principles
//!
//! - **Pure stages**: derive and projection never fail and never mutate input
//! - **Side effects at the edge**: only render observers touch the terminal
//! - **Synchronous**: the output is current before a push or a state change returns

pub mod derive;
pub mod mount;
pub mod output_derived;
pub mod projection;

// Re-exports
pub use derive::{collate, comparator, derive, duplicate_identifiers, Comparator, DerivedView};
pub use mount::CommercialView;
pub use output_derived::{compute_output, create_output_derived, Table, ViewOutput};
pub use projection::{
    display_name, header, project, project_row, remap_identifier, visible_columns, Cell,
    CellValue, Column, DisplayNameFormatter, HeaderCell, Row, Tone, WordFormatter,
    CAPACITY_WARNING_PERCENT, GUTTER_PERCENT, LEGACY_IDENTIFIERS, SERVICE_WARNING_PERCENT,
    WORKFORCE_HEALTHY_PERCENT,
};
