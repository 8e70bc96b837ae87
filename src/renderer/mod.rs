//! Terminal renderer.
//!
//! A reference consumer of the view output. Hosts with their own widget
//! layer read [`crate::ViewOutput`] directly and never touch this module.
//!
//! - [`layout`] - Taffy column layout
//! - [`table`] - Lines of toned segments, plain or ANSI output

pub mod layout;
pub mod table;

pub use layout::{layout_columns, ColumnSpan};
pub use table::{Line, Segment, TableRenderer};
