//! Feed Module - one-way binding to values owned by the simulation
//!
//! The simulation owns the data and pushes whole values; this side only
//! reads and observes.
//!
//! - **LiveValue** - current value + synchronous observer dispatch
//! - **Subscription** - handle that unregisters an observer (also on drop)
//! - **FeedHub** - named live values keyed by mod id and feature name,
//!   with JSON ingestion
//!
//! # Example
//!
//! ```ignore
//! use commerce_view::feed::{FeedHub, FeedKey};
//! use commerce_view::types::{empty_snapshot, Snapshot};
//!
//! let mut hub = FeedHub::new();
//! let key = FeedKey::new("InfoLoom", "commercialProducts");
//! let products = hub.bind::<Snapshot>(key.clone(), empty_snapshot())?;
//!
//! let sub = products.subscribe(|snapshot| println!("{} rows", snapshot.len()));
//! hub.publish_json(&key, r#"[{"ResourceName": "Food", "Demand": 4}]"#)?;
//! sub.unsubscribe();
//! ```

mod hub;
mod live;

pub use hub::*;
pub use live::*;
