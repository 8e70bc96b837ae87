//! Named feeds.
//!
//! The simulation publishes values under a mod id plus a feature name. The
//! hub owns one [`LiveValue`] per key and decodes JSON payloads into it.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::live::LiveValue;
use crate::error::{Result, ViewError};

/// Address of one feed: owning mod id and feature name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedKey {
    pub group: String,
    pub name: String,
}

impl FeedKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

type Publisher = Box<dyn Fn(&str) -> Result<()>>;

struct FeedEntry {
    value: Box<dyn Any>,
    type_name: &'static str,
    publish: Publisher,
}

/// Registry of named live values.
///
/// Owned by the host, passed to whoever needs a binding. Not a global.
#[derive(Default)]
pub struct FeedHub {
    feeds: HashMap<FeedKey, FeedEntry>,
}

impl FeedHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the live value bound under `key`, creating it with `default` if
    /// the key is new.
    ///
    /// Fails if the key is already bound to a different type.
    pub fn bind<T>(&mut self, key: FeedKey, default: T) -> Result<LiveValue<T>>
    where
        T: DeserializeOwned + Clone + PartialEq + 'static,
    {
        if let Some(entry) = self.feeds.get(&key) {
            return entry
                .value
                .downcast_ref::<LiveValue<T>>()
                .cloned()
                .ok_or_else(|| ViewError::FeedTypeMismatch {
                    key: key.clone(),
                    bound: entry.type_name,
                    requested: type_name::<T>(),
                });
        }

        let live = LiveValue::new(default);
        let target = live.clone();
        let publish: Publisher = Box::new(move |payload: &str| {
            let value: T = serde_json::from_str(payload)?;
            target.set(value);
            Ok(())
        });

        tracing::debug!(target: "commerce_view::feed", feed = %key, ty = type_name::<T>(), "feed bound");
        self.feeds.insert(
            key,
            FeedEntry {
                value: Box::new(live.clone()),
                type_name: type_name::<T>(),
                publish,
            },
        );
        Ok(live)
    }

    /// Decode `payload` as JSON into the feed's type and push it.
    ///
    /// On a decode error the current value is left as it was.
    pub fn publish_json(&self, key: &FeedKey, payload: &str) -> Result<()> {
        let entry = self
            .feeds
            .get(key)
            .ok_or_else(|| ViewError::UnknownFeed(key.clone()))?;

        (entry.publish)(payload).inspect_err(|err| {
            tracing::warn!(target: "commerce_view::feed", feed = %key, error = %err, "rejected payload");
        })
    }

    /// Push an already-typed value.
    pub fn publish<T>(&self, key: &FeedKey, value: T) -> Result<()>
    where
        T: Clone + PartialEq + 'static,
    {
        let entry = self
            .feeds
            .get(key)
            .ok_or_else(|| ViewError::UnknownFeed(key.clone()))?;

        let live = entry
            .value
            .downcast_ref::<LiveValue<T>>()
            .ok_or_else(|| ViewError::FeedTypeMismatch {
                key: key.clone(),
                bound: entry.type_name,
                requested: type_name::<T>(),
            })?;
        live.set(value);
        Ok(())
    }

    /// Drop the registry entry. Handles already handed out keep working.
    pub fn unbind(&mut self, key: &FeedKey) -> bool {
        self.feeds.remove(key).is_some()
    }

    pub fn contains(&self, key: &FeedKey) -> bool {
        self.feeds.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
