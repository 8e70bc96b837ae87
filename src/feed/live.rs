//! Live values and their observers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for one registered observer.
///
/// Dropping the handle unsubscribes. Call [`Subscription::detach`] to keep
/// the observer for the lifetime of the value instead.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unregister the observer now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the observer registered and drop the handle.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// =============================================================================
// OBSERVER REGISTRY
// =============================================================================

/// Observer callback. Receives the value that was just set.
pub type Observer<T> = Rc<dyn Fn(&T)>;

struct ObserverRegistry<T> {
    observers: Vec<(usize, Observer<T>)>,
    next_id: usize,
    /// Bumped on every set; a dispatch that sees a newer generation stops.
    generation: u64,
}

impl<T> ObserverRegistry<T> {
    fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
            generation: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn is_registered(&self, id: usize) -> bool {
        self.observers.iter().any(|(observer_id, _)| *observer_id == id)
    }
}

// =============================================================================
// LIVE VALUE
// =============================================================================

/// A value pushed from outside, observed from inside.
///
/// Every `set` replaces the value and notifies observers synchronously in
/// registration order. There is no queue: if an observer sets a newer value
/// while a dispatch is running, the older dispatch stops and only the newest
/// value keeps going out.
///
/// Cloning shares the value and its observers.
pub struct LiveValue<T: Clone + PartialEq + 'static> {
    value: Signal<T>,
    registry: Rc<RefCell<ObserverRegistry<T>>>,
}

impl<T: Clone + PartialEq + 'static> Clone for LiveValue<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for LiveValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveValue")
            .field("value", &self.value.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> LiveValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: signal(initial),
            registry: Rc::new(RefCell::new(ObserverRegistry::new())),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// The backing signal, for building reactive values on top.
    pub fn signal(&self) -> Signal<T> {
        self.value.clone()
    }

    /// Replace the value and notify observers.
    pub fn set(&self, value: T) {
        let generation = {
            let mut reg = self.registry.borrow_mut();
            reg.generation += 1;
            reg.generation
        };

        self.value.set(value.clone());

        // Copy the list so observers may subscribe/unsubscribe while we call them
        let observers: Vec<(usize, Observer<T>)> = self.registry.borrow().observers.clone();

        for (id, observer) in observers {
            {
                let reg = self.registry.borrow();
                if reg.generation != generation {
                    tracing::trace!(target: "commerce_view::feed", "dispatch superseded by newer value");
                    return;
                }
                if !reg.is_registered(id) {
                    continue;
                }
            }
            observer(&value);
        }
    }

    /// Register an observer. It is not called with the current value.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id();
            reg.observers.push((id, Rc::new(observer)));
            id
        };
        tracing::trace!(target: "commerce_view::feed", id, "observer subscribed");

        let registry: Weak<RefCell<ObserverRegistry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .observers
                    .retain(|(observer_id, _)| *observer_id != id);
                tracing::trace!(target: "commerce_view::feed", id, "observer unsubscribed");
            }
        })
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
