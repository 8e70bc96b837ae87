//! Mount API - view lifecycle and render notifications.
//!
//! `CommercialView::mount` binds a view to a snapshot feed. From then on,
//! every feed push and every state change that actually changes the state
//! recomputes the output synchronously and hands it to the render
//! observers before returning.
//!
//! # Example
//!
//! ```ignore
//! use commerce_view::{CommercialView, ViewConfig, WordFormatter};
//!
//! let view = CommercialView::mount(&products, &ViewConfig::default(), WordFormatter);
//! let render = view.on_render(|output| draw(output));
//!
//! view.set_sort_key(SortKey::Demand); // draw() runs here
//! products.set(next_snapshot);        // and here
//!
//! view.unmount();                     // no further draw() calls
//! ```

use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use super::derive::{derive, duplicate_identifiers, DerivedView};
use super::output_derived::{create_output_derived, ViewOutput};
use super::projection::DisplayNameFormatter;
use crate::config::ViewConfig;
use crate::feed::{LiveValue, Subscription};
use crate::state::{menus, Menu, ViewAction, ViewState};
use crate::types::{ColumnGroup, FilterMode, Snapshot, SortKey};

// =============================================================================
// View core (shared with the feed observer)
// =============================================================================

struct ViewCore {
    snapshot: Signal<Snapshot>,
    state: Signal<ViewState>,
    output: Box<dyn Fn() -> ViewOutput>,
    rendered: LiveValue<ViewOutput>,
}

impl ViewCore {
    fn refresh(&self) {
        let output = (self.output)();
        self.rendered.set(output);
    }

    fn on_push(&self, snapshot: &Snapshot) {
        let duplicates = duplicate_identifiers(snapshot);
        if !duplicates.is_empty() {
            tracing::warn!(
                target: "commerce_view::view",
                ?duplicates,
                "snapshot has duplicate resource names"
            );
        }
        tracing::debug!(target: "commerce_view::view", records = snapshot.len(), "snapshot pushed");

        self.snapshot.set(snapshot.clone());
        self.refresh();
    }
}

// =============================================================================
// CommercialView
// =============================================================================

/// A live, sortable, filterable table over a snapshot feed.
///
/// Owns its view state and its feed subscription. Dropping the view (or
/// calling [`CommercialView::unmount`]) releases the subscription, so no
/// callback reaches it afterwards.
pub struct CommercialView {
    core: Rc<ViewCore>,
    title: String,
    feed: Option<Subscription>,
}

impl CommercialView {
    /// Bind a new view to `source`.
    ///
    /// Reads the current snapshot right away; render observers registered
    /// later see the output from the next trigger on.
    pub fn mount(
        source: &LiveValue<Snapshot>,
        config: &ViewConfig,
        formatter: impl DisplayNameFormatter + 'static,
    ) -> Self {
        let snapshot = signal(source.get());
        let state = signal(config.initial_state());

        let output_derived = create_output_derived(
            snapshot.clone(),
            state.clone(),
            Rc::new(formatter),
            config.waiting_label.clone(),
        );
        let output: Box<dyn Fn() -> ViewOutput> = Box::new(move || output_derived.get());
        let initial = output();

        let core = Rc::new(ViewCore {
            snapshot,
            state,
            output,
            rendered: LiveValue::new(initial),
        });

        let weak: Weak<ViewCore> = Rc::downgrade(&core);
        let feed = source.subscribe(move |snapshot| {
            if let Some(core) = weak.upgrade() {
                core.on_push(snapshot);
            }
        });

        tracing::debug!(target: "commerce_view::view", feed = %config.feed, "view mounted");

        Self {
            core,
            title: config.title.clone(),
            feed: Some(feed),
        }
    }

    /// Release the feed subscription.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.unsubscribe();
            tracing::debug!(target: "commerce_view::view", title = %self.title, "view unmounted");
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn state(&self) -> ViewState {
        self.core.state.get()
    }

    /// Latest snapshot seen by the view.
    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot.get()
    }

    /// Current output (memoized between triggers).
    pub fn output(&self) -> ViewOutput {
        (self.core.output)()
    }

    /// Filtered, ordered records before projection.
    pub fn derived_view(&self) -> DerivedView {
        derive(&self.snapshot(), &self.state())
    }

    pub fn is_waiting(&self) -> bool {
        self.output().is_waiting()
    }

    /// Checkbox menus for the current state.
    pub fn menus(&self) -> [Menu; 3] {
        menus(&self.state())
    }

    // -------------------------------------------------------------------------
    // Render observers
    // -------------------------------------------------------------------------

    /// Call `observer` with the new output after every push and every
    /// effective state change.
    pub fn on_render<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&ViewOutput) + 'static,
    {
        self.core.rendered.subscribe(observer)
    }

    // -------------------------------------------------------------------------
    // State transitions
    // -------------------------------------------------------------------------

    pub fn set_sort_key(&self, key: SortKey) -> bool {
        self.update_state(|state| state.sort_by(key))
    }

    pub fn set_filter_mode(&self, mode: FilterMode) -> bool {
        self.update_state(|state| state.filter_by(mode))
    }

    pub fn toggle_column(&self, group: ColumnGroup) -> bool {
        self.update_state(|state| state.toggle_column(group))
    }

    /// Checkbox handler: apply the toggle of `action`'s checkbox.
    pub fn on_toggle(&self, action: ViewAction, new_value: bool) -> bool {
        self.update_state(|state| action.on_toggle(state, new_value))
    }

    /// Apply a transition. Returns false, without recomputing or notifying,
    /// when the state does not change.
    fn update_state(&self, transition: impl FnOnce(ViewState) -> ViewState) -> bool {
        let current = self.core.state.get();
        let next = transition(current);
        if next == current {
            return false;
        }

        tracing::debug!(target: "commerce_view::view", from = ?current, to = ?next, "view state changed");
        self.core.state.set(next);
        self.core.refresh();
        true
    }
}

impl Drop for CommercialView {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Tests
// =============================================================================
