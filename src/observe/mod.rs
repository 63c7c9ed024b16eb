//! # Observation Adapters
//!
//! Bridges between host change notifications and the decorator. Two adapters
//! cover the host's presentation modes:
//!
//! - [`RenderObserver`] handles rendered/preview fragments: decorate once,
//!   then keep a mutation watcher on the fragment so lazily loaded images
//!   are decorated as they appear.
//! - [`LiveEditObserver`] handles the live editing surface: decorate the
//!   realized DOM on every view update.
//!
//! Watchers returned by the render adapter are tracked in a [`WatcherSet`] so
//! the plugin can release them all on deactivation.

use std::rc::Rc;

use tracing::debug;

use crate::{
    decorate::ImageDecorator,
    dom::{Element, ElementRef, MutationWatcher},
};

/// Process-wide collection of live mutation watchers
///
/// Each watcher must be released exactly once, on teardown of its region or
/// on plugin deactivation, whichever comes first. Releasing an empty set is a
/// no-op.
#[derive(Default)]
pub struct WatcherSet {
    watchers: Vec<MutationWatcher>,
}

impl WatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a watcher for later teardown.
    ///
    /// Watchers whose target region has already been torn down have nothing
    /// left to fire against; they are pruned here so the set stays bounded by
    /// the number of live regions.
    pub fn register(&mut self, watcher: MutationWatcher) {
        self.watchers.retain(MutationWatcher::is_active);
        self.watchers.push(watcher);
    }

    /// Release every tracked watcher
    pub fn disconnect_all(&mut self) {
        for watcher in &mut self.watchers {
            watcher.disconnect();
        }
        if !self.watchers.is_empty() {
            debug!("Released {} mutation watcher(s)", self.watchers.len());
        }
        self.watchers.clear();
    }

    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }
}

/// Render-time adapter for rendered document fragments
pub struct RenderObserver {
    decorator: Rc<ImageDecorator>,
}

impl RenderObserver {
    pub fn new(decorator: Rc<ImageDecorator>) -> Self {
        Self { decorator }
    }

    /// Decorate a freshly rendered fragment and install a watcher that
    /// decorates subtrees inserted beneath it later.
    ///
    /// The watcher targets only the newly added nodes, so pre-existing
    /// content is not rescanned on every insertion. The returned handle owns
    /// the subscription; register it in a [`WatcherSet`] so deactivation can
    /// release it.
    #[must_use]
    pub fn observe_fragment(&self, fragment: &ElementRef) -> MutationWatcher {
        self.decorator.decorate(fragment);

        let decorator = Rc::clone(&self.decorator);
        Element::observe(fragment, move |added| {
            for node in added {
                decorator.decorate(node);
            }
        })
    }
}

/// The host's live editing surface, reduced to its realized DOM
///
/// In edit mode the host only materializes the visible portion of the
/// document, so the DOM handed over here changes from update to update.
pub struct EditorView {
    dom: ElementRef,
}

impl EditorView {
    pub fn new(dom: ElementRef) -> Self {
        Self { dom }
    }

    pub fn dom(&self) -> &ElementRef {
        &self.dom
    }
}

/// Live-edit adapter for the in-progress editing surface
pub struct LiveEditObserver {
    decorator: Rc<ImageDecorator>,
}

impl LiveEditObserver {
    pub fn new(decorator: Rc<ImageDecorator>) -> Self {
        Self { decorator }
    }

    /// Decorate the surface's currently realized DOM. Invoked by the host on
    /// every view update; cheap because decoration is bounded by the images
    /// actually present.
    pub fn on_view_update(&self, view: &EditorView) {
        self.decorator.decorate(view.dom());
    }
}
