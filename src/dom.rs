//! # Minimal Element Tree
//!
//! Models the host-rendered DOM regions the plugin decorates. The host runs
//! everything on a single UI thread, so nodes are shared with `Rc` and
//! mutated through `RefCell` with no locking.
//!
//! Mutation observation mirrors the host's observer API: registering a
//! callback on a node yields a [`MutationWatcher`] handle, and any child
//! appended beneath that node (at any depth) is reported to the callback as
//! the root of the inserted subtree. Disconnecting the handle releases the
//! callback; observers hold only weak links, so a dropped handle can never
//! leave a live callback firing against a detached region.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to an element; identity is pointer identity
pub type ElementRef = Rc<Element>;

type MutationCallback = RefCell<Box<dyn FnMut(&[ElementRef])>>;

/// A single element in a host-rendered DOM region
pub struct Element {
    tag: String,
    classes: RefCell<Vec<String>>,
    children: RefCell<Vec<ElementRef>>,
    parent: RefCell<Weak<Element>>,
    observers: RefCell<Vec<Weak<MutationCallback>>>,
}

impl Element {
    /// Create a detached element with the given tag name
    pub fn new(tag: &str) -> ElementRef {
        Rc::new(Self {
            tag: tag.to_ascii_lowercase(),
            classes: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            observers: RefCell::new(Vec::new()),
        })
    }

    /// Create a detached element carrying the given classes
    pub fn with_classes(tag: &str, classes: &[&str]) -> ElementRef {
        let el = Self::new(tag);
        for class in classes {
            el.add_class(class);
        }
        el
    }

    /// Lowercase tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    /// Add a class; a no-op if already present
    pub fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    /// Remove a class; a no-op if absent
    pub fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    /// Snapshot of the class list, in insertion order
    pub fn class_list(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }

    /// Snapshot of the child list
    pub fn children(&self) -> Vec<ElementRef> {
        self.children.borrow().clone()
    }

    pub fn first_element_child(&self) -> Option<ElementRef> {
        self.children.borrow().first().cloned()
    }

    pub fn parent(&self) -> Option<ElementRef> {
        self.parent.borrow().upgrade()
    }

    /// Append a child beneath `parent`, reparenting it if necessary, and
    /// notify every watcher registered on `parent` or its ancestors with the
    /// inserted subtree root.
    pub fn append_child(parent: &ElementRef, child: &ElementRef) {
        if let Some(old_parent) = child.parent.borrow().upgrade() {
            old_parent
                .children
                .borrow_mut()
                .retain(|c| !Rc::ptr_eq(c, child));
        }

        *child.parent.borrow_mut() = Rc::downgrade(parent);
        parent.children.borrow_mut().push(Rc::clone(child));

        Self::notify_inserted(parent, std::slice::from_ref(child));
    }

    /// Register a mutation callback on `target`, returning its handle.
    ///
    /// The callback fires for every insertion anywhere beneath `target`,
    /// receiving only the roots of the inserted subtrees.
    pub fn observe(
        target: &ElementRef,
        callback: impl FnMut(&[ElementRef]) + 'static,
    ) -> MutationWatcher {
        let callback: Rc<MutationCallback> = Rc::new(RefCell::new(Box::new(callback)));
        target
            .observers
            .borrow_mut()
            .push(Rc::downgrade(&callback));

        MutationWatcher {
            target: Rc::downgrade(target),
            callback: Some(callback),
        }
    }

    /// Collect `root` and every element beneath it, pre-order
    pub fn subtree(root: &ElementRef) -> Vec<ElementRef> {
        let mut out = Vec::new();
        let mut stack = vec![Rc::clone(root)];

        while let Some(el) = stack.pop() {
            for child in el.children.borrow().iter().rev() {
                stack.push(Rc::clone(child));
            }
            out.push(el);
        }

        out
    }

    fn notify_inserted(start: &ElementRef, added: &[ElementRef]) {
        // Gather live callbacks from the ancestor chain before invoking any,
        // so a callback that mutates the tree cannot invalidate the walk.
        let mut callbacks = Vec::new();
        let mut node = Some(Rc::clone(start));

        while let Some(current) = node {
            let mut observers = current.observers.borrow_mut();
            observers.retain(|weak| match weak.upgrade() {
                Some(cb) => {
                    callbacks.push(cb);
                    true
                }
                None => false,
            });
            drop(observers);
            node = current.parent.borrow().upgrade();
        }

        for callback in callbacks {
            (callback.borrow_mut())(added);
        }
    }
}

/// Handle to a registered mutation callback
///
/// The subscription lives exactly as long as the handle: `disconnect`
/// releases it explicitly, and dropping the handle releases it implicitly.
pub struct MutationWatcher {
    target: Weak<Element>,
    callback: Option<Rc<MutationCallback>>,
}

impl MutationWatcher {
    /// Release the subscription. Safe to call more than once; releasing a
    /// watcher whose target is already gone is a no-op.
    pub fn disconnect(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };

        if let Some(target) = self.target.upgrade() {
            let weak = Rc::downgrade(&callback);
            target.observers.borrow_mut().retain(|w| !w.ptr_eq(&weak));
        }
    }

    pub fn is_connected(&self) -> bool {
        self.callback.is_some()
    }

    /// Whether the subscription is still held and its target region is alive
    pub fn is_active(&self) -> bool {
        self.callback.is_some() && self.target.strong_count() > 0
    }
}

impl Drop for MutationWatcher {
    fn drop(&mut self) {
        self.disconnect();
    }
}
