//! Callback registry with scoped subscriptions

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Registry<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// A stream of events of type `T`
///
/// Cloning yields another handle to the same registry, so a component can
/// keep one handle to fire from and hand clones to whoever subscribes.
pub struct EventStream<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: 'static> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventStream<T> {
    /// Create an empty stream
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Register a callback; it stays registered while the guard is alive
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            let callback: Callback<T> = Rc::new(RefCell::new(callback));
            registry.callbacks.push((id, callback));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry
                    .borrow_mut()
                    .callbacks
                    .retain(|(existing, _)| *existing != id);
            }
        })
    }

    /// Deliver `value` to every live subscriber
    pub fn fire(&self, value: T) {
        self.fire_ref(&value);
    }

    /// Deliver a borrowed value to every live subscriber
    pub fn fire_ref(&self, value: &T) {
        // Snapshot so callbacks may subscribe or unsubscribe while we iterate.
        let snapshot: Vec<(u64, Callback<T>)> = self
            .registry
            .borrow()
            .callbacks
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            let still_registered = self
                .registry
                .borrow()
                .callbacks
                .iter()
                .any(|(existing, _)| *existing == id);
            if !still_registered {
                continue;
            }
            // A callback re-firing its own stream is skipped rather than re-entered.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)(value);
            }
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }
}

/// Guard returned by [`EventStream::subscribe`]
///
/// Dropping it removes the callback from the stream.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unsubscribe now instead of at drop
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
