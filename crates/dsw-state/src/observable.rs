//! Observable store primitive.
//!
//! Every UI store in the workbench is a thin, typed wrapper around
//! [`Store<T>`]: a cloneable handle to a shared value with change
//! notification.
//!
//! # Invariants
//!
//! 1. Mutations are atomic with respect to each other (one lock per store).
//! 2. The version increments exactly once per mutation that changes the value.
//! 3. An update that leaves the value equal to its previous state is a no-op
//!    for subscribers (no version bump, no notification).
//! 4. Listeners run after the state lock is released, in registration order,
//!    and receive the post-mutation snapshot. They may call back into this or
//!    any other store.
//! 5. Dropping a [`Subscription`] detaches its listener before the next
//!    notification cycle.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Locks a mutex, recovering the data if a listener panicked while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// LISTENERS
// =============================================================================

/// Ordered list of callbacks interested in values of type `T`.
///
/// Shared by [`Store`] and by event buses built on top of this crate.
pub struct Listeners<T> {
    inner: Arc<ListenerList<T>>,
}

struct ListenerList<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Callback<T>)>>,
}

impl<T> ListenerList<T> {
    fn remove(&self, id: u64) {
        lock(&self.entries).retain(|(entry_id, _)| *entry_id != id);
    }
}

impl<T: 'static> Listeners<T> {
    /// Create an empty listener list.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ListenerList {
                next_id: AtomicU64::new(0),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a callback. It stays registered until the returned guard drops.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.entries).push((id, Arc::new(callback)));

        let list: Weak<ListenerList<T>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(list) = list.upgrade() {
                list.remove(id);
            }
        })
    }

    /// Invoke every registered callback with `value`.
    ///
    /// The callback list is snapshotted first, so callbacks may subscribe,
    /// unsubscribe or notify again without deadlocking.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.inner.entries)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    /// Detach every callback.
    pub fn clear(&self) {
        lock(&self.inner.entries).clear();
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        lock(&self.inner.entries).len()
    }

    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &lock(&self.inner.entries).len())
            .finish()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// RAII guard for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription that is not attached to anything.
    pub fn inert() -> Self {
        Self { detach: None }
    }

    /// Explicitly unsubscribe (same as dropping the guard).
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Shared, version-tracked state container.
///
/// Cloning a `Store` yields another handle to the same state.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

struct StoreInner<T> {
    state: Mutex<T>,
    version: AtomicU64,
    listeners: Listeners<T>,
    disposed: AtomicBool,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Store<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Create a store holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                version: AtomicU64::new(0),
                listeners: Listeners::new(),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.inner.state).clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&lock(&self.inner.state))
    }

    /// Mutate the value in place and notify subscribers if it changed.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let (result, changed) = {
            let mut state = lock(&self.inner.state);
            let before = state.clone();
            let result = mutate(&mut state);
            if *state == before {
                (result, None)
            } else {
                self.inner.version.fetch_add(1, Ordering::AcqRel);
                (result, Some(state.clone()))
            }
        };

        if let Some(snapshot) = changed
            && !self.is_disposed()
        {
            self.inner.listeners.notify(&snapshot);
        }
        result
    }

    /// Replace the value.
    pub fn set(&self, value: T) {
        self.update(|state| *state = value);
    }

    /// Listen for changes. The listener is not called with the current value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        if self.is_disposed() {
            tracing::warn!("subscribe called on a disposed store");
            return Subscription::inert();
        }
        self.inner.listeners.subscribe(listener)
    }

    /// Number of changes applied since creation.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Detach every listener and stop notifying.
    ///
    /// The value stays readable; later mutations still apply silently.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::Release);
        self.inner.listeners.clear();
    }

    /// Whether [`Store::dispose`] has been called.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*lock(&self.inner.state))
            .field("version", &self.inner.version.load(Ordering::Acquire))
            .finish()
    }
}
