//! Event emitter for store change notification.
//!
//! The store never pushes data to its observers. It emits a payload-free
//! [`StoreEvent`] after each mutation and listeners re-read whatever state
//! they render. This module provides the typed publish/subscribe mechanism
//! that carries those notifications.
//!
//! # Key Types
//!
//! - [`EventEmitter<E>`] - Maps event kinds to ordered listener lists
//! - [`StoreEvent`] - The three events emitted by [`crate::AppState`]
//! - [`ListenerId`] - Handle returned by [`EventEmitter::on`], used to unsubscribe
//! - [`ListenerGuard`] - RAII handle that unsubscribes when dropped
//!
//! # Re-entrancy
//!
//! Emission is synchronous. The listener list is snapshotted and the internal
//! lock released before any listener runs, so a listener may call back into
//! the store, emit other events, or (un)register listeners. Nested emission
//! depth is bounded by [`EventEmitter::max_depth`]; exceeding it panics.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use todo_lattice_core::{EventEmitter, StoreEvent};
//!
//! let events = EventEmitter::<StoreEvent>::new();
//! let renders = Arc::new(AtomicUsize::new(0));
//!
//! let renders_clone = renders.clone();
//! let id = events.on(StoreEvent::TodosChange, move || {
//!     renders_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! events.emit(StoreEvent::TodosChange);
//! events.emit(StoreEvent::FilterChange); // nobody listens, no-op
//! assert_eq!(renders.load(Ordering::SeqCst), 1);
//!
//! events.off(id);
//! events.emit(StoreEvent::TodosChange);
//! assert_eq!(renders.load(Ordering::SeqCst), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::TodoError;

/// Default bound on nested `emit` calls.
pub const DEFAULT_MAX_EMIT_DEPTH: usize = 32;

new_key_type! {
    /// A unique identifier for a registered listener.
    ///
    /// Pass it to [`EventEmitter::off`] to unsubscribe. Identifiers are
    /// versioned, so a stale ID never removes a later registration.
    pub struct ListenerId;
}

/// Change notifications emitted by [`crate::AppState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    /// The todo sequence or a todo's fields changed.
    TodosChange,
    /// The active filter changed.
    FilterChange,
    /// The GUI style changed.
    GuiStyleChange,
}

impl StoreEvent {
    /// All store events.
    pub const ALL: [StoreEvent; 3] = [
        StoreEvent::TodosChange,
        StoreEvent::FilterChange,
        StoreEvent::GuiStyleChange,
    ];

    /// The wire name of this event.
    pub fn name(self) -> &'static str {
        match self {
            Self::TodosChange => "todosChange",
            Self::FilterChange => "filterChange",
            Self::GuiStyleChange => "guiStyleChange",
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoreEvent {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| TodoError::UnknownEvent(s.to_string()))
    }
}

/// Bound for types usable as event kinds.
pub trait EventKind: Copy + Eq + Hash + fmt::Debug + Send + 'static {}

impl<T: Copy + Eq + Hash + fmt::Debug + Send + 'static> EventKind for T {}

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Internal storage for one registration.
struct Registration<E> {
    event: E,
    listener: Listener,
}

/// Listener storage shared between the emitter and its guards.
struct ListenerRegistry<E> {
    listeners: SlotMap<ListenerId, Registration<E>>,
    /// Registration order per event. Slot maps reuse freed slots, so
    /// iteration order of `listeners` is not registration order.
    order: HashMap<E, Vec<ListenerId>>,
}

impl<E: EventKind> ListenerRegistry<E> {
    fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            order: HashMap::new(),
        }
    }

    fn insert(&mut self, event: E, listener: Listener) -> ListenerId {
        let id = self.listeners.insert(Registration { event, listener });
        self.order.entry(event).or_default().push(id);
        id
    }

    /// Remove a registration. The caller drops the result after releasing
    /// the lock, since a listener closure may own a [`ListenerGuard`].
    fn remove(&mut self, id: ListenerId) -> Option<Registration<E>> {
        let registration = self.listeners.remove(id)?;
        if let Some(ids) = self.order.get_mut(&registration.event) {
            ids.retain(|&other| other != id);
        }
        Some(registration)
    }

    fn snapshot(&self, event: E) -> Vec<(ListenerId, Listener)> {
        self.order
            .get(&event)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| {
                        self.listeners
                            .get(id)
                            .map(|registration| (id, registration.listener.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A typed publish/subscribe hub.
///
/// Listeners are zero-argument closures registered under an event kind and
/// invoked synchronously, in registration order, by [`emit`](Self::emit).
/// The same closure registered twice is invoked twice.
///
/// # Thread Safety
///
/// `EventEmitter` is `Send + Sync`. Emission happens on the calling thread;
/// there is no queuing.
pub struct EventEmitter<E: EventKind = StoreEvent> {
    registry: Arc<Mutex<ListenerRegistry<E>>>,
    depth: AtomicUsize,
    max_depth: AtomicUsize,
}

impl<E: EventKind> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventKind> EventEmitter<E> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_EMIT_DEPTH)
    }

    /// Create an emitter with a custom bound on nested emission.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            registry: Arc::new(Mutex::new(ListenerRegistry::new())),
            depth: AtomicUsize::new(0),
            max_depth: AtomicUsize::new(max_depth.max(1)),
        }
    }

    /// Register a listener for `event`.
    ///
    /// Returns a [`ListenerId`] for [`off`](Self::off).
    pub fn on<F>(&self, event: E, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.registry.lock().insert(event, Arc::new(listener));
        tracing::trace!(target: "todo_lattice_core::signal", ?event, ?id, "listener registered");
        id
    }

    /// Register a listener that is removed when the returned guard drops.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use todo_lattice_core::{EventEmitter, StoreEvent};
    ///
    /// let events = EventEmitter::<StoreEvent>::new();
    /// let count = Arc::new(AtomicUsize::new(0));
    /// {
    ///     let count_clone = count.clone();
    ///     let _guard = events.on_scoped(StoreEvent::FilterChange, move || {
    ///         count_clone.fetch_add(1, Ordering::SeqCst);
    ///     });
    ///     events.emit(StoreEvent::FilterChange);
    /// }
    /// events.emit(StoreEvent::FilterChange);
    /// assert_eq!(count.load(Ordering::SeqCst), 1);
    /// ```
    pub fn on_scoped<F>(&self, event: E, listener: F) -> ListenerGuard<E>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.on(event, listener);
        ListenerGuard {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Unsubscribe a listener.
    ///
    /// Returns `true` if the listener was registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let removed = self.registry.lock().remove(id);
        removed.is_some()
    }

    /// Unsubscribe every listener of `event`.
    pub fn off_all(&self, event: E) {
        let removed: Vec<Registration<E>> = {
            let mut registry = self.registry.lock();
            let ids = registry.order.remove(&event).unwrap_or_default();
            ids.into_iter()
                .filter_map(|id| registry.listeners.remove(id))
                .collect()
        };
        drop(removed);
    }

    /// Unsubscribe every listener.
    pub fn clear(&self) {
        let removed = std::mem::replace(&mut *self.registry.lock(), ListenerRegistry::new());
        drop(removed);
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: E) -> usize {
        self.registry
            .lock()
            .order
            .get(&event)
            .map_or(0, Vec::len)
    }

    /// Number of listeners across all events.
    pub fn total_listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }

    /// Current nesting depth of [`emit`](Self::emit). Zero when idle.
    pub fn emit_depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    /// Bound on nested emission.
    pub fn max_depth(&self) -> usize {
        self.max_depth.load(Ordering::SeqCst)
    }

    /// Change the bound on nested emission. Values below 1 are raised to 1.
    pub fn set_max_depth(&self, max_depth: usize) {
        self.max_depth.store(max_depth.max(1), Ordering::SeqCst);
    }

    /// Invoke every listener registered for `event`, in registration order.
    ///
    /// Emitting an event nobody listens to is a no-op. Each listener runs to
    /// completion before the next one starts. A listener unsubscribed by an
    /// earlier listener during this emission is skipped; a listener
    /// registered during this emission first runs on the next one.
    ///
    /// # Panics
    ///
    /// Panics if emissions nest deeper than [`max_depth`](Self::max_depth),
    /// which means some listener chain re-triggers itself without end.
    #[tracing::instrument(skip(self), target = "todo_lattice_core::signal", level = "trace")]
    pub fn emit(&self, event: E) {
        let snapshot = self.registry.lock().snapshot(event);
        if snapshot.is_empty() {
            tracing::trace!(target: "todo_lattice_core::signal", "no listeners, skipping emit");
            return;
        }

        let _depth = DepthGuard::enter(&self.depth, self.max_depth(), &event);
        tracing::trace!(
            target: "todo_lattice_core::signal",
            listener_count = snapshot.len(),
            depth = self.emit_depth(),
            "emitting event"
        );

        for (id, listener) in snapshot {
            let live = self.registry.lock().listeners.contains_key(id);
            if live {
                listener();
            }
        }
    }
}

impl<E: EventKind> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.total_listener_count())
            .field("depth", &self.emit_depth())
            .field("max_depth", &self.max_depth())
            .finish()
    }
}

/// Tracks one level of `emit` nesting; unwinds cleanly on panic.
struct DepthGuard<'a> {
    depth: &'a AtomicUsize,
}

impl<'a> DepthGuard<'a> {
    fn enter<E: fmt::Debug>(depth: &'a AtomicUsize, max_depth: usize, event: &E) -> Self {
        let current = depth.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = Self { depth };
        if current > max_depth {
            tracing::error!(
                target: "todo_lattice_core::signal",
                ?event,
                depth = current,
                max_depth,
                "re-entrant emission limit exceeded"
            );
            panic!(
                "emitting {event:?} nested {current} levels deep (limit {max_depth}): \
                 a listener keeps re-triggering notifications"
            );
        }
        guard
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A subscription that unsubscribes when dropped.
///
/// Created by [`EventEmitter::on_scoped`]. The guard only holds a weak
/// reference to the emitter's listener storage, so it may outlive the
/// emitter; dropping it then does nothing.
#[must_use = "dropping the guard immediately unsubscribes the listener"]
pub struct ListenerGuard<E: EventKind = StoreEvent> {
    registry: Weak<Mutex<ListenerRegistry<E>>>,
    id: ListenerId,
}

impl<E: EventKind> ListenerGuard<E> {
    /// The ID of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn disconnect(self) {}
}

impl<E: EventKind> Drop for ListenerGuard<E> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.lock().remove(self.id);
            drop(removed);
        }
    }
}

impl<E: EventKind> fmt::Debug for ListenerGuard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

static_assertions::assert_impl_all!(EventEmitter<StoreEvent>: Send, Sync);
static_assertions::assert_impl_all!(ListenerGuard<StoreEvent>: Send, Sync);
