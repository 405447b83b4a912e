//! The application state store.
//!
//! [`AppState`] is the single source of truth for the todo list, the active
//! filter and the GUI style. UI interactions call its mutators; each mutator
//! applies its change and then emits exactly one [`StoreEvent`] so that
//! subscribed views re-read the state and re-render.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use todo_lattice_core::{AppState, Filter, StoreEvent, ThemeStyles, filtered_todos};
//!
//! let state = AppState::new(ThemeStyles::default());
//! let renders = Arc::new(AtomicUsize::new(0));
//!
//! let renders_clone = renders.clone();
//! state.events().on(StoreEvent::TodosChange, move || {
//!     renders_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! let milk = state.add_todo("buy milk");
//! state.add_todo("walk dog");
//! state.set_todos_done([milk], true);
//! state.set_todos_filter(Filter::Active);
//!
//! let visible: Vec<String> = filtered_todos(&state).map(|(_, todo)| todo.text).collect();
//! assert_eq!(visible, vec!["walk dog"]);
//! assert_eq!(renders.load(Ordering::SeqCst), 3);
//! ```

use std::fmt;

use parking_lot::RwLock;
use slotmap::SlotMap;

use crate::config::AppConfig;
use crate::error::Result;
use crate::signal::{EventEmitter, StoreEvent};
use crate::style::StyleHost;
use crate::thread_check::ThreadAffinity;
use crate::todo::{Filter, Todo, TodoId};

/// The data guarded by the store's lock.
#[derive(Debug, Default)]
struct TodoList {
    todos: SlotMap<TodoId, Todo>,
    /// Insertion order. Every live key appears exactly once.
    order: Vec<TodoId>,
    filter: Filter,
}

impl TodoList {
    fn push(&mut self, todo: Todo) -> TodoId {
        let id = self.todos.insert(todo);
        self.order.push(id);
        id
    }

    fn remove(&mut self, id: TodoId) -> Option<Todo> {
        let todo = self.todos.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(todo)
    }

    fn retain(&mut self, mut keep: impl FnMut(&Todo) -> bool) -> usize {
        let todos = &mut self.todos;
        let before = self.order.len();
        self.order.retain(|&id| {
            let kept = todos.get(id).is_some_and(&mut keep);
            if !kept {
                todos.remove(id);
            }
            kept
        });
        before - self.order.len()
    }
}

/// Single source of truth for todos, filter and style.
///
/// All methods take `&self`; share the store with listeners through an
/// `Arc`. The internal lock is never held while listeners run, so a
/// listener may read the store or call further mutators.
///
/// Mutators (other than [`set_gui_style`](Self::set_gui_style)) always
/// emit, even when the data did not change. Mutators given a handle that
/// no longer names a live todo leave the data untouched and still emit.
pub struct AppState {
    state: RwLock<TodoList>,
    events: EventEmitter<StoreEvent>,
    styles: Box<dyn StyleHost>,
    affinity: ThreadAffinity,
}

impl AppState {
    /// Create an empty store delegating styling to `styles`.
    pub fn new(styles: impl StyleHost + 'static) -> Self {
        Self {
            state: RwLock::new(TodoList::default()),
            events: EventEmitter::new(),
            styles: Box::new(styles),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Create a store seeded from `config`.
    ///
    /// Fails with [`crate::TodoError::UnknownStyle`] if the configured style
    /// is rejected by `styles`.
    pub fn with_config(config: &AppConfig, styles: impl StyleHost + 'static) -> Result<Self> {
        if let Some(style) = &config.gui_style {
            styles.apply_style(style)?;
        }
        let store = Self::new(styles);
        store.state.write().filter = config.filter;
        store.events.set_max_depth(config.max_emit_depth);
        tracing::info!(
            target: "todo_lattice_core::store",
            filter = %config.filter,
            style = %store.gui_style(),
            "store created"
        );
        Ok(store)
    }

    /// The store's event emitter. Views subscribe here.
    pub fn events(&self) -> &EventEmitter<StoreEvent> {
        &self.events
    }

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------

    /// Append a new active todo. The text is not validated.
    pub fn add_todo(&self, text: impl Into<String>) -> TodoId {
        let id = self.mutate(|list| list.push(Todo::new(text)));
        tracing::debug!(target: "todo_lattice_core::store", ?id, "todo added");
        self.events.emit(StoreEvent::TodosChange);
        id
    }

    /// Replace a todo's text and leave editing mode.
    pub fn set_todo_text(&self, id: TodoId, text: impl Into<String>) {
        let text = text.into();
        self.update_todo(id, "set_todo_text", |todo| {
            todo.text = text;
            todo.editing = false;
        });
        self.events.emit(StoreEvent::TodosChange);
    }

    /// Put a todo into inline-editing mode.
    pub fn set_todo_editing(&self, id: TodoId) {
        self.update_todo(id, "set_todo_editing", |todo| todo.editing = true);
        self.events.emit(StoreEvent::TodosChange);
    }

    /// Set the done flag on every given todo. An empty set still notifies.
    ///
    /// `ids` may be a lazy iterator over this store; it is drained before
    /// the write lock is taken.
    pub fn set_todos_done(&self, ids: impl IntoIterator<Item = TodoId>, done: bool) {
        let ids: Vec<TodoId> = ids.into_iter().collect();
        let updated = self.mutate(|list| {
            let mut updated = 0usize;
            for id in ids {
                if let Some(todo) = list.todos.get_mut(id) {
                    todo.done = done;
                    updated += 1;
                }
            }
            updated
        });
        tracing::debug!(target: "todo_lattice_core::store", updated, done, "todos marked");
        self.events.emit(StoreEvent::TodosChange);
    }

    /// Remove a todo. Absent handles are ignored.
    pub fn delete_todo(&self, id: TodoId) {
        let removed = self.mutate(|list| list.remove(id)).is_some();
        tracing::debug!(target: "todo_lattice_core::store", ?id, removed, "delete todo");
        self.events.emit(StoreEvent::TodosChange);
    }

    /// Remove every done todo, keeping the order of the rest.
    pub fn delete_todos_done(&self) {
        let removed = self.mutate(|list| list.retain(|todo| !todo.done));
        tracing::debug!(target: "todo_lattice_core::store", removed, "completed todos cleared");
        self.events.emit(StoreEvent::TodosChange);
    }

    /// Replace the active filter.
    pub fn set_todos_filter(&self, filter: Filter) {
        self.mutate(|list| list.filter = filter);
        tracing::debug!(target: "todo_lattice_core::store", %filter, "filter set");
        self.events.emit(StoreEvent::FilterChange);
    }

    /// Switch the GUI style through the style host.
    ///
    /// Nothing is emitted if the host rejects the name.
    pub fn set_gui_style(&self, name: &str) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        self.styles.apply_style(name)?;
        tracing::debug!(target: "todo_lattice_core::store", style = name, "gui style set");
        self.events.emit(StoreEvent::GuiStyleChange);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Snapshot of all todos in order.
    pub fn todos(&self) -> Vec<(TodoId, Todo)> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|&id| state.todos.get(id).map(|todo| (id, todo.clone())))
            .collect()
    }

    /// Handles of all todos in order.
    pub fn todo_ids(&self) -> Vec<TodoId> {
        self.state.read().order.clone()
    }

    /// A copy of one todo, if it is live.
    pub fn todo(&self, id: TodoId) -> Option<Todo> {
        self.state.read().todos.get(id).cloned()
    }

    /// Whether `id` names a live todo.
    pub fn contains(&self, id: TodoId) -> bool {
        self.state.read().todos.contains_key(id)
    }

    /// Number of todos.
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    /// Whether the store holds no todos.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The active filter.
    pub fn todos_filter(&self) -> Filter {
        self.state.read().filter
    }

    /// The current style name, lower-cased, as reported by the style host.
    pub fn gui_style(&self) -> String {
        self.styles.style_name()
    }

    /// Style names the host offers.
    pub fn gui_style_keys(&self) -> Vec<String> {
        self.styles.style_keys()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut TodoList) -> R) -> R {
        self.affinity.debug_assert_same_thread();
        let mut state = self.state.write();
        f(&mut state)
    }

    fn update_todo(&self, id: TodoId, operation: &'static str, f: impl FnOnce(&mut Todo)) {
        let found = self.mutate(|list| list.todos.get_mut(id).map(f)).is_some();
        if !found {
            tracing::debug!(target: "todo_lattice_core::store", ?id, operation, "stale todo handle ignored");
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("AppState")
            .field("todos", &state.order.len())
            .field("filter", &state.filter)
            .field("gui_style", &self.styles.style_name())
            .field("events", &self.events)
            .finish()
    }
}

static_assertions::assert_impl_all!(AppState: Send, Sync);
