//! Headless view models.
//!
//! Each view model plays the part of one widget of a TodoMVC window without
//! depending on a widget toolkit: it subscribes to the store events it
//! depends on, re-renders its state when notified, and forwards user input
//! to store mutators. A toolkit binding only has to paint what the view
//! models expose and call their input methods.
//!
//! Subscriptions are scoped: dropping a view model unsubscribes it, so views
//! may be torn down and rebuilt freely.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use todo_lattice::{AppState, ThemeStyles};
//! use todo_lattice::view::{NewTodoInput, RemainingLabel};
//!
//! let state = Arc::new(AppState::new(ThemeStyles::default()));
//! let input = NewTodoInput::new(state.clone());
//! let remaining = RemainingLabel::new(&state);
//!
//! input.submit("  buy milk  ");
//! input.submit("   "); // ignored
//! assert_eq!(remaining.text(), "1 item left!");
//! ```

mod app;
mod footer;
mod input;
mod mark_all;
mod style_menu;
mod todo_list;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use todo_lattice_core::{AppState, ListenerGuard, StoreEvent};

pub use app::TodoApp;
pub use footer::{FilterBar, FilterButton, Footer, RemainingLabel, CLEAR_COMPLETED_LABEL};
pub use input::{NewTodoInput, NEW_TODO_PLACEHOLDER};
pub use mark_all::{CheckState, MarkAll, MARK_ALL_TOOLTIP};
pub use style_menu::{StyleAction, StyleMenu};
pub use todo_list::{DoubleClickEdit, TodoList, TodoRow, DELETE_LABEL, DELETE_TOOLTIP};

/// Last rendered state of a view model.
pub(crate) struct RenderCache<T> {
    value: RwLock<T>,
    renders: AtomicUsize,
}

impl<T: Clone> RenderCache<T> {
    fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            renders: AtomicUsize::new(1),
        }
    }

    pub(crate) fn get(&self) -> T {
        self.value.read().clone()
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    fn store(&self, value: T) {
        *self.value.write() = value;
        self.renders.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

/// A rendered view bound to store events.
pub(crate) struct Binding<T> {
    pub(crate) cache: Arc<RenderCache<T>>,
    _subscriptions: Vec<ListenerGuard>,
}

impl<T: Clone + Send + Sync + 'static> Binding<T> {
    /// Render once now, then again whenever any of `events` fires.
    ///
    /// Listeners hold the store weakly; a store kept alive only by its own
    /// listeners would never be freed.
    pub(crate) fn new(
        state: &Arc<AppState>,
        view: &'static str,
        events: &[StoreEvent],
        render: fn(&AppState) -> T,
    ) -> Self {
        let cache = Arc::new(RenderCache::new(render(state)));
        let subscriptions = events
            .iter()
            .map(|&event| {
                let weak = Arc::downgrade(state);
                let cache = cache.clone();
                state.events().on_scoped(event, move || {
                    if let Some(state) = weak.upgrade() {
                        cache.store(render(&state));
                        tracing::trace!(target: "todo_lattice::view", view, %event, "re-rendered");
                    }
                })
            })
            .collect();

        Self {
            cache,
            _subscriptions: subscriptions,
        }
    }
}

/// Trim user input, rejecting what is left empty.
pub(crate) fn accept_input(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_lattice_core::ThemeStyles;

    #[test]
    fn test_accept_input() {
        assert_eq!(accept_input("  milk \n"), Some("milk"));
        assert_eq!(accept_input(" \t "), None);
        assert_eq!(accept_input(""), None);
    }

    #[test]
    fn test_binding_renders_initially_and_on_events() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let binding = Binding::new(&state, "len", &[StoreEvent::TodosChange], |s| s.len());

        assert_eq!(binding.cache.get(), 0);
        assert_eq!(binding.cache.render_count(), 1);

        state.add_todo("a");
        state.set_todos_filter(todo_lattice_core::Filter::Active);

        assert_eq!(binding.cache.get(), 1);
        assert_eq!(binding.cache.render_count(), 2);
    }

    #[test]
    fn test_binding_drop_unsubscribes() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let binding = Binding::new(
            &state,
            "len",
            &[StoreEvent::TodosChange, StoreEvent::FilterChange],
            |s| s.len(),
        );
        assert_eq!(state.events().total_listener_count(), 2);

        drop(binding);
        assert_eq!(state.events().total_listener_count(), 0);
    }
}
