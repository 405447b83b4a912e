//! Filtered view over the store.

use std::iter::FusedIterator;

use crate::store::AppState;
use crate::todo::{Filter, Todo, TodoId};

/// Todos visible under the store's current filter, in store order.
///
/// The iterator owns a snapshot taken when [`filtered_todos`] was called, so
/// the store may be mutated while it is consumed. Call [`filtered_todos`]
/// again to observe later changes.
#[derive(Debug, Clone)]
pub struct FilteredTodos {
    filter: Filter,
    inner: std::vec::IntoIter<(TodoId, Todo)>,
}

impl FilteredTodos {
    /// The filter this view was computed with.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Handles of the remaining todos.
    pub fn ids(self) -> Vec<TodoId> {
        self.map(|(id, _)| id).collect()
    }
}

impl Iterator for FilteredTodos {
    type Item = (TodoId, Todo);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for FilteredTodos {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for FilteredTodos {}

impl FusedIterator for FilteredTodos {}

/// Todos matching the store's current filter.
pub fn filtered_todos(state: &AppState) -> FilteredTodos {
    let filter = state.todos_filter();
    let visible: Vec<_> = state
        .todos()
        .into_iter()
        .filter(|(_, todo)| filter.matches(todo))
        .collect();
    FilteredTodos {
        filter,
        inner: visible.into_iter(),
    }
}
