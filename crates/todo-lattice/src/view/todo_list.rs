//! The list of visible todos.

use std::sync::Arc;

use todo_lattice_core::{filtered_todos, AppState, StoreEvent, TodoId};

use super::{accept_input, Binding};

/// Label of a row's delete button.
pub const DELETE_LABEL: &str = "\u{2717}";

/// Tooltip of a row's delete button.
pub const DELETE_TOOLTIP: &str = "Delete entry";

/// Render state of one todo row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    /// Handle of the todo the row shows.
    pub id: TodoId,
    /// Label or line-edit text.
    pub text: String,
    /// State of the row's checkbox.
    pub done: bool,
    /// The row shows a line edit instead of a label.
    pub editing: bool,
    /// The label is drawn struck out. Only labels are, never line edits.
    pub struck_out: bool,
}

/// Views that switch a row into inline editing on double click.
///
/// Rendering strategies that have no double-click gesture simply don't
/// implement it.
pub trait DoubleClickEdit {
    /// Handle a double click on the row of `id`.
    ///
    /// Returns `true` if the row entered editing mode.
    fn on_double_click(&self, id: TodoId) -> bool;
}

/// Rows for the todos visible under the current filter.
pub struct TodoList {
    state: Arc<AppState>,
    binding: Binding<Vec<TodoRow>>,
}

impl TodoList {
    /// Create the list, bound to `state`.
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
            binding: Binding::new(
                state,
                "todo_list",
                &[StoreEvent::TodosChange, StoreEvent::FilterChange],
                render,
            ),
        }
    }

    /// The rendered rows, in store order.
    pub fn rows(&self) -> Vec<TodoRow> {
        self.binding.cache.get()
    }

    /// The rendered row for `id`, if it is visible.
    pub fn row(&self, id: TodoId) -> Option<TodoRow> {
        self.binding
            .cache
            .with(|rows| rows.iter().find(|row| row.id == id).cloned())
    }

    /// Whether no row is visible.
    pub fn is_empty(&self) -> bool {
        self.binding.cache.with(Vec::is_empty)
    }

    /// Handle a row's checkbox being toggled.
    pub fn toggle(&self, id: TodoId, checked: bool) {
        self.state.set_todos_done([id], checked);
    }

    /// Handle the return key in a row's line edit.
    ///
    /// Blank text is ignored and the row stays in editing mode. Returns
    /// `true` if the text was committed.
    pub fn commit_edit(&self, id: TodoId, text: &str) -> bool {
        match accept_input(text) {
            Some(text) => {
                self.state.set_todo_text(id, text);
                true
            }
            None => false,
        }
    }

    /// Handle a row's delete button.
    pub fn delete(&self, id: TodoId) {
        self.state.delete_todo(id);
    }

    /// Number of times the rows have been rendered.
    pub fn render_count(&self) -> usize {
        self.binding.cache.render_count()
    }
}

impl DoubleClickEdit for TodoList {
    fn on_double_click(&self, id: TodoId) -> bool {
        let editable = self.row(id).is_some_and(|row| !row.editing);
        if editable {
            self.state.set_todo_editing(id);
        }
        editable
    }
}

fn render(state: &AppState) -> Vec<TodoRow> {
    filtered_todos(state)
        .map(|(id, todo)| TodoRow {
            id,
            struck_out: todo.done && !todo.editing,
            text: todo.text,
            done: todo.done,
            editing: todo.editing,
        })
        .collect()
}
