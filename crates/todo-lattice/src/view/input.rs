//! New-todo line edit.

use std::sync::Arc;

use todo_lattice_core::{AppState, TodoId};

use super::accept_input;

/// Placeholder shown while the input is empty.
pub const NEW_TODO_PLACEHOLDER: &str = "What needs to be done?";

/// The input line that creates todos.
///
/// It renders nothing from the store, so it holds no subscriptions.
pub struct NewTodoInput {
    state: Arc<AppState>,
}

impl NewTodoInput {
    /// Create an input adding todos to `state`.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Get the placeholder text.
    pub fn placeholder(&self) -> &'static str {
        NEW_TODO_PLACEHOLDER
    }

    /// Handle the return key.
    ///
    /// Surrounding whitespace is trimmed. Blank input is ignored and returns
    /// `None`; otherwise the new todo's handle is returned and the caller
    /// should clear the line.
    pub fn submit(&self, text: &str) -> Option<TodoId> {
        let text = accept_input(text)?;
        Some(self.state.add_todo(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_lattice_core::ThemeStyles;

    #[test]
    fn test_submit_trims_and_adds() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let input = NewTodoInput::new(state.clone());

        let id = input.submit("  write tests  ").unwrap();
        assert_eq!(state.todo(id).unwrap().text, "write tests");
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let input = NewTodoInput::new(state.clone());

        assert!(input.submit("").is_none());
        assert!(input.submit("   ").is_none());
        assert!(state.is_empty());
        assert_eq!(input.placeholder(), "What needs to be done?");
    }
}
