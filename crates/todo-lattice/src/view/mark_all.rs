//! Tri-state "mark all" checkbox.

use std::fmt;
use std::sync::Arc;

use todo_lattice_core::{filtered_todos, AppState, StoreEvent};

use super::Binding;

/// Tooltip of the mark-all checkbox.
pub const MARK_ALL_TOOLTIP: &str = "Mark all";

/// The check state of a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// Not checked.
    #[default]
    Unchecked,
    /// Checked.
    Checked,
    /// Indeterminate: some, but not all, items are checked.
    PartiallyChecked,
}

impl CheckState {
    /// Returns `true` if the state is `Checked`.
    pub fn is_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Returns `true` if the state is `PartiallyChecked`.
    pub fn is_partially_checked(&self) -> bool {
        matches!(self, CheckState::PartiallyChecked)
    }

    /// Combine the done flags of a set of items.
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        let (mut any_done, mut any_open) = (false, false);
        for done in flags {
            if done {
                any_done = true;
            } else {
                any_open = true;
            }
        }
        match (any_done, any_open) {
            (true, true) => CheckState::PartiallyChecked,
            (true, false) => CheckState::Checked,
            _ => CheckState::Unchecked,
        }
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckState::Unchecked => "[ ]",
            CheckState::Checked => "[x]",
            CheckState::PartiallyChecked => "[-]",
        })
    }
}

/// Marks every visible todo done or not done.
///
/// Its state reflects only the todos visible under the current filter, so it
/// re-renders on both todo and filter changes.
pub struct MarkAll {
    state: Arc<AppState>,
    binding: Binding<CheckState>,
}

impl MarkAll {
    /// Create the checkbox, bound to `state`.
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
            binding: Binding::new(
                state,
                "mark_all",
                &[StoreEvent::TodosChange, StoreEvent::FilterChange],
                render,
            ),
        }
    }

    /// The rendered check state.
    pub fn check_state(&self) -> CheckState {
        self.binding.cache.get()
    }

    /// Get the tooltip text.
    pub fn tooltip(&self) -> &'static str {
        MARK_ALL_TOOLTIP
    }

    /// Handle the checkbox being released in the `checked` state.
    pub fn release(&self, checked: bool) {
        let visible = filtered_todos(&self.state).ids();
        tracing::debug!(target: "todo_lattice::view", count = visible.len(), checked, "mark all");
        self.state.set_todos_done(visible, checked);
    }

    /// Mark everything visible done, or undone if it already all is.
    pub fn toggle(&self) {
        self.release(!self.check_state().is_checked());
    }

    /// Number of times the check state has been rendered.
    pub fn render_count(&self) -> usize {
        self.binding.cache.render_count()
    }
}

fn render(state: &AppState) -> CheckState {
    CheckState::from_flags(filtered_todos(state).map(|(_, todo)| todo.done))
}
