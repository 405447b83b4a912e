//! Footer: remaining count, filter bar and clear-completed button.

use std::sync::Arc;

use todo_lattice_core::{AppState, Filter, StoreEvent};

use super::Binding;

/// Label of the clear-completed button.
pub const CLEAR_COMPLETED_LABEL: &str = "Clear Completed";

/// "N items left!" label.
///
/// Counts every todo that is not done, whatever the filter.
pub struct RemainingLabel {
    binding: Binding<String>,
}

impl RemainingLabel {
    /// Create the label, bound to `state`.
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            binding: Binding::new(state, "remaining_label", &[StoreEvent::TodosChange], |state| {
                let remaining = state.todos().iter().filter(|(_, todo)| !todo.done).count();
                remaining_text(remaining)
            }),
        }
    }

    /// Get the label text.
    pub fn text(&self) -> String {
        self.binding.cache.get()
    }

    /// Number of times the text has been rendered.
    pub fn render_count(&self) -> usize {
        self.binding.cache.render_count()
    }
}

fn remaining_text(remaining: usize) -> String {
    let plural = if remaining == 1 { "" } else { "s" };
    format!("{remaining} item{plural} left!")
}

/// Render state of one filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// The filter the button selects.
    pub filter: Filter,
    /// Button text.
    pub label: &'static str,
    /// Whether `filter` is the active filter.
    pub checked: bool,
}

/// Checkable buttons selecting the filter.
pub struct FilterBar {
    state: Arc<AppState>,
    binding: Binding<Vec<FilterButton>>,
}

impl FilterBar {
    /// Create the filter bar, bound to `state`.
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
            binding: Binding::new(state, "filter_bar", &[StoreEvent::FilterChange], |state| {
                let current = state.todos_filter();
                Filter::ALL
                    .into_iter()
                    .map(|filter| FilterButton {
                        filter,
                        label: filter.label(),
                        checked: filter == current,
                    })
                    .collect()
            }),
        }
    }

    /// The rendered buttons, one per filter.
    pub fn buttons(&self) -> Vec<FilterButton> {
        self.binding.cache.get()
    }

    /// The filter whose button is checked.
    pub fn checked(&self) -> Option<Filter> {
        self.binding
            .cache
            .with(|buttons| buttons.iter().find(|b| b.checked).map(|b| b.filter))
    }

    /// Handle a click on the button for `filter`.
    pub fn click(&self, filter: Filter) {
        self.state.set_todos_filter(filter);
    }

    /// Number of times the buttons have been rendered.
    pub fn render_count(&self) -> usize {
        self.binding.cache.render_count()
    }
}

/// The footer row, hidden while there are no todos.
pub struct Footer {
    state: Arc<AppState>,
    visible: Binding<bool>,
    remaining: RemainingLabel,
    filters: FilterBar,
}

impl Footer {
    /// Create the footer and its children, bound to `state`.
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
            visible: Binding::new(state, "footer", &[StoreEvent::TodosChange], |state| {
                !state.is_empty()
            }),
            remaining: RemainingLabel::new(state),
            filters: FilterBar::new(state),
        }
    }

    /// Whether the footer is shown.
    pub fn is_visible(&self) -> bool {
        self.visible.cache.get()
    }

    /// Get the remaining-count label.
    pub fn remaining(&self) -> &RemainingLabel {
        &self.remaining
    }

    /// Get the filter bar.
    pub fn filters(&self) -> &FilterBar {
        &self.filters
    }

    /// Get the clear-completed button text.
    pub fn clear_completed_label(&self) -> &'static str {
        CLEAR_COMPLETED_LABEL
    }

    /// Handle the clear-completed button.
    pub fn clear_completed(&self) {
        self.state.delete_todos_done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_lattice_core::ThemeStyles;

    fn setup() -> Arc<AppState> {
        Arc::new(AppState::new(ThemeStyles::default()))
    }

    #[test]
    fn test_remaining_text() {
        assert_eq!(remaining_text(0), "0 items left!");
        assert_eq!(remaining_text(1), "1 item left!");
        assert_eq!(remaining_text(2), "2 items left!");
    }

    #[test]
    fn test_remaining_ignores_filter() {
        let state = setup();
        let label = RemainingLabel::new(&state);
        let a = state.add_todo("a");
        state.add_todo("b");
        state.add_todo("c");
        state.set_todos_done([a], true);
        state.set_todos_filter(Filter::Completed);

        assert_eq!(label.text(), "2 items left!");
        // Filter changes don't affect the count, so they don't re-render it.
        assert_eq!(label.render_count(), 5);
    }

    #[test]
    fn test_filter_bar() {
        let state = setup();
        let bar = FilterBar::new(&state);

        let labels: Vec<_> = bar.buttons().iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["All", "Active", "Completed"]);
        assert_eq!(bar.checked(), Some(Filter::All));

        bar.click(Filter::Active);
        assert_eq!(state.todos_filter(), Filter::Active);
        assert_eq!(bar.checked(), Some(Filter::Active));
        assert_eq!(bar.buttons().iter().filter(|b| b.checked).count(), 1);

        state.add_todo("a");
        assert_eq!(bar.render_count(), 2);
    }

    #[test]
    fn test_footer_visibility_and_clear() {
        let state = setup();
        let footer = Footer::new(&state);
        assert!(!footer.is_visible());

        let a = state.add_todo("a");
        assert!(footer.is_visible());

        state.set_todos_done([a], true);
        footer.clear_completed();
        assert!(!footer.is_visible());
        assert_eq!(footer.remaining().text(), "0 items left!");
        assert_eq!(footer.filters().checked(), Some(Filter::All));
        assert_eq!(footer.clear_completed_label(), "Clear Completed");
    }
}
