//! Menu of checkable GUI style actions.

use std::sync::Arc;

use todo_lattice_core::{AppState, Result, StoreEvent};

use super::Binding;

/// Render state of one style action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAction {
    /// Style name as the host reports it.
    pub key: String,
    /// Menu entry text.
    pub label: String,
    /// Whether this is the current style.
    pub checked: bool,
}

/// One action per style the host offers; the current one is checked.
pub struct StyleMenu {
    state: Arc<AppState>,
    binding: Binding<Vec<StyleAction>>,
}

impl StyleMenu {
    /// Create the menu, bound to `state`.
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
            binding: Binding::new(state, "style_menu", &[StoreEvent::GuiStyleChange], render),
        }
    }

    /// The rendered actions, in the host's order.
    pub fn actions(&self) -> Vec<StyleAction> {
        self.binding.cache.get()
    }

    /// Key of the checked action.
    pub fn checked(&self) -> Option<String> {
        self.binding.cache.with(|actions| {
            actions
                .iter()
                .find(|action| action.checked)
                .map(|action| action.key.clone())
        })
    }

    /// Handle an action being triggered.
    pub fn trigger(&self, key: &str) -> Result<()> {
        self.state.set_gui_style(key)
    }

    /// Number of times the actions have been rendered.
    pub fn render_count(&self) -> usize {
        self.binding.cache.render_count()
    }
}

fn render(state: &AppState) -> Vec<StyleAction> {
    let current = state.gui_style();
    state
        .gui_style_keys()
        .into_iter()
        .map(|key| StyleAction {
            label: format!("{key} style"),
            checked: key.to_lowercase() == current,
            key,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_lattice_core::{ThemeMode, ThemeStyles, TodoError};

    #[test]
    fn test_actions() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let menu = StyleMenu::new(&state);

        let labels: Vec<_> = menu.actions().into_iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["Light style", "Dark style", "HighContrast style"]);
        assert_eq!(menu.checked().as_deref(), Some("Light"));
    }

    #[test]
    fn test_trigger_checks_exactly_one() {
        let state = Arc::new(AppState::new(ThemeStyles::new(ThemeMode::Dark)));
        let menu = StyleMenu::new(&state);
        assert_eq!(menu.checked().as_deref(), Some("Dark"));

        menu.trigger("HighContrast").unwrap();
        assert_eq!(menu.checked().as_deref(), Some("HighContrast"));
        assert_eq!(menu.actions().iter().filter(|a| a.checked).count(), 1);
        assert_eq!(menu.render_count(), 2);
    }

    #[test]
    fn test_unknown_style_keeps_selection() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let menu = StyleMenu::new(&state);

        let err = menu.trigger("Motif").unwrap_err();
        assert!(matches!(err, TodoError::UnknownStyle { .. }));
        assert_eq!(menu.checked().as_deref(), Some("Light"));
        assert_eq!(menu.render_count(), 1);
    }
}
