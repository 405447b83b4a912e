//! The TodoMVC window as a composition of view models.

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use todo_lattice_core::{AppState, PerfSpan};

use super::{Footer, MarkAll, NewTodoInput, StyleMenu, TodoList, DELETE_LABEL};

/// Title of the window.
const TITLE: &str = "Todos";

/// Every view model of a TodoMVC window, bound to one store.
///
/// [`render`](Self::render) paints the whole window as plain text, which is
/// what the console demo shows after each command.
pub struct TodoApp {
    state: Arc<AppState>,
    input: NewTodoInput,
    mark_all: MarkAll,
    list: TodoList,
    footer: Footer,
    style_menu: StyleMenu,
}

impl TodoApp {
    /// Create every view model of the window, bound to `state`.
    pub fn new(state: Arc<AppState>) -> Self {
        tracing::debug!(target: "todo_lattice::view", "building view models");
        Self {
            input: NewTodoInput::new(state.clone()),
            mark_all: MarkAll::new(&state),
            list: TodoList::new(&state),
            footer: Footer::new(&state),
            style_menu: StyleMenu::new(&state),
            state,
        }
    }

    /// Get the window title.
    pub fn title(&self) -> &'static str {
        TITLE
    }

    /// Get the store the window is bound to.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the new-todo input.
    pub fn input(&self) -> &NewTodoInput {
        &self.input
    }

    /// Get the mark-all checkbox.
    pub fn mark_all(&self) -> &MarkAll {
        &self.mark_all
    }

    /// Get the todo list.
    pub fn list(&self) -> &TodoList {
        &self.list
    }

    /// Get the footer.
    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    /// Get the style menu.
    pub fn style_menu(&self) -> &StyleMenu {
        &self.style_menu
    }

    /// Paint the window as text.
    ///
    /// Rows are numbered from 1 in display order. Struck-out labels are
    /// wrapped in `~`, rows being edited show their text in a `<...>` box.
    pub fn render(&self) -> String {
        let _span = PerfSpan::new("render_window");
        let mut out = String::new();
        writeln!(out, "== {} ==", self.title()).expect("write to String");
        writeln!(out, "{} {}", self.mark_all.check_state(), self.input.placeholder())
            .expect("write to String");

        for (i, row) in self.list.rows().iter().enumerate() {
            let check = if row.done { "[x]" } else { "[ ]" };
            let text = if row.editing {
                format!("<{}>", row.text)
            } else if row.struck_out {
                format!("~{}~", row.text)
            } else {
                row.text.clone()
            };
            writeln!(out, "{:>3}. {check} {text} {DELETE_LABEL}", i + 1).expect("write to String");
        }

        if self.footer.is_visible() {
            let filters: Vec<String> = self
                .footer
                .filters()
                .buttons()
                .into_iter()
                .map(|b| {
                    if b.checked {
                        format!("({})", b.label)
                    } else {
                        b.label.to_string()
                    }
                })
                .collect();
            writeln!(
                out,
                "{} | {} | [{}]",
                self.footer.remaining().text(),
                filters.join(" "),
                self.footer.clear_completed_label()
            )
            .expect("write to String");
        }

        let styles: Vec<String> = self
            .style_menu
            .actions()
            .into_iter()
            .map(|a| if a.checked { format!("({})", a.key) } else { a.key })
            .collect();
        writeln!(out, "style: {}", styles.join(" ")).expect("write to String");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DoubleClickEdit;
    use todo_lattice_core::{Filter, ThemeStyles};

    fn app() -> TodoApp {
        TodoApp::new(Arc::new(AppState::new(ThemeStyles::default())))
    }

    #[test]
    fn test_empty_window() {
        let app = app();
        assert_eq!(app.title(), "Todos");
        assert_eq!(
            app.render(),
            "== Todos ==\n[ ] What needs to be done?\nstyle: (Light) Dark HighContrast\n"
        );
    }

    #[test]
    fn test_render_rows_and_footer() {
        let app = app();
        let a = app.input().submit("milk").unwrap();
        let b = app.input().submit("eggs").unwrap();
        app.list().toggle(a, true);
        app.list().on_double_click(b);

        let frame = app.render();
        let lines: Vec<_> = frame.lines().collect();
        assert_eq!(lines[1], "[-] What needs to be done?");
        assert_eq!(lines[2], "  1. [x] ~milk~ \u{2717}");
        assert_eq!(lines[3], "  2. [ ] <eggs> \u{2717}");
        assert_eq!(
            lines[4],
            "1 item left! | (All) Active Completed | [Clear Completed]"
        );
    }

    #[test]
    fn test_views_stay_in_sync() {
        let app = app();
        let a = app.input().submit("x").unwrap();
        app.list().toggle(a, true);
        app.footer().filters().click(Filter::Completed);

        assert_eq!(app.list().rows().len(), 1);
        assert!(app.mark_all().check_state().is_checked());

        app.footer().clear_completed();
        assert!(app.list().is_empty());
        assert!(!app.footer().is_visible());
        assert!(app.state().is_empty());
    }

    #[test]
    fn test_drop_unsubscribes_everything() {
        let state = Arc::new(AppState::new(ThemeStyles::default()));
        let app = TodoApp::new(state.clone());
        assert!(state.events().total_listener_count() > 0);

        drop(app);
        assert_eq!(state.events().total_listener_count(), 0);
        assert_eq!(Arc::strong_count(&state), 1);
    }
}
