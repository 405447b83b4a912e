//! Logging and debugging facilities.
//!
//! This module provides:
//! - Target names for filtering the crate's `tracing` output
//! - Convenience macros wrapping `tracing` with the core target
//! - [`StoreDebug`], a text rendering of the store's contents
//!
//! # Tracing Integration
//!
//! The crates emit `tracing` events but never install a subscriber. To see
//! logs, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("todo_lattice_core::store=debug")
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;

use crate::store::AppState;
use crate::todo::Todo;

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "todo_lattice_core";
    /// Store mutations.
    pub const STORE: &str = "todo_lattice_core::store";
    /// Event emission.
    pub const SIGNAL: &str = "todo_lattice_core::signal";
    /// Style delegation.
    pub const STYLE: &str = "todo_lattice_core::style";
    /// Configuration loading.
    pub const CONFIG: &str = "todo_lattice_core::config";
    /// Headless view models.
    pub const VIEW: &str = "todo_lattice::view";
    /// [`super::PerfSpan`] spans.
    pub const PERF: &str = "todo_lattice::perf";
}

/// Branch characters used by [`StoreDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// No branches, one todo per line.
    Compact,
}

/// Renders the store as a text tree, one line per todo.
///
/// ```
/// use todo_lattice_core::{AppState, ThemeStyles};
/// use todo_lattice_core::logging::{StoreDebug, TreeStyle};
///
/// let state = AppState::new(ThemeStyles::default());
/// state.add_todo("buy milk");
///
/// let text = StoreDebug::new().with_style(TreeStyle::Ascii).format(&state);
/// assert!(text.contains("+-- [ ] buy milk"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreDebug {
    style: TreeStyle,
    show_ids: bool,
    filtered: bool,
}

impl StoreDebug {
    /// Unicode tree of every todo, without handles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different branch style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Append each todo's handle.
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    /// Only list todos visible under the current filter.
    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    /// Render `state`.
    pub fn format(&self, state: &AppState) -> String {
        let todos: Vec<_> = if self.filtered {
            crate::filtered::filtered_todos(state).collect()
        } else {
            state.todos()
        };

        let mut output = String::new();
        writeln!(
            output,
            "Todos ({} shown, {} total, filter: {}, style: {}):",
            todos.len(),
            state.len(),
            state.todos_filter(),
            state.gui_style()
        )
        .expect("write to String");

        if todos.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
        }

        let count = todos.len();
        for (i, (id, todo)) in todos.iter().enumerate() {
            output.push_str(self.prefix(i + 1 == count));
            output.push_str(&Self::describe(todo));
            if self.show_ids {
                write!(output, " [{id:?}]").expect("write to String");
            }
            output.push('\n');
        }

        output
    }

    fn prefix(&self, is_last: bool) -> &'static str {
        match (self.style, is_last) {
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (TreeStyle::Compact, _) => "- ",
        }
    }

    fn describe(todo: &Todo) -> String {
        let mark = if todo.done { 'x' } else { ' ' };
        let mut line = format!("[{mark}] {}", todo.text);
        if todo.editing {
            line.push_str(" (editing)");
        }
        line
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Spans are emitted at `info` under [`targets::PERF`]; a subscriber with
/// span timing shows how long the guarded operation took.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a span named after `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: "todo_lattice::perf", "perf", operation);
        Self {
            span: span.entered(),
        }
    }
}

#[macro_export]
macro_rules! todo_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "todo_lattice_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! todo_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "todo_lattice_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! todo_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "todo_lattice_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! todo_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "todo_lattice_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! todo_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "todo_lattice_core", $($arg)*)
    };
}
