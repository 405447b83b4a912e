//! Core state management for todo-lattice.
//!
//! This crate provides the unidirectional data flow behind a TodoMVC-style
//! application:
//!
//! - **Store**: [`AppState`], the single source of truth for todos, the
//!   active [`Filter`] and the GUI style
//! - **Event Emitter**: [`EventEmitter`], typed payload-free notifications
//!   with explicit and RAII unsubscription
//! - **Filtered View**: [`filtered_todos`], the todos visible under the
//!   current filter
//! - **Style Host**: [`StyleHost`], the toolkit capability style changes are
//!   delegated to, with the built-in [`ThemeStyles`]
//! - **Configuration**: [`AppConfig`], optional TOML startup settings
//!
//! Views never mutate todos directly. They call store mutators, and the store
//! notifies them through [`StoreEvent`]s so they can re-read what they render.
//!
//! # Example
//!
//! ```
//! use todo_lattice_core::{AppState, Filter, ThemeStyles, filtered_todos};
//!
//! let state = AppState::new(ThemeStyles::default());
//! let x = state.add_todo("x");
//!
//! state.set_todos_filter(Filter::Completed);
//! assert_eq!(filtered_todos(&state).count(), 0);
//!
//! state.set_todos_done([x], true);
//! let visible: Vec<_> = filtered_todos(&state).map(|(_, todo)| todo.text).collect();
//! assert_eq!(visible, vec!["x"]);
//! ```

mod config;
mod error;
mod filtered;
pub mod logging;
pub mod signal;
mod store;
pub mod style;
pub mod thread_check;
mod todo;

pub use config::AppConfig;
pub use error::{Result, TodoError};
pub use filtered::{filtered_todos, FilteredTodos};
pub use logging::{PerfSpan, StoreDebug, TreeStyle};
pub use signal::{
    EventEmitter, EventKind, ListenerGuard, ListenerId, StoreEvent, DEFAULT_MAX_EMIT_DEPTH,
};
pub use store::AppState;
pub use style::{StyleHost, ThemeMode, ThemeStyles};
pub use todo::{Filter, Todo, TodoId};
