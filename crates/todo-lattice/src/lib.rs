//! Todo Lattice - the state core of a TodoMVC application.
//!
//! This is the umbrella crate. It re-exports the store, the typed event
//! emitter and the filtering helpers from `todo-lattice-core`, and adds
//! [`view`], a set of headless view models that keep themselves in sync
//! with the store through its events.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use todo_lattice::prelude::*;
//!
//! let state = Arc::new(AppState::new(ThemeStyles::default()));
//! let app = TodoApp::new(state.clone());
//!
//! let id = app.input().submit("write docs").unwrap();
//! app.list().toggle(id, true);
//!
//! assert_eq!(app.footer().remaining().text(), "0 items left!");
//! assert!(app.mark_all().check_state().is_checked());
//! ```

pub use todo_lattice_core::*;

pub mod prelude;
pub mod view;
