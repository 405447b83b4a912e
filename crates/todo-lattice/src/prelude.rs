//! Prelude module for Todo Lattice.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use todo_lattice::prelude::*;
//! ```

// ============================================================================
// Store
// ============================================================================

pub use crate::{filtered_todos, AppState, Filter, Todo, TodoId};

// ============================================================================
// Events
// ============================================================================

pub use crate::{EventEmitter, ListenerGuard, ListenerId, StoreEvent};

// ============================================================================
// Styles and Configuration
// ============================================================================

pub use crate::{AppConfig, StyleHost, ThemeMode, ThemeStyles};

// ============================================================================
// Errors
// ============================================================================

pub use crate::{Result, TodoError};

// ============================================================================
// View Models
// ============================================================================

pub use crate::view::{
    CheckState, DoubleClickEdit, FilterBar, Footer, MarkAll, NewTodoInput, RemainingLabel,
    StyleMenu, TodoApp, TodoList,
};
