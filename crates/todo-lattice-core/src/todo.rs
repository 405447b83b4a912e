//! Todo records and the visibility filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::TodoError;

new_key_type! {
    /// Stable handle to a todo owned by [`crate::AppState`].
    ///
    /// Handles compare by identity: two todos with the same text and flags
    /// have different handles, and the handle of a deleted todo never
    /// refers to a later one.
    pub struct TodoId;
}

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Todo {
    /// The todo's text.
    pub text: String,
    /// Whether the todo is completed.
    pub done: bool,
    /// Whether the todo is being edited inline. View-only, transient.
    pub editing: bool,
}

impl Todo {
    /// Create an active, non-editing todo.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
            editing: false,
        }
    }
}

/// Visibility rule over todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Filter {
    /// Every todo.
    #[default]
    All,
    /// Todos that are not done.
    Active,
    /// Todos that are done.
    Completed,
}

impl Filter {
    /// The filters in the order a filter bar shows them.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Whether `todo` is visible under this filter.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.done,
            Self::Completed => todo.done,
        }
    }

    /// The lower-case name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// The button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TodoError::InvalidFilter(s.to_string()))
    }
}

impl TryFrom<String> for Filter {
    type Error = TodoError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
