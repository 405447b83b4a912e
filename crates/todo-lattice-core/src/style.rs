//! GUI style delegation.
//!
//! The store does not own any styling logic. It forwards style changes to a
//! [`StyleHost`], the capability a widget toolkit exposes for switching its
//! global look, and reports the host's current style name back to views.
//! [`ThemeStyles`] is a built-in host offering the light, dark and
//! high-contrast theme modes.

use std::fmt;

use parking_lot::RwLock;

use crate::error::{Result, TodoError};

/// A toolkit capability for switching the application-wide style.
pub trait StyleHost: Send + Sync {
    /// Style names as they should appear in menus.
    fn style_keys(&self) -> Vec<String>;

    /// Switch to the style named `name`.
    ///
    /// Names match case-insensitively. Unknown names are rejected with
    /// [`TodoError::UnknownStyle`] and leave the current style unchanged.
    fn apply_style(&self, name: &str) -> Result<()>;

    /// The current style name, lower-cased.
    fn style_name(&self) -> String;
}

/// Theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
    /// Maximum contrast for accessibility.
    HighContrast,
}

impl ThemeMode {
    /// Every theme mode, in menu order.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::HighContrast];

    /// The menu key for this mode.
    pub fn key(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::HighContrast => "HighContrast",
        }
    }

    /// Look up a mode by key, ignoring case.
    pub fn from_key(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Built-in style host switching between [`ThemeMode`]s.
#[derive(Debug, Default)]
pub struct ThemeStyles {
    mode: RwLock<ThemeMode>,
}

impl ThemeStyles {
    /// Create a host starting in `mode`.
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode: RwLock::new(mode),
        }
    }

    /// The active theme mode.
    pub fn mode(&self) -> ThemeMode {
        *self.mode.read()
    }
}

impl StyleHost for ThemeStyles {
    fn style_keys(&self) -> Vec<String> {
        ThemeMode::ALL.iter().map(|mode| mode.key().to_string()).collect()
    }

    fn apply_style(&self, name: &str) -> Result<()> {
        let mode = ThemeMode::from_key(name).ok_or_else(|| {
            tracing::warn!(target: "todo_lattice_core::style", name, "rejected unknown style");
            TodoError::unknown_style(name, self.style_keys())
        })?;
        *self.mode.write() = mode;
        tracing::debug!(target: "todo_lattice_core::style", %mode, "style applied");
        Ok(())
    }

    fn style_name(&self) -> String {
        self.mode().key().to_lowercase()
    }
}
