//! Light/dark palettes and the persisted theme preference.

use crate::storage::{Storage, StorageError};
use colored::Color;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                user: Color::Blue,
                assistant: Color::Black,
                accent: Color::Magenta,
                muted: Color::BrightBlack,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                query: Color::Cyan,
            },
            Theme::Dark => Palette {
                user: Color::BrightCyan,
                assistant: Color::BrightWhite,
                accent: Color::BrightMagenta,
                muted: Color::White,
                success: Color::BrightGreen,
                warning: Color::BrightYellow,
                error: Color::BrightRed,
                query: Color::BrightBlue,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"').to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme: {}", s)),
        }
    }
}

/// Terminal colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub user: Color,
    pub assistant: Color,
    pub accent: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub query: Color,
}

/// Current theme, mirrored to a storage key on every change.
pub struct ThemeStore {
    current: Theme,
    storage: Arc<dyn Storage>,
    key: String,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("current", &self.current)
            .field("key", &self.key)
            .finish()
    }
}

impl ThemeStore {
    /// Read the saved theme; anything missing or unrecognized means light.
    pub fn load(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match storage.get(&key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Could not read theme preference");
                Theme::default()
            }
        };

        Self {
            current,
            storage,
            key,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.current = theme;
        self.storage.set(&self.key, theme.as_str())
    }

    /// Flip between light and dark and return the new theme.
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("\"dark\"".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }

    #[test]
    fn test_store_defaults_to_light() {
        let store = ThemeStore::load(Arc::new(MemoryStorage::new()), "theme");
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_store_unknown_value_is_light() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        storage.set("theme", "neon").unwrap();
        assert_eq!(ThemeStore::load(storage, "theme").current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = ThemeStore::load(Arc::clone(&storage), "theme");

        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));

        let reloaded = ThemeStore::load(Arc::clone(&storage), "theme");
        assert_eq!(reloaded.current(), Theme::Dark);

        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
    }
}
