//! Persisted theme preference.
//!
//! Only the light/dark choice lives here. How a theme is drawn is the
//! renderer's business.

use crate::store::backend::KeyValueStore;
use crate::store::error::StoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Default key for the persisted theme.
pub const THEME_KEY: &str = "calculator_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a theme name that is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme: '{0}'. Valid options: light, dark")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Theme preference stored as the bare string `light` or `dark`.
#[derive(Clone, Debug)]
pub struct ThemeStore<K> {
    store: K,
    key: String,
    fallback: Theme,
}

impl<K: KeyValueStore> ThemeStore<K> {
    pub fn new(store: K, key: impl Into<String>, fallback: Theme) -> Self {
        Self {
            store,
            key: key.into(),
            fallback,
        }
    }

    /// Stored theme, or the fallback when nothing valid is stored.
    pub fn load(&self) -> Theme {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: UnknownTheme| {
                warn!(key = %self.key, error = %e, "Ignoring stored theme");
                self.fallback
            }),
            Ok(None) => self.fallback,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to load theme");
                self.fallback
            }
        }
    }

    pub fn save(&self, theme: Theme) -> StoreResult<()> {
        self.store.set(&self.key, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn toggled_flips_theme() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn missing_theme_uses_fallback() {
        let themes = ThemeStore::new(MemoryStore::new(), THEME_KEY, Theme::Dark);
        assert_eq!(themes.load(), Theme::Dark);
    }

    #[test]
    fn saved_theme_is_stored_as_bare_string() {
        let backend = MemoryStore::new();
        let themes = ThemeStore::new(backend.clone(), THEME_KEY, Theme::Light);

        themes.save(Theme::Dark).unwrap();
        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(themes.load(), Theme::Dark);
    }

    #[test]
    fn invalid_stored_theme_uses_fallback() {
        let backend = MemoryStore::new();
        backend.set(THEME_KEY, "purple").unwrap();
        let themes = ThemeStore::new(backend, THEME_KEY, Theme::Light);
        assert_eq!(themes.load(), Theme::Light);
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
