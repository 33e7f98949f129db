//! Theme preference store.

use super::LocalStorage;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Storage key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "tickerscope-theme";

/// Stored preferences older than this are discarded.
const MAX_AGE_DAYS: i64 = 30;

/// Resolved color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl From<ThemeMode> for ThemePreference {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::Light,
            ThemeMode::Dark => Self::Dark,
        }
    }
}

/// Persisted form of the theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeStorage {
    pub preference: ThemePreference,
    pub mode: ThemeMode,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Guess the terminal's background from `COLORFGBG` ("fg;bg").
pub fn detect_system_theme() -> ThemeMode {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| mode_from_colorfgbg(&value))
        .unwrap_or(ThemeMode::Light)
}

fn mode_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    // ANSI 0-6 and 8 are dark backgrounds.
    Some(if bg < 7 || bg == 8 {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    })
}

/// Current theme state and the actions that change it.
#[derive(Debug)]
pub struct ThemeStore {
    pub mode: ThemeMode,
    pub preference: ThemePreference,
    pub system_theme: ThemeMode,
    pub initialized: bool,
    storage: LocalStorage,
}

impl ThemeStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            mode: ThemeMode::Light,
            preference: ThemePreference::System,
            system_theme: ThemeMode::Light,
            initialized: false,
            storage,
        }
    }

    /// Resolve the theme from storage and the detected system mode.
    pub fn initialize(&mut self, system_theme: ThemeMode) {
        let (preference, mode) = match self.load() {
            Some(stored) if stored.preference == ThemePreference::System => {
                (stored.preference, system_theme)
            }
            Some(stored) => (stored.preference, stored.mode),
            None => (ThemePreference::System, system_theme),
        };

        self.preference = preference;
        self.mode = mode;
        self.system_theme = system_theme;
        self.initialized = true;
        self.save();
    }

    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.preference = preference;
        self.mode = self.resolve(preference);
        self.save();
    }

    /// Flip light/dark and pin the preference to the new mode.
    pub fn toggle_theme(&mut self) {
        let mode = self.mode.toggled();
        self.preference = mode.into();
        self.mode = mode;
        self.save();
    }

    /// React to the terminal's theme changing.
    pub fn update_system_theme(&mut self, system_theme: ThemeMode) {
        self.system_theme = system_theme;
        if self.preference == ThemePreference::System {
            self.mode = system_theme;
            self.save();
        }
    }

    pub fn reset_to_system(&mut self) {
        self.set_theme(ThemePreference::System);
    }

    pub fn effective_mode(&self) -> ThemeMode {
        self.resolve(self.preference)
    }

    fn resolve(&self, preference: ThemePreference) -> ThemeMode {
        match preference {
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
            ThemePreference::System => self.system_theme,
        }
    }

    fn load(&self) -> Option<ThemeStorage> {
        let raw = self.storage.get_item(THEME_STORAGE_KEY)?;
        let Ok(stored) = serde_json::from_str::<ThemeStorage>(&raw) else {
            tracing::warn!("Ignoring invalid stored theme");
            return None;
        };

        let age = Utc::now().timestamp_millis() - stored.timestamp;
        if age > Duration::days(MAX_AGE_DAYS).num_milliseconds() {
            self.storage.remove_item(THEME_STORAGE_KEY);
            return None;
        }

        Some(stored)
    }

    fn save(&self) {
        let stored = ThemeStorage {
            preference: self.preference,
            mode: self.mode,
            timestamp: Utc::now().timestamp_millis(),
        };
        match serde_json::to_string(&stored) {
            Ok(json) => self.storage.set_item(THEME_STORAGE_KEY, json),
            Err(e) => tracing::warn!(error = %e, "Failed to encode theme"),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}
