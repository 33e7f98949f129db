//! Interface language preference.

use super::LocalStorage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key for the language code.
pub const LANGUAGE_STORAGE_KEY: &str = "tickerscope-language";

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Name of the language in itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }

    /// Whether text in this language reads right to left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }

    /// The next language in [`Language::ALL`], wrapping around.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region-tagged codes such as "en-US".
        let base = s.split(['-', '_']).next().unwrap_or_default();
        match base.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(crate::Error::invalid_input(format!("unsupported language '{s}'"))),
        }
    }
}

/// Current language and its persistence.
#[derive(Debug)]
pub struct LanguageStore {
    current: Language,
    storage: LocalStorage,
}

impl LanguageStore {
    /// Restore the stored language, falling back to English.
    pub fn initialize(storage: LocalStorage) -> Self {
        let stored = storage
            .get_item(LANGUAGE_STORAGE_KEY)
            .and_then(|code| code.parse::<Language>().ok());

        let current = match stored {
            Some(language) => language,
            None => {
                storage.set_item(LANGUAGE_STORAGE_KEY, Language::default().code());
                Language::default()
            }
        };

        Self { current, storage }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn available(&self) -> &'static [Language] {
        &Language::ALL
    }

    pub fn is_rtl(&self) -> bool {
        self.current.is_rtl()
    }

    pub fn switch_language(&mut self, language: Language) {
        if language != self.current {
            tracing::info!(from = %self.current, to = %language, "Switching language");
        }
        self.current = language;
        self.storage.set_item(LANGUAGE_STORAGE_KEY, language.code());
    }

    /// Move to the next available language.
    pub fn toggle_language(&mut self) {
        self.switch_language(self.current.next());
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}
