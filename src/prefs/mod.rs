//! User preferences persisted between runs.

mod language;
mod storage;
mod theme;

pub use language::{LANGUAGE_STORAGE_KEY, Language, LanguageStore};
pub use storage::LocalStorage;
pub use theme::{
    THEME_STORAGE_KEY, ThemeMode, ThemePreference, ThemeStorage, ThemeStore, detect_system_theme,
};
