//! Configuration settings for Tickerscope.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment prefix for overrides, e.g. `TICKERSCOPE_API__API_KEY`.
pub const ENV_PREFIX: &str = "TICKERSCOPE";

/// Conventional variable holding a Polygon API key.
pub const POLYGON_API_KEY_VAR: &str = "POLYGON_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, then apply environment overrides.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        let builder = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("api.api_key", std::env::var(POLYGON_API_KEY_VAR).ok())
            .map_err(|e| crate::Error::config(e.to_string()))?;

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Reference data base URL.
    pub base_url: String,
    /// Polygon API key, sent as the `apikey` query parameter.
    pub api_key: Option<String>,
    /// Optional bearer token sent in the `Authorization` header.
    pub auth_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries for generic failures.
    pub max_retries: u32,
    /// Retries for rate-limited requests.
    pub max_rate_limit_retries: u32,
    /// Client-side rate limit (requests per second).
    pub rate_limit: u32,
    /// Tickers requested per page.
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.polygon.io/v3/reference".to_string(),
            api_key: None,
            auth_token: None,
            timeout_secs: 15,
            max_retries: 2,
            max_rate_limit_retries: 3,
            rate_limit: 5,
            page_size: 50,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Enable Unicode symbols.
    pub unicode_symbols: bool,
    /// How long the splash screen stays up, in seconds.
    pub splash_secs: u64,
    /// Search input debounce in milliseconds.
    pub search_debounce_ms: u64,
    /// Rows from the end of the list at which the next page is requested.
    pub load_more_threshold: usize,
    /// Maximum toasts shown at once.
    pub max_notifications: usize,
    /// Show help bar.
    pub show_help_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse_support: true,
            unicode_symbols: true,
            splash_secs: 3,
            search_debounce_ms: 800,
            load_more_threshold: 2,
            max_notifications: 5,
            show_help_bar: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Navigate left.
    pub left: String,
    /// Navigate right.
    pub right: String,
    /// Open details for the selected ticker.
    pub select: String,
    /// Close overlays.
    pub back: String,
    /// Refetch the current search.
    pub refresh: String,
    /// Focus the search input.
    pub search: String,
    /// Toggle light/dark theme.
    pub toggle_theme: String,
    /// Follow the terminal's theme.
    pub system_theme: String,
    /// Cycle interface language.
    pub toggle_language: String,
    /// Dismiss all notifications.
    pub dismiss: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            left: "h".to_string(),
            right: "l".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            search: "/".to_string(),
            toggle_theme: "t".to_string(),
            system_theme: "s".to_string(),
            toggle_language: "i".to_string(),
            dismiss: "x".to_string(),
        }
    }
}

/// Colors for one theme mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Primary color (hex).
    pub primary: String,
    /// Secondary color (hex).
    pub secondary: String,
    /// Success color (hex).
    pub success: String,
    /// Warning color (hex).
    pub warning: String,
    /// Error color (hex).
    pub error: String,
    /// Background color (hex).
    pub background: String,
    /// Card/surface color (hex).
    pub surface: String,
    /// Foreground/text color (hex).
    pub foreground: String,
    /// Muted text color (hex).
    pub muted: String,
    /// Border color (hex).
    pub border: String,
    /// Selection/highlight color (hex).
    pub selection: String,
}

impl ThemeColors {
    /// Default dark palette.
    pub fn dark() -> Self {
        Self {
            primary: "#90caf9".to_string(),
            secondary: "#ce93d8".to_string(),
            success: "#66bb6a".to_string(),
            warning: "#ffa726".to_string(),
            error: "#ef5350".to_string(),
            background: "#121212".to_string(),
            surface: "#1e1e1e".to_string(),
            foreground: "#e0e0e0".to_string(),
            muted: "#9e9e9e".to_string(),
            border: "#424242".to_string(),
            selection: "#2c3e50".to_string(),
        }
    }

    /// Default light palette.
    pub fn light() -> Self {
        Self {
            primary: "#1976d2".to_string(),
            secondary: "#9c27b0".to_string(),
            success: "#2e7d32".to_string(),
            warning: "#ed6c02".to_string(),
            error: "#d32f2f".to_string(),
            background: "#fafafa".to_string(),
            surface: "#ffffff".to_string(),
            foreground: "#212121".to_string(),
            muted: "#616161".to_string(),
            border: "#bdbdbd".to_string(),
            selection: "#e3f2fd".to_string(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::light()
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Colors used in light mode.
    pub light: ThemeColors,
    /// Colors used in dark mode.
    pub dark: ThemeColors,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light: ThemeColors::light(),
            dark: ThemeColors::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.polygon.io/v3/reference");
        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.ui.search_debounce_ms, 800);
        assert_eq!(config.ui.splash_secs, 3);
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("tickerscope-{}.toml", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.api.page_size = 25;
        config.ui.search_debounce_ms = 300;
        config.save(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.api.page_size, 25);
        assert_eq!(loaded.ui.search_debounce_ms, 300);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("tickerscope-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[ui]\nsplash_secs = 1\n").unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.ui.splash_secs, 1);
        assert_eq!(loaded.ui.search_debounce_ms, 800);
        assert_eq!(loaded.keybindings.quit, "q");

        std::fs::remove_file(path).unwrap();
    }
}
