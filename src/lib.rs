//! # Tickerscope - Ticker Reference Explorer
//!
//! A terminal user interface for browsing stock ticker reference data
//! from the Polygon.io REST API. Built with ratatui and reqwest.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle, event loop and background fetches
//! - **API**: Paginated ticker client with retry and a query cache
//! - **State**: Centralized store driven by actions
//! - **Events**: Input handling and search debouncing
//! - **Prefs**: Persisted theme and language preferences
//! - **I18n**: Translation tables for English and Arabic
//! - **UI / Components**: Layout, widgets and reusable building blocks
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod i18n;
pub mod prefs;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
