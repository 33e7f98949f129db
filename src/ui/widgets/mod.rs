//! TUI widgets.

mod header;
mod help;
mod notifications;
mod search_section;
mod splash;
mod status_bar;
mod ticker_details;
mod ticker_grid;

pub use header::Header;
pub use help::HelpPanel;
pub use notifications::NotificationStackView;
pub use search_section::SearchSection;
pub use splash::SplashScreen;
pub use status_bar::StatusBar;
pub use ticker_details::TickerDetails;
pub use ticker_grid::TickerGrid;
