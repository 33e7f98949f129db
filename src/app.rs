//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, background fetches and rendering.

use crate::api::{RetryPolicy, TickerSource, TickersClient, fetch_page_with_retry};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::prefs::{LocalStorage, detect_system_theme};
use crate::state::{Action, FetchRequest, Notification, Store};
use crate::ui::{RenderContext, Ui, viewport};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender handed to background fetches.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Where ticker pages come from.
    source: Arc<dyn TickerSource>,
    retry_policy: RetryPolicy,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        let client = TickersClient::new(config.api.clone())?;
        if !client.has_api_key() {
            tracing::warn!("No Polygon API key configured, requests will fail");
        }

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.ui.mouse_support {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let store = Store::new(action_tx.clone(), &config)
            .with_preferences(LocalStorage::open_default(), detect_system_theme());

        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
        );

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            source: Arc::new(client),
            retry_policy: RetryPolicy::from_config(&config.api),
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.store.start(Instant::now());
        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.ui.tick_rate_ms));

        loop {
            self.event_handler.update_store_snapshot(&self.store);
            self.draw()?;

            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                _ = ticker.tick() => {
                    self.store.reduce(Action::Tick);
                }
            }

            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (columns, rows) = viewport(
            Rect::new(0, 0, size.width, size.height),
            self.config.ui.show_help_bar,
        );
        self.store.explore.set_viewport(columns, rows);

        let ctx = RenderContext::new(&self.store, &self.config);
        self.terminal.draw(|frame| Ui::render(frame, &ctx))?;
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::FetchTickers(request) => self.spawn_fetch(request),
            action => self.store.reduce(action),
        }
    }

    /// Run one page request in the background.
    fn spawn_fetch(&self, request: FetchRequest) {
        tokio::spawn(run_fetch(
            Arc::clone(&self.source),
            self.retry_policy.clone(),
            request,
            self.action_tx.clone(),
        ));
    }
}

/// Fetch one page through `policy` and post the outcome back as actions.
///
/// Every failed attempt surfaces a toast. Responses for superseded
/// queries still arrive and are dropped by the store.
pub async fn run_fetch(
    source: Arc<dyn TickerSource>,
    policy: RetryPolicy,
    request: FetchRequest,
    tx: mpsc::UnboundedSender<Action>,
) {
    let FetchRequest {
        generation,
        query,
        cursor,
    } = request;

    let result = fetch_page_with_retry(
        source.as_ref(),
        &query,
        cursor.as_deref(),
        &policy,
        |error, _delay| {
            if let Some(notification) = Notification::from_error(error)
                && tx.send(Action::ShowNotification(notification)).is_err()
            {
                tracing::debug!(generation, "App closed before toast was shown");
            }
        },
    )
    .await;

    let action = match result {
        Ok(page) => Action::TickersLoaded { generation, page },
        Err(e) => Action::TickersFailed {
            generation,
            message: e.to_string(),
        },
    };
    if tx.send(action).is_err() {
        tracing::debug!(generation, "App closed before page arrived");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
