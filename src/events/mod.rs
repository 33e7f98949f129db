//! Event handling for Tickerscope.
//!
//! Terminal input is translated into state [`Action`](crate::state::Action)s
//! by the [`EventHandler`]. The [`Debouncer`] settles search input before it
//! turns into a request.

mod debounce;
mod handler;
mod input;

pub use debounce::Debouncer;
pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
