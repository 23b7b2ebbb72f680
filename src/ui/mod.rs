//! Booking console: view state, transitions, text rendering and the event loop.

pub mod input;
pub mod messages;
pub mod render;
pub mod runtime;
pub mod state;

pub use runtime::Console;
pub use state::{update, Command, Msg, ViewState};
