//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - UI thread: all picker state, hover timer (`slint::Timer`), rendering
//! - rayon pool: image decoding and cover scaling
//! - `slint::invoke_from_event_loop`: wakes the UI thread when decode results are queued

pub mod controller;
pub mod handlers;
mod state_helpers;

pub use controller::Controller;
pub use handlers::setup_handlers;
