//! Terminal input module.
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and reduces mouse events to the
//! pointer positions the view needs for hover and click handling.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit, PointerEvent};
