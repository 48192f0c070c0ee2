//! TUI 2048 (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_2048::{core,input,term,types}` and adds the pieces
//! owned by the application: configuration, logging and the host session.

pub mod config;
pub mod logging;
pub mod session;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
