//! Terminal presentation layer for 2048.
//!
//! Renders game snapshots into a framebuffer that is flushed to the terminal
//! with crossterm. No widget library is involved, which keeps full control
//! over tile geometry and colors.
//!
//! - [`fb`]: framebuffer, styles, rectangles
//! - [`game_view`]: layout and drawing of header, tiles, banners, overlay
//! - [`palette`]: classic 2048 tile colors
//! - [`renderer`]: diffing terminal writer
//! - [`render_throttle`]: redraw pacing

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod render_throttle;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
