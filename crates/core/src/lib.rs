//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules and state management. It has **zero
//! dependencies** on UI, terminal or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical tile spawns
//! - **Testable**: Every rule is checked by unit and integration tests
//! - **Portable**: Runs in any environment (terminal, GUI, headless)
//! - **Allocation-free**: Grid, merge mask and event queues live on the stack
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 tile matrix, random tile placement, terminal-state check
//! - [`slide`]: The move engine (slide and merge in one direction)
//! - [`game_state`]: Score, highest tile, milestones, game over, restart
//! - [`rng`]: Seeded LCG used for all tile spawns
//! - [`snapshot`]: Detached copy of the visible state for rendering
//!
//! # Game Rules
//!
//! - A move slides every tile toward one wall; equal tiles that meet merge once
//! - A tile is spawned (2 at 90%, 4 at 10%) only when the move changed the grid
//! - Each merge adds the merged value to the score
//! - Reaching 128, 256, 512, 1024 or 2048 for the first time raises a milestone
//! - The game is over when the grid is full and no neighbours are equal
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::Direction;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     game.apply_move(dir);
//! }
//!
//! assert!(game.grid().tile_count() >= 2);
//! assert!(!game.game_over());
//! ```

pub mod game_state;
pub mod grid;
pub mod rng;
pub mod slide;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, MilestoneQueue, MoveSummary};
pub use grid::{Grid, PlacedTile};
pub use rng::SimpleRng;
pub use slide::{can_slide, slide, SlideOutcome};
pub use snapshot::GameSnapshot;
