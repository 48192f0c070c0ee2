//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no external dependencies, so they can be used by
//! the game core, the terminal view and the input layer alike.
//!
//! # Grid
//!
//! The playfield is a fixed 4x4 grid addressed as `(row, col)`:
//!
//! - **row**: 0 (top) to 3 (bottom)
//! - **col**: 0 (left) to 3 (right)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop timestep (~60 FPS) |
//! | `MILESTONE_DISPLAY_MS` | 2000 | How long a milestone banner stays visible |
//! | `STATIC_REDRAW_MS` | 250 | Max redraw interval while nothing changes |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, GRID_SIZE};
//!
//! let action = GameAction::from_direction(Direction::Left);
//! assert_eq!(action, GameAction::MoveLeft);
//! assert_eq!(action.direction(), Some(Direction::Left));
//! assert_eq!(Direction::Left.delta(), (0, -1));
//! assert_eq!(GRID_SIZE, 4);
//! ```

/// Grid side length (4 rows by 4 columns)
pub const GRID_SIZE: u8 = 4;

/// Number of cells on the grid
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Tiles placed at the start of every game
pub const START_TILES: usize = 2;

/// One spawned tile in this many is a 4 (10%), the rest are 2s.
pub const FOUR_TILE_ONE_IN: u32 = 10;

/// Value of the highest tile before any tile is placed
pub const INITIAL_HIGHEST_TILE: u32 = 2;

/// Number of milestone thresholds
pub const MILESTONE_COUNT: usize = 5;

/// Tile values that trigger a milestone banner the first time they are reached
pub const MILESTONES: [u32; MILESTONE_COUNT] = [128, 256, 512, 1024, 2048];

/// Host loop timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a milestone banner is shown
pub const MILESTONE_DISPLAY_MS: u64 = 2000;

/// Redraw interval while the game is idle
pub const STATIC_REDRAW_MS: u64 = 250;

/// A value held by one grid cell. 0 is empty, anything else is a power of two.
pub type TileValue = u32;

/// Returns true when `value` is a legal non-empty tile.
pub fn is_tile_value(value: TileValue) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Returns true when reaching `value` should raise a milestone banner.
pub fn is_milestone(value: TileValue) -> bool {
    MILESTONES.contains(&value)
}

/// The four slide directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(d_row, d_col)` in the direction of travel
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (-1, 0));
    /// assert_eq!(Direction::Right.delta(), (0, 1));
    /// ```
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Player commands delivered to the game core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles up
    MoveUp,
    /// Slide all tiles down
    MoveDown,
    /// Slide all tiles left
    MoveLeft,
    /// Slide all tiles right
    MoveRight,
    /// Start a new game (honoured once the game is over)
    Restart,
}

impl GameAction {
    /// The move command for a direction
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => GameAction::MoveUp,
            Direction::Down => GameAction::MoveDown,
            Direction::Left => GameAction::MoveLeft,
            Direction::Right => GameAction::MoveRight,
        }
    }

    /// Direction carried by a move command, `None` for `Restart`
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveUp => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::Restart => None,
        }
    }
}

/// Transient notice that a milestone tile was reached.
///
/// `created_ms` is the game clock at the time of the merge; the presentation
/// layer drops the event once it is older than its display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MilestoneEvent {
    pub value: TileValue,
    pub created_ms: u64,
}

impl MilestoneEvent {
    pub fn new(value: TileValue, created_ms: u64) -> Self {
        Self { value, created_ms }
    }

    /// Milliseconds since the event was created, saturating at zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_ms)
    }

    pub fn is_expired(&self, now_ms: u64, display_ms: u64) -> bool {
        self.age_ms(now_ms) >= display_ms
    }
}
