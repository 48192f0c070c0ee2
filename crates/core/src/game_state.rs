//! Game state module - manages the complete game state
//!
//! Ties together the grid, the move engine and the RNG. Tracks score, the
//! highest tile reached, milestone notifications and the game-over flag, and
//! owns the whole-game lifecycle:
//!
//! ```text
//! Playing --apply_move--> Playing
//! Playing --apply_move (grid now terminal)--> GameOver
//! GameOver --reset--> Playing
//! ```

use arrayvec::ArrayVec;

use crate::grid::{Grid, PlacedTile};
use crate::rng::SimpleRng;
use crate::slide::slide;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Pending milestone banners. Each milestone fires at most once per game.
pub type MilestoneQueue = ArrayVec<MilestoneEvent, MILESTONE_COUNT>;

/// What the last `apply_move` call did (consumed by observers such as logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSummary {
    pub direction: Direction,
    pub changed: bool,
    pub merges: u8,
    pub score_gained: u32,
    pub spawned: Option<PlacedTile>,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    rng: SimpleRng,
    /// Seed the session was created with.
    seed: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    score: u32,
    highest_tile: TileValue,
    /// Moves that changed the grid in the current game.
    moves: u32,
    /// Host-loop time in milliseconds, advanced by `tick`.
    clock_ms: u64,
    milestones: MilestoneQueue,
    last_move: Option<MoveSummary>,
    game_over: bool,
}

impl GameState {
    /// Start a new game: empty grid plus two random tiles.
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            rng: SimpleRng::new(seed),
            seed,
            episode_id: 0,
            score: 0,
            highest_tile: INITIAL_HIGHEST_TILE,
            moves: 0,
            clock_ms: 0,
            milestones: MilestoneQueue::new(),
            last_move: None,
            game_over: false,
        };
        state.place_start_tiles();
        state
    }

    /// Build a state around a prepared grid (tests, benches, replays).
    ///
    /// The highest tile is taken from the grid; no tiles are added.
    pub fn from_grid(grid: Grid, seed: u32) -> Self {
        Self {
            grid,
            rng: SimpleRng::new(seed),
            seed,
            episode_id: 0,
            score: 0,
            highest_tile: grid.max_tile().max(INITIAL_HIGHEST_TILE),
            moves: 0,
            clock_ms: 0,
            milestones: MilestoneQueue::new(),
            last_move: None,
            game_over: grid.is_terminal(),
        }
    }

    fn place_start_tiles(&mut self) {
        for _ in 0..START_TILES {
            if let Some(tile) = self.grid.place_random_tile(&mut self.rng) {
                self.raise_highest_tile(tile.value);
            }
        }
    }

    /// Reinitialize to a fresh game. The RNG keeps its sequence, so a seeded
    /// session stays reproducible across restarts.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.highest_tile = INITIAL_HIGHEST_TILE;
        self.moves = 0;
        self.milestones.clear();
        self.last_move = None;
        self.game_over = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.place_start_tiles();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highest_tile(&self) -> TileValue {
        self.highest_tile
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Milestone banners that have not expired yet, oldest first.
    pub fn milestones(&self) -> &[MilestoneEvent] {
        &self.milestones
    }

    /// True when no move can change the grid.
    pub fn is_terminal(&self) -> bool {
        self.grid.is_terminal()
    }

    /// Take the summary of the most recent move.
    pub fn take_last_move(&mut self) -> Option<MoveSummary> {
        self.last_move.take()
    }

    /// Raise the highest tile if `value` exceeds it, emitting a milestone
    /// banner when the new value is a milestone.
    fn raise_highest_tile(&mut self, value: TileValue) {
        if value <= self.highest_tile {
            return;
        }
        self.highest_tile = value;
        if is_milestone(value) && !self.milestones.is_full() {
            self.milestones.push(MilestoneEvent::new(value, self.clock_ms));
        }
    }

    /// Slide all tiles toward `direction`.
    ///
    /// Returns true when the grid changed; only then is a new tile placed.
    /// Once the game is over this is a no-op returning false.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        if self.game_over {
            return false;
        }

        let outcome = slide(&mut self.grid, direction);
        self.score = self.score.saturating_add(outcome.score_gained);
        for &value in &outcome.merged_values {
            self.raise_highest_tile(value);
        }

        let mut spawned = None;
        if outcome.changed {
            self.moves = self.moves.wrapping_add(1);
            spawned = self.grid.place_random_tile(&mut self.rng);
            if let Some(tile) = spawned {
                self.raise_highest_tile(tile.value);
            }
            if self.grid.is_terminal() {
                self.game_over = true;
            }
        }

        self.last_move = Some(MoveSummary {
            direction,
            changed: outcome.changed,
            merges: outcome.merges() as u8,
            score_gained: outcome.score_gained,
            spawned,
            game_over: self.game_over,
        });

        outcome.changed
    }

    /// Apply a player command. Returns true when the state changed.
    ///
    /// `Restart` only takes effect once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action.direction() {
            Some(direction) => self.apply_move(direction),
            None => {
                if self.game_over {
                    self.reset();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advance the game clock used to timestamp milestone banners.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms as u64);
    }

    /// Drop milestone banners shown for at least `display_ms`.
    /// Returns how many were removed.
    pub fn expire_milestones(&mut self, display_ms: u64) -> usize {
        let now = self.clock_ms;
        let before = self.milestones.len();
        self.milestones.retain(|ev| !ev.is_expired(now, display_ms));
        before - self.milestones.len()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.grid.rows();
        out.score = self.score;
        out.highest_tile = self.highest_tile;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.milestones.clear();
        out.milestones
            .extend(self.milestones.iter().map(|ev| ev.value));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_checker() -> Grid {
        Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.grid.tile_count(), START_TILES);
        assert_eq!(state.score, 0);
        assert_eq!(state.moves, 0);
        assert_eq!(state.episode_id, 0);
        assert!(!state.game_over);
        assert!(state.milestones.is_empty());
        assert_eq!(state.highest_tile, state.grid.max_tile().max(2));
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_apply_move_merges_and_scores() {
        let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut state = GameState::from_grid(grid, 3);

        assert!(state.apply_move(Direction::Left));
        assert_eq!(state.grid.get(0, 0), Some(4));
        assert_eq!(state.score, 4);
        assert_eq!(state.highest_tile, 4);
        assert_eq!(state.moves, 1);
        // Merged tile plus one spawn.
        assert_eq!(state.grid.tile_count(), 2);
    }

    #[test]
    fn test_noop_move_does_not_spawn() {
        let grid = Grid::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut state = GameState::from_grid(grid, 3);

        assert!(!state.apply_move(Direction::Left));
        assert_eq!(state.grid, grid);
        assert_eq!(state.moves, 0);

        let summary = state.take_last_move().unwrap();
        assert!(!summary.changed);
        assert_eq!(summary.spawned, None);
        assert!(state.take_last_move().is_none());
    }

    #[test]
    fn test_milestone_emitted_once() {
        let grid = Grid::from_rows([[64, 64, 0, 0], [64, 64, 0, 0], [0; 4], [0; 4]]);
        let mut state = GameState::from_grid(grid, 9);
        state.tick(500);

        assert!(state.apply_move(Direction::Left));
        assert_eq!(state.highest_tile, 128);
        assert_eq!(
            state.milestones(),
            &[MilestoneEvent::new(128, 500)]
        );
    }

    #[test]
    fn test_milestones_chain_within_one_move() {
        let grid = Grid::from_rows([[64, 64, 128, 128], [0; 4], [0; 4], [0; 4]]);
        let mut state = GameState::from_grid(grid, 9);
        // from_grid seeds highest_tile with 128 already on the board.
        assert_eq!(state.highest_tile, 128);

        assert!(state.apply_move(Direction::Left));
        let values: Vec<_> = state.milestones().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![256]);
        assert_eq!(state.score, 128 + 256);
    }

    #[test]
    fn test_expire_milestones() {
        let grid = Grid::from_rows([[64, 64, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut state = GameState::from_grid(grid, 9);
        state.apply_move(Direction::Left);
        assert_eq!(state.milestones().len(), 1);

        state.tick(1999);
        assert_eq!(state.expire_milestones(MILESTONE_DISPLAY_MS), 0);
        state.tick(1);
        assert_eq!(state.expire_milestones(MILESTONE_DISPLAY_MS), 1);
        assert!(state.milestones().is_empty());
    }

    #[test]
    fn test_game_over_after_filling_move() {
        // The slide opens exactly one cell and the spawn fills it.
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [8, 16, 8, 0]]);
        let mut state = GameState::from_grid(grid, 11);
        assert!(!state.game_over());

        assert!(state.apply_move(Direction::Right));
        // [0, 8, 16, 8] then a spawn fills the only gap with a 2 or 4.
        let bottom = state.grid.rows()[3];
        assert_eq!(&bottom[1..], &[8, 16, 8]);
        assert!(bottom[0] == 2 || bottom[0] == 4);
        // A spawned 2 pairs with the 2 above it; a spawned 4 locks the grid.
        assert_eq!(state.game_over(), state.grid.is_terminal());
    }

    #[test]
    fn test_moves_ignored_when_game_over() {
        let mut state = GameState::from_grid(full_checker(), 1);
        assert!(state.game_over());
        for dir in Direction::ALL {
            assert!(!state.apply_move(dir));
        }
        assert_eq!(state.grid, full_checker());
    }

    #[test]
    fn test_restart_only_when_game_over() {
        let mut playing = GameState::new(5);
        let before = playing.grid;
        assert!(!playing.apply_action(GameAction::Restart));
        assert_eq!(playing.grid, before);

        let mut over = GameState::from_grid(full_checker(), 5);
        assert!(over.apply_action(GameAction::Restart));
        assert!(!over.game_over());
        assert_eq!(over.episode_id(), 1);
        assert_eq!(over.grid.tile_count(), START_TILES);
        assert_eq!(over.score(), 0);
    }

    #[test]
    fn test_snapshot_copies_visible_state() {
        let grid = Grid::from_rows([[64, 64, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut state = GameState::from_grid(grid, 9);
        state.apply_move(Direction::Left);

        let snap = state.snapshot();
        assert_eq!(snap.board, state.grid.rows());
        assert_eq!(snap.score, 128);
        assert_eq!(snap.highest_tile, 128);
        assert_eq!(snap.milestones.as_slice(), &[128]);
        assert_eq!(snap.moves, 1);
        assert!(!snap.game_over);
    }
}
