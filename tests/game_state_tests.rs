//! Game state tests - lifecycle, milestones and restart

use tui_2048::core::{GameState, Grid};
use tui_2048::types::{Direction, GameAction, MILESTONE_DISPLAY_MS, TICK_MS};

fn terminal_grid() -> Grid {
    Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
}

/// One move from the end: sliding left merges the only pair, and whatever
/// spawns in the freed corner has no equal neighbour.
fn almost_terminal() -> Grid {
    Grid::from_rows([[2, 2, 8, 16], [32, 64, 128, 256], [2, 4, 2, 4], [4, 2, 4, 2]])
}

#[test]
fn test_new_game_has_two_start_tiles() {
    for seed in 1..50 {
        let game = GameState::new(seed);
        let grid = game.grid();
        assert_eq!(grid.tile_count(), 2, "seed {}", seed);
        assert!(grid.cells().iter().all(|&v| v == 0 || v == 2 || v == 4));
        assert_eq!(game.score(), 0);
        assert_eq!(game.highest_tile(), grid.max_tile());
        assert!(!game.game_over());
        assert!(game.milestones().is_empty());
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(1234);
    let mut b = GameState::new(1234);
    for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down].repeat(10) {
        assert_eq!(a.apply_move(dir), b.apply_move(dir));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_move_into_terminal_grid_ends_game() {
    let mut game = GameState::from_grid(almost_terminal(), 1);
    assert!(!game.game_over());

    assert!(game.apply_move(Direction::Left));
    assert_eq!(game.score(), 4);
    assert_eq!(game.grid().rows()[0][..3], [4, 8, 16]);
    assert!(game.game_over());
    assert!(game.is_terminal());

    let summary = game.take_last_move().unwrap();
    assert!(summary.game_over);
    assert_eq!(summary.spawned.map(|t| (t.row, t.col)), Some((0, 3)));
}

#[test]
fn test_moves_ignored_after_game_over() {
    let mut game = GameState::from_grid(terminal_grid(), 1);
    assert!(game.game_over());
    assert!(game.is_terminal());

    let before = *game.grid();
    for dir in Direction::ALL {
        assert!(!game.apply_move(dir));
    }
    assert_eq!(*game.grid(), before);
}

#[test]
fn test_restart_only_after_game_over() {
    let mut game = GameState::new(8);
    assert!(!game.apply_action(GameAction::Restart));
    assert_eq!(game.episode_id(), 0);

    let mut over = GameState::from_grid(terminal_grid(), 8);
    assert!(over.apply_action(GameAction::Restart));
    assert_eq!(over.episode_id(), 1);
    assert!(!over.game_over());
}

#[test]
fn test_reset_after_game_over() {
    let mut game = GameState::from_grid(terminal_grid(), 21);
    game.tick(500);
    game.reset();

    let grid = game.grid();
    assert_eq!(grid.tile_count(), 2);
    assert!(grid.cells().iter().all(|&v| v == 0 || v == 2 || v == 4));
    assert_eq!(game.score(), 0);
    assert_eq!(game.moves(), 0);
    assert_eq!(game.highest_tile(), grid.max_tile());
    assert!(!game.game_over());
    assert!(game.milestones().is_empty());
    assert_eq!(game.episode_id(), 1);
}

#[test]
fn test_milestone_emitted_once_per_threshold() {
    let grid = Grid::from_rows([[64, 64, 0, 0], [64, 64, 0, 0], [0; 4], [0; 4]]);
    let mut game = GameState::from_grid(grid, 3);

    // Two 128s appear in the same move; only the first raises the highest tile.
    assert!(game.apply_move(Direction::Left));
    assert_eq!(game.highest_tile(), 128);
    let values: Vec<u32> = game.milestones().iter().map(|m| m.value).collect();
    assert_eq!(values, vec![128]);

    assert!(game.apply_move(Direction::Up));
    assert_eq!(game.highest_tile(), 256);
    let values: Vec<u32> = game.milestones().iter().map(|m| m.value).collect();
    assert_eq!(values, vec![128, 256]);
}

#[test]
fn test_milestones_expire_after_display_duration() {
    let grid = Grid::from_rows([[64, 64, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let mut game = GameState::from_grid(grid, 3);
    game.tick(100);
    assert!(game.apply_move(Direction::Left));
    assert_eq!(game.milestones()[0].created_ms, 100);

    let mut elapsed = 0u64;
    while elapsed + (TICK_MS as u64) < MILESTONE_DISPLAY_MS {
        game.tick(TICK_MS);
        elapsed += TICK_MS as u64;
        assert_eq!(game.expire_milestones(MILESTONE_DISPLAY_MS), 0);
    }
    assert_eq!(game.snapshot().milestones.as_slice(), &[128]);

    game.tick(TICK_MS);
    assert_eq!(game.expire_milestones(MILESTONE_DISPLAY_MS), 1);
    assert!(game.milestones().is_empty());
    assert!(game.snapshot().milestones.is_empty());
}

#[test]
fn test_snapshot_reflects_state() {
    let mut game = GameState::from_grid(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 4);
    game.apply_move(Direction::Left);
    let snap = game.snapshot();
    assert_eq!(snap.board, game.grid().rows());
    assert_eq!(snap.score, 4);
    assert_eq!(snap.highest_tile, game.highest_tile());
    assert_eq!(snap.moves, 1);
    assert!(!snap.game_over);
}
