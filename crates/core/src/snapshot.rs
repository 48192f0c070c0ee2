//! Render snapshot - everything the view needs, detached from `GameState`.

use arrayvec::ArrayVec;

use crate::types::{TileValue, GRID_SIZE, MILESTONE_COUNT};

const SIZE: usize = GRID_SIZE as usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Tile values, row 0 first.
    pub board: [[TileValue; SIZE]; SIZE],
    pub score: u32,
    pub highest_tile: TileValue,
    pub game_over: bool,
    pub episode_id: u32,
    pub moves: u32,
    /// Values of the milestone banners currently on screen, oldest first.
    pub milestones: ArrayVec<TileValue, MILESTONE_COUNT>,
}

impl GameSnapshot {
    /// FNV-1a 64-bit hash over everything that affects the rendered frame.
    ///
    /// Used by the render throttle to redraw immediately on any visible change.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a::new();
        for row in &self.board {
            for &v in row {
                h.write_u32(v);
            }
        }
        h.write_u32(self.score);
        h.write_u32(self.highest_tile);
        h.write_u32(self.game_over as u32);
        h.write_u32(self.episode_id);
        h.write_u32(self.milestones.len() as u32);
        for &v in &self.milestones {
            h.write_u32(v);
        }
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; SIZE]; SIZE],
            score: 0,
            highest_tile: 0,
            game_over: false,
            episode_id: 0,
            moves: 0,
            milestones: ArrayVec::new(),
        }
    }
}

struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }

    fn write_u32(&mut self, v: u32) {
        for b in v.to_le_bytes() {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x00000100000001B3);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_tracks_visible_changes() {
        let a = GameSnapshot::default();
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.board[2][1] = 8;
        assert_ne!(a.fingerprint(), b.fingerprint());

        let mut c = a.clone();
        c.milestones.push(128);
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_move_counter() {
        let a = GameSnapshot::default();
        let mut b = a.clone();
        b.moves = 10;
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
