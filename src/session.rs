//! One interactive session: the game, the view and everything the host loop
//! needs between terminal events.
//!
//! `Session` never touches the terminal itself. The binary feeds it decoded
//! input and hands the frames it produces to a `TerminalRenderer`, which keeps
//! the whole loop drivable from tests.

use tracing::{debug, info};

use crate::config::Config;
use crate::core::{GameSnapshot, GameState};
use crate::input::PointerEvent;
use crate::term::{FrameBuffer, GameView, RenderThrottle, Viewport};
use crate::types::GameAction;

pub struct Session {
    game: GameState,
    view: GameView,
    viewport: Viewport,
    pointer: Option<(u16, u16)>,
    throttle: RenderThrottle,
    snapshot: GameSnapshot,
    fb: FrameBuffer,
    milestone_display_ms: u64,
}

impl Session {
    pub fn new(config: &Config, seed: u32, viewport: Viewport) -> Self {
        let game = GameState::new(seed);
        info!(
            seed,
            episode = game.episode_id(),
            highest_tile = game.highest_tile(),
            "new game"
        );
        Self {
            game,
            view: GameView::new(config.view.cell_width, config.view.cell_height),
            viewport,
            pointer: None,
            throttle: RenderThrottle::new(config.static_redraw_ms),
            snapshot: GameSnapshot::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            milestone_display_ms: config.milestone_display_ms,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// True while the game is over and the pointer rests on the restart button.
    pub fn restart_hovered(&self) -> bool {
        self.game.game_over()
            && self
                .pointer
                .map(|(x, y)| self.view.restart_button_contains(self.viewport, x, y))
                .unwrap_or(false)
    }

    /// Apply a player command and log what it did. Returns true when the game
    /// state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let was_over = self.game.game_over();
        let milestones_before = self.game.milestones().len();

        let changed = self.game.apply_action(action);

        if let Some(summary) = self.game.take_last_move() {
            debug!(
                direction = summary.direction.as_str(),
                changed = summary.changed,
                merges = summary.merges,
                score_gained = summary.score_gained,
                spawned = ?summary.spawned,
                "move"
            );
        }

        if action == GameAction::Restart {
            if changed {
                info!(
                    episode = self.game.episode_id(),
                    highest_tile = self.game.highest_tile(),
                    "new game"
                );
            }
            return changed;
        }

        if let Some(reached) = self.game.milestones().get(milestones_before..) {
            for event in reached {
                info!(value = event.value, score = self.game.score(), "milestone reached");
            }
        }

        if !was_over && self.game.game_over() {
            info!(
                episode = self.game.episode_id(),
                score = self.game.score(),
                highest_tile = self.game.highest_tile(),
                moves = self.game.moves(),
                "game over"
            );
        }
        changed
    }

    /// Track the pointer and handle clicks on the restart button. Returns true
    /// when a click restarted the game.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.pointer = Some(event.position());
        match event {
            PointerEvent::Clicked { .. } if self.restart_hovered() => {
                self.apply_action(GameAction::Restart)
            }
            _ => false,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.throttle.invalidate();
        let fits = self.view.layout(self.viewport).is_some();
        debug!(width, height, fits, "terminal resized");
    }

    /// Advance the game clock by `elapsed_ms` and drop expired milestone
    /// banners.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.game.tick(elapsed_ms);
        let expired = self.game.expire_milestones(self.milestone_display_ms);
        if expired > 0 {
            debug!(expired, clock_ms = self.game.clock_ms(), "milestone banners expired");
        }
    }

    /// Render a frame if the throttle allows it at `now_ms`.
    ///
    /// The returned buffer is meant for `TerminalRenderer::draw_swap`.
    pub fn frame(&mut self, now_ms: u64) -> Option<&mut FrameBuffer> {
        self.game.snapshot_into(&mut self.snapshot);
        let hovered = self.restart_hovered();
        let fingerprint = self.snapshot.fingerprint() ^ u64::from(hovered);
        if !self.throttle.should_render(now_ms, fingerprint) {
            return None;
        }

        let pointer = if hovered { self.pointer } else { None };
        self.view
            .render_into_with_pointer(&self.snapshot, pointer, self.viewport, &mut self.fb);
        Some(&mut self.fb)
    }
}
