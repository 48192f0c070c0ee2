//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, top to bottom:
//!
//! ```text
//!  2048                     ┌SCORE──┐
//!                           │ 1234  │
//!          Highest: 128
//!            Reached 128!             <- milestone banners
//!  ┌─────────────────────────────────┐
//!  │  tiles (4x4, cell_w x cell_h)   │
//!  └─────────────────────────────────┘
//!       arrows/wasd move · q quit
//! ```
//!
//! [`GameView::layout`] is the single source of geometry; the host loop uses
//! the same layout for mouse hit-testing.

use crate::core::GameSnapshot;
use crate::fb::{decimal_width, CellStyle, FrameBuffer, Rect};
use crate::palette;
use crate::types::{TileValue, GRID_SIZE};

const SIZE: u16 = GRID_SIZE as u16;

const HEADER_H: u16 = 3;
const BANNER_H: u16 = 1;
const FOOTER_H: u16 = 1;
const GAP_X: u16 = 1;
const GAP_Y: u16 = 1;
const SCORE_BOX_W: u16 = 9;
const PANEL_MAX_W: u16 = 21;
const PANEL_H: u16 = 7;
const BUTTON_W: u16 = 15;
const BUTTON_H: u16 = 3;

const TITLE: &str = "2048";
const GAME_OVER_TEXT: &str = "Game Over!";
const RESTART_TEXT: &str = "Restart (R)";
const FOOTER_TEXT: &str = "arrows/wasd move · q quit";
const TOO_SMALL_TEXT: &str = "Terminal too small";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Resolved screen geometry for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Bounding box of everything drawn.
    pub frame: Rect,
    pub score_box: Rect,
    /// First milestone banner row; later banners stack downward.
    pub banner_y: u16,
    /// Grid background, including the gaps around tiles.
    pub grid: Rect,
    pub game_over_panel: Rect,
    pub restart_button: Rect,
    pub footer_y: u16,
    cell_w: u16,
    cell_h: u16,
}

impl Layout {
    /// Screen rectangle of the tile at (row, col).
    pub fn tile_rect(&self, row: u16, col: u16) -> Rect {
        Rect::new(
            self.grid.x + GAP_X + col * (self.cell_w + GAP_X),
            self.grid.y + GAP_Y + row * (self.cell_h + GAP_Y),
            self.cell_w,
            self.cell_h,
        )
    }
}

/// A terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 keeps tiles roughly square with typical glyph aspect ratios and
        // fits five-digit values.
        Self::new(7, 3)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn grid_size(&self) -> (u16, u16) {
        (
            SIZE * self.cell_w + (SIZE + 1) * GAP_X,
            SIZE * self.cell_h + (SIZE + 1) * GAP_Y,
        )
    }

    /// Smallest viewport that fits the whole layout.
    pub fn required_size(&self) -> (u16, u16) {
        let (grid_w, grid_h) = self.grid_size();
        (grid_w, HEADER_H + BANNER_H + grid_h + FOOTER_H)
    }

    /// Geometry for `viewport`, or `None` when it is too small.
    pub fn layout(&self, viewport: Viewport) -> Option<Layout> {
        let (need_w, need_h) = self.required_size();
        if viewport.width < need_w || viewport.height < need_h {
            return None;
        }

        let x = (viewport.width - need_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => (viewport.height - need_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = Rect::new(x, y, need_w, need_h);

        let (grid_w, grid_h) = self.grid_size();
        let banner_y = y + HEADER_H;
        let grid = Rect::new(x, banner_y + BANNER_H, grid_w, grid_h);

        let panel_w = PANEL_MAX_W.min(grid_w.saturating_sub(2));
        let panel_h = PANEL_H.min(grid_h);
        let game_over_panel = Rect::new(
            grid.x + (grid_w - panel_w) / 2,
            grid.y + (grid_h - panel_h) / 2,
            panel_w,
            panel_h,
        );
        let button_w = BUTTON_W.min(panel_w);
        let restart_button = Rect::new(
            game_over_panel.x + (panel_w - button_w) / 2,
            game_over_panel.y + 3,
            button_w,
            BUTTON_H,
        );

        Some(Layout {
            frame,
            score_box: Rect::new(frame.right() - SCORE_BOX_W, y, SCORE_BOX_W, HEADER_H - 1),
            banner_y,
            grid,
            game_over_panel,
            restart_button,
            footer_y: grid.bottom(),
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        })
    }

    /// True when (x, y) is on the restart button for this viewport.
    pub fn restart_button_contains(&self, viewport: Viewport, x: u16, y: u16) -> bool {
        self.layout(viewport)
            .map(|l| l.restart_button.contains(x, y))
            .unwrap_or(false)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_pointer(snap, None, viewport, fb);
    }

    /// Like [`GameView::render_into`], highlighting the restart button while
    /// `pointer` hovers over it.
    pub fn render_into_with_pointer(
        &self,
        snap: &GameSnapshot,
        pointer: Option<(u16, u16)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        let bg = CellStyle::new(palette::DARK_TEXT, palette::BACKGROUND);
        fb.clear(bg.cell(' '));

        let Some(layout) = self.layout(viewport) else {
            self.draw_too_small(fb, viewport);
            return;
        };

        self.draw_header(fb, snap, &layout);
        self.draw_grid(fb, snap, &layout);
        self.draw_banners(fb, snap, &layout);

        if snap.game_over {
            let hovered = pointer
                .map(|(x, y)| layout.restart_button.contains(x, y))
                .unwrap_or(false);
            self.draw_game_over(fb, &layout, hovered);
        }

        let footer = CellStyle {
            dim: true,
            ..CellStyle::new(palette::HEADER_TEXT, palette::BACKGROUND)
        };
        fb.put_str_centered(layout.frame, layout.footer_y, FOOTER_TEXT, footer);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_pointer(
        &self,
        snap: &GameSnapshot,
        pointer: Option<(u16, u16)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_pointer(snap, pointer, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let frame = layout.frame;
        let title = CellStyle::new(palette::HEADER_TEXT, palette::BACKGROUND).bold();
        fb.put_str(frame.x, frame.y + 1, TITLE, title);

        // "Highest: N", centered.
        let text = CellStyle::new(palette::HEADER_TEXT, palette::BACKGROUND);
        let label = "Highest: ";
        let width = label.len() as u16 + decimal_width(snap.highest_tile);
        let x = frame.x + frame.w.saturating_sub(width) / 2;
        let next = fb.put_str(x, frame.y + 2, label, text);
        fb.put_u32(next, frame.y + 2, snap.highest_tile, text);

        let boxed = CellStyle::new(palette::LIGHT_TEXT, palette::GRID_BACKGROUND);
        let sb = layout.score_box;
        fb.fill(sb, boxed);
        fb.put_str_centered(sb, sb.y, "SCORE", boxed);
        let digits = decimal_width(snap.score);
        let vx = sb.x + sb.w.saturating_sub(digits) / 2;
        fb.put_u32(vx, sb.y + 1, snap.score, boxed.bold());
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        fb.fill(
            layout.grid,
            CellStyle::new(palette::LIGHT_TEXT, palette::GRID_BACKGROUND),
        );

        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = snap.board[row as usize][col as usize];
                self.draw_tile(fb, layout.tile_rect(row, col), value);
            }
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, rect: Rect, value: TileValue) {
        let style = CellStyle::new(
            palette::tile_foreground(value),
            palette::tile_background(value),
        )
        .bold();
        fb.fill(rect, style);
        if value == 0 {
            return;
        }

        let y = rect.mid_y();
        let digits = decimal_width(value);
        if digits <= rect.w {
            fb.put_u32(rect.x + (rect.w - digits) / 2, y, value, style);
        } else {
            // Abbreviate values too wide for the tile, e.g. 131072 -> 128k.
            let kilo = value >> 10;
            let width = decimal_width(kilo) + 1;
            let x = rect.x + rect.w.saturating_sub(width) / 2;
            let next = fb.put_u32(x, y, kilo, style);
            fb.put_char(next, y, 'k', style);
        }
    }

    fn draw_banners(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let style = CellStyle::new(palette::MILESTONE_TEXT, palette::BACKGROUND).bold();
        for (i, &value) in snap.milestones.iter().enumerate() {
            let y = layout.banner_y + i as u16;
            if y >= layout.footer_y {
                break;
            }
            let width = "Reached ".len() as u16 + decimal_width(value) + 1;
            let x = layout.frame.x + layout.frame.w.saturating_sub(width) / 2;
            let next = fb.put_str(x, y, "Reached ", style);
            let next = fb.put_u32(next, y, value, style);
            fb.put_char(next, y, '!', style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: &Layout, hovered: bool) {
        let panel = layout.game_over_panel;
        let text = CellStyle::new(palette::DARK_TEXT, palette::OVERLAY).bold();
        fb.fill(panel, text);
        self.draw_border(fb, panel, CellStyle::new(palette::HEADER_TEXT, palette::OVERLAY));
        fb.put_str_centered(panel, panel.y + 1, GAME_OVER_TEXT, text);

        let button_bg = if hovered {
            palette::BUTTON_HOVER
        } else {
            palette::BUTTON
        };
        let button = CellStyle::new(palette::LIGHT_TEXT, button_bg).bold();
        let br = layout.restart_button;
        fb.fill(br, button);
        fb.put_str_centered(br, br.mid_y(), RESTART_TEXT, button);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, rect: Rect, style: CellStyle) {
        let Rect { x, y, w, h } = rect;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_too_small(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let style = CellStyle::new(palette::DARK_TEXT, palette::BACKGROUND).bold();
        let full = Rect::new(0, 0, viewport.width, viewport.height);
        let y = full.mid_y();
        fb.put_str_centered(full, y, TOO_SMALL_TEXT, style);

        let (need_w, need_h) = self.required_size();
        let hint = CellStyle::new(palette::HEADER_TEXT, palette::BACKGROUND);
        let width = "need ".len() as u16 + decimal_width(need_w as u32) + 1 + decimal_width(need_h as u32);
        let x = viewport.width.saturating_sub(width) / 2;
        let next = fb.put_str(x, y + 1, "need ", hint);
        let next = fb.put_u32(next, y + 1, need_w as u32, hint);
        let next = fb.put_str(next, y + 1, "x", hint);
        fb.put_u32(next, y + 1, need_h as u32, hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_required_size() {
        let view = GameView::default();
        // 4*7 + 5 gaps wide; header 3 + banner 1 + (4*3 + 5) grid + footer 1 tall.
        assert_eq!(view.required_size(), (33, 22));
    }

    #[test]
    fn layout_none_when_too_small() {
        let view = GameView::default();
        assert!(view.layout(Viewport::new(32, 22)).is_none());
        assert!(view.layout(Viewport::new(33, 21)).is_none());
        assert!(view.layout(Viewport::new(33, 22)).is_some());
    }

    #[test]
    fn tiles_do_not_overlap_and_stay_inside_grid() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(80, 24)).unwrap();
        let a = layout.tile_rect(0, 0);
        let b = layout.tile_rect(0, 1);
        assert_eq!(b.x, a.right() + GAP_X);
        let last = layout.tile_rect(3, 3);
        assert_eq!(last.right() + GAP_X, layout.grid.right());
        assert_eq!(last.bottom() + GAP_Y, layout.grid.bottom());
    }

    #[test]
    fn restart_button_sits_inside_game_over_panel() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(80, 24)).unwrap();
        let panel = layout.game_over_panel;
        let button = layout.restart_button;
        assert!(button.x >= panel.x && button.right() <= panel.right());
        assert!(button.y > panel.y && button.bottom() < panel.bottom());
    }
}
