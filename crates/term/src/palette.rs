//! Classic 2048 colors, mapped onto terminal RGB cells.

use crate::fb::Rgb;
use crate::types::TileValue;

pub const BACKGROUND: Rgb = Rgb::new(250, 248, 239);
pub const GRID_BACKGROUND: Rgb = Rgb::new(187, 173, 160);
pub const EMPTY_CELL: Rgb = Rgb::new(205, 193, 180);
pub const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
pub const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);
pub const HEADER_TEXT: Rgb = Rgb::new(143, 122, 102);
pub const MILESTONE_TEXT: Rgb = Rgb::new(255, 140, 0);
pub const BUTTON: Rgb = Rgb::new(142, 122, 102);
pub const BUTTON_HOVER: Rgb = Rgb::new(158, 138, 118);
pub const OVERLAY: Rgb = Rgb::new(238, 236, 228);

/// Background color of a tile. Values past 2048 reuse the 2048 color.
pub fn tile_background(value: TileValue) -> Rgb {
    match value {
        0 => EMPTY_CELL,
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        _ => Rgb::new(237, 194, 46),
    }
}

/// Text color on a tile: dark on the pale 2 and 4 tiles, light above.
pub fn tile_foreground(value: TileValue) -> Rgb {
    if value <= 4 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}
