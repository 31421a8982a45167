//! Tile vocabulary and remembered-appearance cells.

use serde::{Deserialize, Serialize};

use crate::entity::Color;

/// Grid cell payload. `Wall` is the default for every fresh cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Wall = 0,
    Floor = 1,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Self::Floor)
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Floor)
    }
}

/// How a tile looked the last time it was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Never-seen cell: a blank, white on black
pub const SHROUD: Glyph = Glyph {
    ch: ' ',
    fg: Color::WHITE,
    bg: Color::BLACK,
};

impl Default for Glyph {
    fn default() -> Self {
        SHROUD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_defaults() {
        assert_eq!(TileType::default(), TileType::Wall);
        assert_eq!(TileType::Wall as u8, 0);
        assert_eq!(TileType::Floor as u8, 1);
        assert!(TileType::Floor.is_walkable());
        assert!(!TileType::Wall.is_walkable());
    }

    #[test]
    fn test_glyph_default_is_shroud() {
        assert_eq!(Glyph::default(), SHROUD);
        assert_eq!(SHROUD.ch, ' ');
    }
}
