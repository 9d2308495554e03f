//! Tile Codes
//!
//! The closed set of tile boundary shapes and the order in which each
//! shape's sides are tested during narrow-phase resolution.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Which tile edge a correction was made against.
///
/// Named after the tile's side, not the body's: `Top` is the edge a body
/// walking down the screen lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Tile's top edge (body moving down)
    Top = 0,
    /// Tile's left edge (body moving right)
    Left = 1,
    /// Tile's right edge (body moving left)
    Right = 2,
    /// Tile's bottom edge (body moving up)
    Bottom = 3,
}

/// Tile boundary shape occupying one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileCode {
    /// Open floor, never dispatched
    #[default]
    Empty = 0,
    /// Ceiling: blocks bodies moving up into it
    CeilingWall = 1,
    /// Wall on the left of the map: blocks bodies moving left
    LeftWall = 2,
    /// Wall on the right of the map: blocks bodies moving right
    RightWall = 3,
    /// Floor: blocks bodies moving down onto it
    FloorWall = 4,
    /// Four-sided block
    SolidBlock = 5,
    /// Left and right sides only
    LeftRightOnly = 6,
    /// Left, right and bottom sides
    LeftRightBottom = 7,
    /// Left, right and top sides
    LeftRightTop = 8,
    /// Left and top sides
    LeftTop = 9,
    /// Right and bottom sides
    BottomRight = 10,
    /// Decorative tile that collides with nothing
    NoOp = 11,
}

impl TileCode {
    /// All codes in index order.
    pub const ALL: [TileCode; 12] = [
        TileCode::Empty,
        TileCode::CeilingWall,
        TileCode::LeftWall,
        TileCode::RightWall,
        TileCode::FloorWall,
        TileCode::SolidBlock,
        TileCode::LeftRightOnly,
        TileCode::LeftRightBottom,
        TileCode::LeftRightTop,
        TileCode::LeftTop,
        TileCode::BottomRight,
        TileCode::NoOp,
    ];

    /// Sides tested for this shape, in order. The first side that
    /// corrects the body ends the test for that tile.
    pub fn sides(self) -> &'static [Side] {
        match self {
            TileCode::Empty | TileCode::NoOp => &[],
            TileCode::CeilingWall => &[Side::Bottom],
            TileCode::LeftWall => &[Side::Right],
            TileCode::RightWall => &[Side::Left],
            TileCode::FloorWall => &[Side::Top],
            TileCode::SolidBlock => &[Side::Top, Side::Left, Side::Right, Side::Bottom],
            TileCode::LeftRightOnly => &[Side::Left, Side::Right],
            TileCode::LeftRightBottom => &[Side::Left, Side::Right, Side::Bottom],
            TileCode::LeftRightTop => &[Side::Left, Side::Right, Side::Top],
            TileCode::LeftTop => &[Side::Left, Side::Top],
            TileCode::BottomRight => &[Side::Right, Side::Bottom],
        }
    }

    /// True for `Empty`, the only code the broadphase skips.
    #[inline]
    pub fn is_empty(self) -> bool {
        self == TileCode::Empty
    }

    /// Parse a map symbol (`0`-`9`, `a`, `b`).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0'..='9' => Self::from_index(symbol as u8 - b'0'),
            'a' | 'A' => Some(TileCode::BottomRight),
            'b' | 'B' => Some(TileCode::NoOp),
            _ => None,
        }
    }

    /// Map symbol for this code. Inverse of `from_symbol`.
    pub fn symbol(self) -> char {
        match self {
            TileCode::BottomRight => 'a',
            TileCode::NoOp => 'b',
            other => (b'0' + other as u8) as char,
        }
    }

    /// Get code from numeric index (0-11).
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.symbol())
    }
}
