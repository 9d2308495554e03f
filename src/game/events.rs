//! Simulation Events
//!
//! Events generated during a tick for status display, replay and tests.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::tile::{Side, TileCode};

/// Which world edge a clamp was applied against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEdge {
    /// y < 0
    Top,
    /// y + height > world height
    Bottom,
    /// x < 0
    Left,
    /// x + width > world width
    Right,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A leading corner touched a non-empty tile.
    ///
    /// `side` is `None` when no edge of the tile was swept into.
    TileContact {
        tile: TileCode,
        row: i64,
        column: i64,
        side: Option<Side>,
    },

    /// The body was pushed back inside the world bounds.
    WorldClamped {
        edge: WorldEdge,
        position: Vec2,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create tile contact event.
    pub fn tile_contact(
        tick: u32,
        tile: TileCode,
        row: i64,
        column: i64,
        side: Option<Side>,
    ) -> Self {
        Self::new(tick, GameEventData::TileContact { tile, row, column, side })
    }

    /// Create world clamp event.
    pub fn world_clamped(tick: u32, edge: WorldEdge, position: Vec2) -> Self {
        Self::new(tick, GameEventData::WorldClamped { edge, position })
    }

    /// True if this event moved the body.
    pub fn is_correction(&self) -> bool {
        match &self.data {
            GameEventData::TileContact { side, .. } => side.is_some(),
            GameEventData::WorldClamped { .. } => true,
        }
    }

    /// Tile involved, for "last tile collided with" style status lines.
    pub fn tile(&self) -> Option<TileCode> {
        match &self.data {
            GameEventData::TileContact { tile, .. } => Some(*tile),
            GameEventData::WorldClamped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_flag() {
        let hit = GameEvent::tile_contact(3, TileCode::FloorWall, 4, 2, Some(Side::Top));
        let graze = GameEvent::tile_contact(3, TileCode::NoOp, 4, 2, None);
        let clamp = GameEvent::world_clamped(3, WorldEdge::Top, Vec2::ZERO);

        assert!(hit.is_correction());
        assert!(!graze.is_correction());
        assert!(clamp.is_correction());
        assert_eq!(graze.tile(), Some(TileCode::NoOp));
        assert_eq!(clamp.tile(), None);
    }

    #[test]
    fn test_event_json() {
        let event = GameEvent::tile_contact(7, TileCode::SolidBlock, 1, 1, Some(Side::Left));
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
