//! World State
//!
//! One simulation instance: the grid, the avatar, the held input and the
//! tick counter. Worlds share nothing, so any number can run side by side.

use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::body::MotionBody;
use crate::game::events::GameEvent;
use crate::game::grid::TileGrid;
use crate::game::input::InputState;

/// Complete simulation state.
#[derive(Clone, Debug)]
pub struct World {
    /// Static tile map
    pub grid: TileGrid,

    /// The avatar
    pub body: MotionBody,

    /// Directions held for the next tick
    pub input: InputState,

    /// Completed ticks
    pub tick: u32,

    /// World width used for horizontal clamping
    pub width: f64,

    /// World height used for vertical clamping
    pub height: f64,

    /// Events generated this tick (cleared after each tick)
    pending_events: Vec<GameEvent>,
}

impl World {
    /// Create a world at tick 0 with nothing held.
    pub fn new(grid: TileGrid, body: MotionBody, width: f64, height: f64) -> Self {
        Self {
            grid,
            body,
            input: InputState::new(),
            tick: 0,
            width,
            height,
            pending_events: Vec::new(),
        }
    }

    /// Replace the held input for the next tick.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Push an event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Drop pending events without returning them.
    pub(crate) fn discard_events(&mut self) {
        self.pending_events.clear();
    }

    /// Compute state hash for verification.
    ///
    /// Covers the tick, the body and the held input. The grid is static
    /// and not included.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            self.body.hash_into(hasher);
            hasher.update_u8(self.input.flags);
        })
    }
}
