//! Motion Body
//!
//! The single moving rectangle. Keeps its position from the start of the
//! tick next to the integrated one so collision can tell which tile edges
//! were crossed this tick, and from which side.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::vec2::Vec2;
use crate::game::input::InputState;

/// Axis-aligned rectangle with previous-tick position and velocity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionBody {
    /// Current top-left corner
    pub position: Vec2,

    /// Top-left corner at the start of the tick
    pub old_position: Vec2,

    /// Velocity applied by the next `integrate`
    pub velocity: Vec2,

    /// Width in world units
    pub width: f64,

    /// Height in world units
    pub height: f64,

    /// Velocity added per held direction per tick
    pub speed: f64,
}

impl MotionBody {
    /// Create a body at rest with its old position equal to `(x, y)`.
    pub fn new(x: f64, y: f64, width: f64, height: f64, speed: f64) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            old_position: position,
            velocity: Vec2::ZERO,
            width,
            height,
            speed,
        }
    }

    /// Create a square body.
    pub fn square(x: f64, y: f64, size: f64, speed: f64) -> Self {
        Self::new(x, y, size, size, speed)
    }

    /// Current x.
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Current y.
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Previous-tick x.
    #[inline]
    pub fn old_x(&self) -> f64 {
        self.old_position.x
    }

    /// Previous-tick y.
    #[inline]
    pub fn old_y(&self) -> f64 {
        self.old_position.y
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f64 {
        self.position.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.width
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f64 {
        self.position.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.height
    }

    /// Left edge at tick start.
    #[inline]
    pub fn old_left(&self) -> f64 {
        self.old_position.x
    }

    /// Right edge at tick start.
    #[inline]
    pub fn old_right(&self) -> f64 {
        self.old_position.x + self.width
    }

    /// Top edge at tick start.
    #[inline]
    pub fn old_top(&self) -> f64 {
        self.old_position.y
    }

    /// Bottom edge at tick start.
    #[inline]
    pub fn old_bottom(&self) -> f64 {
        self.old_position.y + self.height
    }

    /// Horizontal motion this tick (`x - old_x`).
    #[inline]
    pub fn delta_x(&self) -> f64 {
        self.position.x - self.old_position.x
    }

    /// Vertical motion this tick (`y - old_y`).
    #[inline]
    pub fn delta_y(&self) -> f64 {
        self.position.y - self.old_position.y
    }

    /// Add `speed` per held direction. Diagonals are not normalized and
    /// opposite directions cancel.
    pub fn apply_input(&mut self, input: &InputState) {
        if input.down() {
            self.velocity.y += self.speed;
        }
        if input.up() {
            self.velocity.y -= self.speed;
        }
        if input.left() {
            self.velocity.x -= self.speed;
        }
        if input.right() {
            self.velocity.x += self.speed;
        }
    }

    /// Snapshot the current position as the old position.
    /// Must run before `integrate`.
    #[inline]
    pub fn begin_tick(&mut self) {
        self.old_position = self.position;
    }

    /// Advance position by velocity.
    #[inline]
    pub fn integrate(&mut self) {
        self.position = self.position + self.velocity;
    }

    /// Zero both velocity components.
    #[inline]
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Place the body at `x` on both the current and old position and
    /// stop horizontal motion.
    #[inline]
    pub(crate) fn settle_x(&mut self, x: f64) {
        self.velocity.x = 0.0;
        self.position.x = x;
        self.old_position.x = x;
    }

    /// Place the body at `y` on both the current and old position and
    /// stop vertical motion.
    #[inline]
    pub(crate) fn settle_y(&mut self, y: f64) {
        self.velocity.y = 0.0;
        self.position.y = y;
        self.old_position.y = y;
    }

    /// Hash this body's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.old_position);
        hasher.update_vec2(self.velocity);
        hasher.update_f64(self.width);
        hasher.update_f64(self.height);
        hasher.update_f64(self.speed);
    }
}
