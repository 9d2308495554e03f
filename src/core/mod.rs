//! Core simulation primitives.
//!
//! Plain value types shared by the game modules. Nothing in here knows
//! about tiles or input.

pub mod vec2;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use hash::{StateHash, StateHasher, compute_state_hash};
