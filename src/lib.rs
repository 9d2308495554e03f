//! # Tilesweep
//!
//! Deterministic core of a top-down tile-grid action game: one avatar
//! steered by held directions, moving through a static map of one-way
//! walls and partial blocks.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         TILESWEEP                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Value types                               │
//! │  ├── vec2.rs     - 2D vector                                 │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Simulation                                │
//! │  ├── tile.rs     - Tile codes and blocked sides              │
//! │  ├── grid.rs     - Static tile map                           │
//! │  ├── body.rs     - The moving rectangle                      │
//! │  ├── input.rs    - Held directions and recordings            │
//! │  ├── collision.rs- Swept tile collision                      │
//! │  ├── state.rs    - World state                               │
//! │  ├── tick.rs     - Fixed-step update and game loop           │
//! │  ├── render.rs   - Frame hand-off                            │
//! │  └── level.rs    - Built-in levels                           │
//! │                                                              │
//! │  config.rs       - Session tunables                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! A tick depends only on the world and its held input: no clock, no
//! randomness, no shared state between worlds. Replaying an
//! [`InputRecording`] from the same starting world reproduces the same
//! state hash.
//!
//! ## Example
//!
//! ```
//! use tilesweep::{GameConfig, InputState, NullRenderer, GameLoop};
//! use tilesweep::game::level::demo_world;
//!
//! let config = GameConfig::default();
//! let world = demo_world(&config).unwrap();
//! let mut game = GameLoop::new(world, config);
//!
//! game.world.set_input(InputState::from_bools(false, false, false, true));
//! let result = game.step(&mut NullRenderer).unwrap();
//! assert_eq!(result.tick, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use core::vec2::Vec2;
pub use core::hash::StateHash;
pub use game::grid::{GridError, TileGrid};
pub use game::tile::{Side, TileCode};
pub use game::body::MotionBody;
pub use game::input::{InputRecording, InputState, SharedInput};
pub use game::state::World;
pub use game::tick::{GameLoop, SimError, TickResult};
pub use game::render::{NullRenderer, Renderer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
