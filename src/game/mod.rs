//! Game Logic Module
//!
//! The tile-grid simulation. Nothing here reads the clock or a random
//! source, so equal input sequences give equal worlds.
//!
//! ## Module Structure
//!
//! - `tile`: Tile codes and the sides each one blocks
//! - `grid`: The static tile map and world-to-cell lookup
//! - `body`: The moving rectangle
//! - `input`: Held directions, shared input, recordings
//! - `collision`: Swept tile collision and world clamping
//! - `state`: One simulation instance
//! - `tick`: The fixed-step update and game loop
//! - `render`: Frame hand-off to the host
//! - `level`: Built-in levels
//! - `events`: Events for logging and replay verification

pub mod tile;
pub mod grid;
pub mod body;
pub mod input;
pub mod collision;
pub mod events;
pub mod state;
pub mod tick;
pub mod render;
pub mod level;

// Re-export key types
pub use tile::{Side, TileCode};
pub use grid::{GridError, TileGrid};
pub use body::MotionBody;
pub use input::{Direction, InputState, InputRecording, SharedInput};
pub use collision::Contact;
pub use events::{GameEvent, GameEventData, WorldEdge};
pub use state::World;
pub use tick::{tick, GameLoop, SimError, TickResult};
pub use render::{NullRenderer, Renderer};
