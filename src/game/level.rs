//! Built-in Levels
//!
//! Map literals use one symbol per tile (see `TileCode::from_symbol`):
//! `1` ceiling, `2`/`3` left/right walls, `4` floor, `5` solid block,
//! `6`-`a` partial blocks, `b` decoration, `0` open floor.

use crate::config::GameConfig;
use crate::game::body::MotionBody;
use crate::game::grid::{GridError, TileGrid};
use crate::game::state::World;

/// The stock level: an open room fenced by one-way walls, with decorated
/// alcoves on both sides.
pub const DEMO_LEVEL: &str = "
111111111111111111
2bbb3111111a00bbb3
2bbb6000000008bbb3
2bbb6000000006bbb3
2bbb6000000006bbb3
2bbb6000000006bbb3
2bbb7000000006bbb3
2bbb0094444442bbb3
144444111111114441
";

/// Parse the stock level with the configured tile size.
pub fn demo_grid(config: &GameConfig) -> Result<TileGrid, GridError> {
    TileGrid::parse(DEMO_LEVEL, config.tile_size)
}

/// Build a world for `grid` with the avatar at the configured spawn.
pub fn world_from_grid(grid: TileGrid, config: &GameConfig) -> World {
    let body = MotionBody::square(config.spawn_x, config.spawn_y, config.player_size, config.speed);
    let width = config.world_width.unwrap_or_else(|| grid.pixel_width());
    let height = config.world_height.unwrap_or_else(|| grid.pixel_height());
    World::new(grid, body, width, height)
}

/// Stock level world.
pub fn demo_world(config: &GameConfig) -> Result<World, GridError> {
    Ok(world_from_grid(demo_grid(config)?, config))
}
