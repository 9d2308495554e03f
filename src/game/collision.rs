//! Swept Tile Collision
//!
//! Resolves the moving body against the static tile grid once per tick.
//!
//! ## How it works
//!
//! Every test compares the body's edges at the start of the tick
//! (`old_*`) with its edges after integration. A tile edge is only
//! corrected when the body crossed it this tick, travelling toward the
//! tile. A body that already overlaps a tile, or approaches a side the
//! tile does not block, is left alone. That is what makes one-way walls
//! work.
//!
//! ```text
//!  broadphase                       narrow phase
//!  ──────────                       ────────────
//!  moving left  -> BL, TL corners   tile code -> ordered sides
//!  moving right -> BR, TR corners   first side that corrects wins
//!  moving up    -> TL, TR corners
//!  moving down  -> BL, BR corners
//! ```
//!
//! The horizontal pass always runs before the vertical one. Each pass
//! fixes the cell index on its own axis (the leading column, or the
//! leading row) when it starts; the other index is read from the body as
//! each corner is tested, so a correction by the first corner can move
//! the second corner into a different cell. A correction sets the old
//! position equal to the new one on that axis, so later tests on the
//! same axis see no motion and cannot fire again.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::game::body::MotionBody;
use crate::game::events::WorldEdge;
use crate::game::grid::{GridError, TileGrid};
use crate::game::tile::{Side, TileCode};

/// Gap left between the body and a tile's left edge after a correction.
pub const LEFT_EDGE_EPSILON: f64 = 0.001;

/// Gap left between the body and a tile's top edge after a correction.
pub const TOP_EDGE_EPSILON: f64 = 0.01;

/// Gap left between the body and the bottom or right world edge.
pub const WORLD_EDGE_EPSILON: f64 = 0.001;

// =============================================================================
// NARROW PHASE
// =============================================================================

/// Tile's left edge at `column`. Only fires for a body moving right whose
/// right edge crossed the boundary this tick.
pub fn resolve_left_boundary(body: &mut MotionBody, column: i64, tile_size: f64) -> bool {
    if body.delta_x() > 0.0 {
        let boundary = column as f64 * tile_size;

        if body.right() > boundary && body.old_right() <= boundary {
            body.settle_x(boundary - body.width - LEFT_EDGE_EPSILON);
            return true;
        }
    }

    false
}

/// Tile's right edge at `column`. Only fires for a body moving left whose
/// left edge crossed the boundary this tick.
pub fn resolve_right_boundary(body: &mut MotionBody, column: i64, tile_size: f64) -> bool {
    if body.delta_x() < 0.0 {
        let boundary = (column + 1) as f64 * tile_size;

        if body.left() < boundary && body.old_left() >= boundary {
            body.settle_x(boundary);
            return true;
        }
    }

    false
}

/// Tile's top edge at `row`. Only fires for a body moving down whose
/// bottom edge crossed the boundary this tick.
pub fn resolve_top_boundary(body: &mut MotionBody, row: i64, tile_size: f64) -> bool {
    if body.delta_y() > 0.0 {
        let boundary = row as f64 * tile_size;

        if body.bottom() > boundary && body.old_bottom() <= boundary {
            body.settle_y(boundary - body.height - TOP_EDGE_EPSILON);
            return true;
        }
    }

    false
}

/// Tile's bottom edge at `row`. Only fires for a body moving up whose
/// top edge crossed the boundary this tick.
pub fn resolve_bottom_boundary(body: &mut MotionBody, row: i64, tile_size: f64) -> bool {
    if body.delta_y() < 0.0 {
        let boundary = (row + 1) as f64 * tile_size;

        if body.top() < boundary && body.old_top() >= boundary {
            body.settle_y(boundary);
            return true;
        }
    }

    false
}

/// Test one side of the tile at `(row, column)`.
#[inline]
pub fn resolve_side(
    body: &mut MotionBody,
    side: Side,
    row: i64,
    column: i64,
    tile_size: f64,
) -> bool {
    match side {
        Side::Top => resolve_top_boundary(body, row, tile_size),
        Side::Left => resolve_left_boundary(body, column, tile_size),
        Side::Right => resolve_right_boundary(body, column, tile_size),
        Side::Bottom => resolve_bottom_boundary(body, row, tile_size),
    }
}

/// Run the side table for `code`. Returns the side that corrected the
/// body, stopping at the first one.
pub fn resolve_tile(
    body: &mut MotionBody,
    code: TileCode,
    row: i64,
    column: i64,
    tile_size: f64,
) -> Option<Side> {
    code.sides()
        .iter()
        .copied()
        .find(|&side| resolve_side(body, side, row, column, tile_size))
}

// =============================================================================
// BROADPHASE
// =============================================================================

/// A corner of the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    /// (left, top)
    TopLeft,
    /// (right, top)
    TopRight,
    /// (left, bottom)
    BottomLeft,
    /// (right, bottom)
    BottomRight,
}

impl Corner {
    /// World position of this corner on `body`, as `(x, y)`.
    #[inline]
    pub fn point(self, body: &MotionBody) -> (f64, f64) {
        match self {
            Corner::TopLeft => (body.left(), body.top()),
            Corner::TopRight => (body.right(), body.top()),
            Corner::BottomLeft => (body.left(), body.bottom()),
            Corner::BottomRight => (body.right(), body.bottom()),
        }
    }
}

/// Leading corners for horizontal motion `dx`, in test order.
pub fn horizontal_leading_corners(dx: f64) -> &'static [Corner] {
    if dx < 0.0 {
        &[Corner::BottomLeft, Corner::TopLeft]
    } else if dx > 0.0 {
        &[Corner::BottomRight, Corner::TopRight]
    } else {
        &[]
    }
}

/// Leading corners for vertical motion `dy`, in test order.
pub fn vertical_leading_corners(dy: f64) -> &'static [Corner] {
    if dy < 0.0 {
        &[Corner::TopLeft, Corner::TopRight]
    } else if dy > 0.0 {
        &[Corner::BottomLeft, Corner::BottomRight]
    } else {
        &[]
    }
}

/// A non-empty tile touched by a leading corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Tile under the corner
    pub tile: TileCode,
    /// Tile row
    pub row: i64,
    /// Tile column
    pub column: i64,
    /// Corner that found the tile
    pub corner: Corner,
    /// Side that corrected the body, if any
    pub side: Option<Side>,
}

/// Test one leading corner against the tile at `(row, column)`.
fn check_corner(
    body: &mut MotionBody,
    grid: &TileGrid,
    corner: Corner,
    row: i64,
    column: i64,
) -> Result<Option<Contact>, GridError> {
    let tile = grid.tile_code_at(row, column)?;

    if tile.is_empty() {
        return Ok(None);
    }

    let side = resolve_tile(body, tile, row, column, grid.tile_size());
    if let Some(side) = side {
        debug!(?tile, row, column, ?corner, ?side, position = %body.position, "tile collision");
    }

    Ok(Some(Contact { tile, row, column, corner, side }))
}

/// Resolve the body against the grid: horizontal pass, then vertical.
///
/// The horizontal pass takes the leading column once and reads each
/// corner's row from the body at the time it is tested. The vertical
/// pass does the same with the leading row.
///
/// Returns every non-empty tile a leading corner touched, in test order.
/// Fails if a leading corner lies outside the grid.
pub fn resolve_collisions(
    body: &mut MotionBody,
    grid: &TileGrid,
) -> Result<Vec<Contact>, GridError> {
    let mut contacts = Vec::with_capacity(4);

    let corners = horizontal_leading_corners(body.delta_x());
    if let Some(&lead) = corners.first() {
        let column = grid.world_to_cell(lead.point(body).0);
        for &corner in corners {
            let row = grid.world_to_cell(corner.point(body).1);
            contacts.extend(check_corner(body, grid, corner, row, column)?);
        }
    }

    let corners = vertical_leading_corners(body.delta_y());
    if let Some(&lead) = corners.first() {
        let row = grid.world_to_cell(lead.point(body).1);
        for &corner in corners {
            let column = grid.world_to_cell(corner.point(body).0);
            contacts.extend(check_corner(body, grid, corner, row, column)?);
        }
    }

    Ok(contacts)
}

// =============================================================================
// WORLD BOUNDS
// =============================================================================

/// Keep the body inside `[0, world_height - height]` vertically.
pub fn clamp_vertical(body: &mut MotionBody, world_height: f64) -> Option<WorldEdge> {
    if body.top() < 0.0 {
        body.settle_y(0.0);
        Some(WorldEdge::Top)
    } else if body.bottom() > world_height {
        body.settle_y(world_height - body.height - WORLD_EDGE_EPSILON);
        Some(WorldEdge::Bottom)
    } else {
        None
    }
}

/// Keep the body inside `[0, world_width - width]` horizontally.
pub fn clamp_horizontal(body: &mut MotionBody, world_width: f64) -> Option<WorldEdge> {
    if body.left() < 0.0 {
        body.settle_x(0.0);
        Some(WorldEdge::Left)
    } else if body.right() > world_width {
        body.settle_x(world_width - body.width - WORLD_EDGE_EPSILON);
        Some(WorldEdge::Right)
    } else {
        None
    }
}
