//! Renderer Hand-off
//!
//! The simulation draws nothing itself. After each tick it hands the grid
//! and the body to a `Renderer` supplied by the host.

use crate::game::body::MotionBody;
use crate::game::grid::TileGrid;

/// Consumer of the per-tick frame.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, grid: &TileGrid, body: &MotionBody);
}

/// Renderer that draws nothing (headless runs, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _grid: &TileGrid, _body: &MotionBody) {}
}

impl<F> Renderer for F
where
    F: FnMut(&TileGrid, &MotionBody),
{
    fn render(&mut self, grid: &TileGrid, body: &MotionBody) {
        self(grid, body)
    }
}
