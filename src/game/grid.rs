//! Tile Grid
//!
//! Immutable row-major map of tile codes with a fixed tile size.
//! Lookups outside the grid are errors, never implicit empty tiles.

use crate::game::tile::TileCode;

/// Errors raised while building or querying a grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Lookup outside `[0, rows) x [0, columns)`.
    #[error("cell ({row}, {column}) outside {rows}x{columns} grid")]
    OutOfBounds {
        /// Requested row
        row: i64,
        /// Requested column
        column: i64,
        /// Grid rows
        rows: usize,
        /// Grid columns
        columns: usize,
    },

    /// Cell count does not match `rows * columns`.
    #[error("map shape mismatch: expected {expected} cells, got {actual}")]
    InvalidMapShape {
        /// Cells implied by the dimensions
        expected: usize,
        /// Cells actually supplied
        actual: usize,
    },

    /// A cell value outside the tile code enumeration.
    #[error("unknown tile code {symbol:?} at ({row}, {column})")]
    UnknownTileCode {
        /// Offending symbol (numeric codes are rendered in decimal)
        symbol: String,
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        column: usize,
    },

    /// Zero rows or columns, or a non-positive tile size.
    #[error("invalid grid dimensions: {columns}x{rows} tiles of size {tile_size}")]
    InvalidDimensions {
        /// Requested columns
        columns: usize,
        /// Requested rows
        rows: usize,
        /// Requested tile size
        tile_size: f64,
    },
}

/// Static tile map.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    columns: usize,
    rows: usize,
    tile_size: f64,
    cells: Vec<TileCode>,
}

impl TileGrid {
    /// Build a grid from row-major cells.
    pub fn new(
        columns: usize,
        rows: usize,
        tile_size: f64,
        cells: Vec<TileCode>,
    ) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 || !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(GridError::InvalidDimensions { columns, rows, tile_size });
        }

        let expected = columns * rows;
        if cells.len() != expected {
            return Err(GridError::InvalidMapShape {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
            cells,
        })
    }

    /// Build a grid from numeric tile indices (see `TileCode::from_index`).
    pub fn from_indices(
        columns: usize,
        rows: usize,
        tile_size: f64,
        indices: &[u8],
    ) -> Result<Self, GridError> {
        let cells = indices
            .iter()
            .enumerate()
            .map(|(i, &index)| {
                TileCode::from_index(index).ok_or_else(|| GridError::UnknownTileCode {
                    symbol: index.to_string(),
                    row: i / columns.max(1),
                    column: i % columns.max(1),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(columns, rows, tile_size, cells)
    }

    /// Parse a map literal, one row per line.
    ///
    /// Lines are trimmed and blank lines skipped. Every row must be as
    /// long as the first one.
    pub fn parse(text: &str, tile_size: f64) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let columns = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let rows = lines.len();
        let mut cells = Vec::with_capacity(columns * rows);

        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != columns {
                return Err(GridError::InvalidMapShape {
                    expected: columns * rows,
                    actual: cells.len() + width + (rows - row - 1) * columns,
                });
            }
            for (column, symbol) in line.chars().enumerate() {
                let code = TileCode::from_symbol(symbol).ok_or_else(|| {
                    GridError::UnknownTileCode {
                        symbol: symbol.to_string(),
                        row,
                        column,
                    }
                })?;
                cells.push(code);
            }
        }

        Self::new(columns, rows, tile_size, cells)
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Edge length of one square tile.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Map width in world units.
    pub fn pixel_width(&self) -> f64 {
        self.columns as f64 * self.tile_size
    }

    /// Map height in world units.
    pub fn pixel_height(&self) -> f64 {
        self.rows as f64 * self.tile_size
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[TileCode] {
        &self.cells
    }

    /// Tile at `(row, column)`.
    pub fn tile_code_at(&self, row: i64, column: i64) -> Result<TileCode, GridError> {
        match (usize::try_from(row), usize::try_from(column)) {
            (Ok(r), Ok(c)) if r < self.rows && c < self.columns => {
                Ok(self.cells[r * self.columns + c])
            }
            _ => Err(GridError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }

    /// Grid index containing world coordinate `coord` (either axis).
    #[inline]
    pub fn world_to_cell(&self, coord: f64) -> i64 {
        (coord / self.tile_size).floor() as i64
    }

    /// `(row, column)` of the cell containing the world point `(x, y)`.
    #[inline]
    pub fn cell_at_point(&self, x: f64, y: f64) -> (i64, i64) {
        (self.world_to_cell(y), self.world_to_cell(x))
    }

    /// Iterate `(row, column, code)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, code)| (i / columns, i % columns, *code))
    }

    /// Render back to a map literal, one line per row.
    pub fn to_map_string(&self) -> String {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
