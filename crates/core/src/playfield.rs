//! Playfield module - the bordered grid of locked cells
//!
//! The grid is stored as a flat row-major `Vec` (`row * width + col`).
//! Column 0 and column `width - 1` hold [`WALL`] sentinels and the last row
//! holds [`FLOOR`] sentinels, so collision checks need no special casing for
//! the field edges: a wall or floor cell is simply non-zero.
//!
//! Coordinates are `(row, col)` with row 0 at the top. Cursors may have
//! negative rows while a piece is spawning above the visible area; only the
//! filled cells of a pattern are ever checked against the grid.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::pieces::Piece;
use crate::snapshot::FieldSnapshot;
use crate::types::{Cell, EMPTY, FLOOR, MAX_FIELD_DIMENSION, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH, WALL};

/// Position of a piece's pattern origin (top-left corner) in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub row: i32,
    pub col: i32,
}

impl Cursor {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cursor shifted by (rows, cols)
    pub fn offset(self, rows: i32, cols: i32) -> Self {
        Self {
            row: self.row + rows,
            col: self.col + cols,
        }
    }
}

/// The playfield grid with wall and floor sentinels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty bordered field.
    ///
    /// Fails if the field cannot host a spawned piece or exceeds
    /// [`MAX_FIELD_DIMENSION`].
    pub fn new(height: usize, width: usize) -> Result<Self, EngineError> {
        if height < MIN_FIELD_HEIGHT || width < MIN_FIELD_WIDTH {
            return Err(EngineError::FieldTooSmall { height, width });
        }
        if height > MAX_FIELD_DIMENSION || width > MAX_FIELD_DIMENSION {
            return Err(EngineError::FieldTooLarge { height, width });
        }

        let mut field = Self {
            height,
            width,
            cells: vec![EMPTY; height * width],
        };
        field.apply_border();
        Ok(field)
    }

    /// Rows including the floor row
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns including both walls
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.height as i32 || col >= self.width as i32 {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Cell at (row, col); `None` outside the grid
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Whether (row, col) is a wall or floor sentinel
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == self.height - 1 || col == 0 || col == self.width - 1
    }

    /// Set an interior cell.
    ///
    /// Returns false (and leaves the grid unchanged) for cells outside the
    /// grid and for sentinel cells.
    pub fn set(&mut self, row: i32, col: i32, value: Cell) -> bool {
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        if self.is_border(row as usize, col as usize) {
            return false;
        }
        self.cells[idx] = value;
        true
    }

    /// Whether `piece` fits at `cursor`.
    ///
    /// False if any filled pattern cell lands outside the grid or on a
    /// non-zero cell (locked block, wall or floor).
    pub fn is_possible(&self, cursor: Cursor, piece: &Piece) -> bool {
        piece
            .pattern()
            .filled()
            .iter()
            .all(|&(dr, dc, _)| self.get(cursor.row + dr, cursor.col + dc) == Some(EMPTY))
    }

    /// Write `piece` into the grid at `cursor`.
    ///
    /// Only empty target cells are written; cells outside the grid (including
    /// rows above the top) are skipped. Returns the number of cells written.
    pub fn merge(&mut self, piece: &Piece, cursor: Cursor) -> usize {
        merge_cells(&mut self.cells, self.height, self.width, piece, cursor)
    }

    /// Copy of the grid with `piece` merged at `cursor`; the live grid is untouched
    pub fn overlay(&self, piece: &Piece, cursor: Cursor) -> FieldSnapshot {
        let mut cells = self.cells.clone();
        merge_cells(&mut cells, self.height, self.width, piece, cursor);
        FieldSnapshot::new(self.height, self.width, cells)
    }

    /// Copy of the grid as it is
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::new(self.height, self.width, self.cells.clone())
    }

    /// Whether every interior column of `row` is filled
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row + 1 >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start + 1..start + self.width - 1]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Complete interior rows, bottom to top
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.height - 1)
            .rev()
            .filter(|&row| self.is_row_complete(row))
            .collect()
    }

    /// Remove `rows` and compact the field.
    ///
    /// Every surviving interior row moves down by the number of removed rows
    /// below it; vacated rows at the top become empty. Sentinels are
    /// re-applied on the rebuilt grid.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let width = self.width;
        let mut rebuilt = vec![EMPTY; self.height * width];
        let mut removed_below = 0;

        for row in (0..self.height - 1).rev() {
            if rows.contains(&row) {
                removed_below += 1;
                continue;
            }
            let src = row * width;
            let dst = (row + removed_below) * width;
            rebuilt[dst + 1..dst + width - 1].copy_from_slice(&self.cells[src + 1..src + width - 1]);
        }

        self.cells = rebuilt;
        self.apply_border();
    }

    /// Reset the interior to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
        self.apply_border();
    }

    /// Flat row-major cells (borders included)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn apply_border(&mut self) {
        let width = self.width;
        for row in 0..self.height {
            self.cells[row * width] = WALL;
            self.cells[row * width + width - 1] = WALL;
        }
        let floor = (self.height - 1) * width;
        self.cells[floor..floor + width].fill(FLOOR);
    }
}

fn merge_cells(
    cells: &mut [Cell],
    height: usize,
    width: usize,
    piece: &Piece,
    cursor: Cursor,
) -> usize {
    let mut written = 0;
    for (dr, dc, value) in piece.pattern().filled() {
        let row = cursor.row + dr;
        let col = cursor.col + dc;
        if row < 0 || col < 0 || row >= height as i32 || col >= width as i32 {
            continue;
        }
        let idx = row as usize * width + col as usize;
        if cells[idx] == EMPTY {
            cells[idx] = value;
            written += 1;
        }
    }
    written
}
