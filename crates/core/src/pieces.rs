//! Pieces module - tetromino cell patterns and rotation
//!
//! Every shape has a fixed list of square cell patterns, one per rotation
//! state (Game Boy spawn orientations). A pattern is a pure lookup of
//! `(shape, rotation_index)`; rotation never simulates geometry and never
//! kicks. Cells hold `0` for empty or the shape's numeric identity.

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{Cell, RotationDirection, Shape};

/// Square cell matrix of a piece in one rotation state.
///
/// Stored as a 4x4 array; only the top-left `size` x `size` block is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPattern {
    size: usize,
    rows: [[Cell; 4]; 4],
}

impl CellPattern {
    const fn new3(rows: [[Cell; 3]; 3]) -> Self {
        let mut out = [[0; 4]; 4];
        let mut r = 0;
        while r < 3 {
            let mut c = 0;
            while c < 3 {
                out[r][c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self { size: 3, rows: out }
    }

    const fn new4(rows: [[Cell; 4]; 4]) -> Self {
        Self { size: 4, rows }
    }

    /// Edge length of the square matrix (3 or 4)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (row, col); `0` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.size || col >= self.size {
            return 0;
        }
        self.rows[row][col]
    }

    /// Matrix rows as owned vectors (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.size)
            .map(|r| self.rows[r][..self.size].to_vec())
            .collect()
    }

    /// Offsets (row, col) and values of the filled cells, row-major
    pub fn filled(&self) -> ArrayVec<(i32, i32, Cell), 4> {
        let mut out = ArrayVec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                let value = self.rows[r][c];
                if value != 0 {
                    out.push((r as i32, c as i32, value));
                }
            }
        }
        out
    }
}

impl fmt::Display for CellPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                match self.rows[r][c] {
                    0 => write!(f, ".")?,
                    v => write!(f, "{}", v)?,
                }
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

const I: Cell = Shape::I as Cell;
const J: Cell = Shape::J as Cell;
const L: Cell = Shape::L as Cell;
const O: Cell = Shape::O as Cell;
const S: Cell = Shape::S as Cell;
const T: Cell = Shape::T as Cell;
const Z: Cell = Shape::Z as Cell;

static I_PATTERNS: [CellPattern; 2] = [
    CellPattern::new4([[0, 0, 0, 0], [0, 0, 0, 0], [I, I, I, I], [0, 0, 0, 0]]),
    CellPattern::new4([[0, I, 0, 0], [0, I, 0, 0], [0, I, 0, 0], [0, I, 0, 0]]),
];

static J_PATTERNS: [CellPattern; 4] = [
    CellPattern::new3([[0, 0, 0], [J, J, J], [0, 0, J]]),
    CellPattern::new3([[0, J, 0], [0, J, 0], [J, J, 0]]),
    CellPattern::new3([[J, 0, 0], [J, J, J], [0, 0, 0]]),
    CellPattern::new3([[0, J, J], [0, J, 0], [0, J, 0]]),
];

static L_PATTERNS: [CellPattern; 4] = [
    CellPattern::new3([[0, 0, 0], [L, L, L], [L, 0, 0]]),
    CellPattern::new3([[L, L, 0], [0, L, 0], [0, L, 0]]),
    CellPattern::new3([[0, 0, L], [L, L, L], [0, 0, 0]]),
    CellPattern::new3([[0, L, 0], [0, L, 0], [0, L, L]]),
];

static O_PATTERNS: [CellPattern; 1] = [CellPattern::new4([
    [0, 0, 0, 0],
    [0, O, O, 0],
    [0, O, O, 0],
    [0, 0, 0, 0],
])];

static S_PATTERNS: [CellPattern; 2] = [
    CellPattern::new3([[0, 0, 0], [0, S, S], [S, S, 0]]),
    CellPattern::new3([[S, 0, 0], [S, S, 0], [0, S, 0]]),
];

static T_PATTERNS: [CellPattern; 4] = [
    CellPattern::new3([[0, 0, 0], [T, T, T], [0, T, 0]]),
    CellPattern::new3([[0, T, 0], [T, T, 0], [0, T, 0]]),
    CellPattern::new3([[0, T, 0], [T, T, T], [0, 0, 0]]),
    CellPattern::new3([[0, T, 0], [0, T, T], [0, T, 0]]),
];

static Z_PATTERNS: [CellPattern; 2] = [
    CellPattern::new3([[0, 0, 0], [Z, Z, 0], [0, Z, Z]]),
    CellPattern::new3([[0, Z, 0], [Z, Z, 0], [Z, 0, 0]]),
];

/// All rotation patterns of a shape, indexed by rotation index
pub fn patterns(shape: Shape) -> &'static [CellPattern] {
    match shape {
        Shape::I => &I_PATTERNS,
        Shape::J => &J_PATTERNS,
        Shape::L => &L_PATTERNS,
        Shape::O => &O_PATTERNS,
        Shape::S => &S_PATTERNS,
        Shape::T => &T_PATTERNS,
        Shape::Z => &Z_PATTERNS,
    }
}

/// Cell pattern for a shape in a rotation state.
///
/// Panics if `rotation` is not a valid index for `shape`; the indices the
/// engine produces are always reduced modulo [`Shape::rotation_states`].
pub fn pattern(shape: Shape, rotation: u8) -> &'static CellPattern {
    &patterns(shape)[rotation as usize]
}

/// A tetromino: shape identity plus rotation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    shape: Shape,
    rotation: u8,
}

impl Piece {
    /// New piece in its spawn orientation (rotation 0)
    pub fn new(shape: Shape) -> Self {
        Self { shape, rotation: 0 }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Pattern for the current rotation
    pub fn pattern(&self) -> &'static CellPattern {
        pattern(self.shape, self.rotation)
    }

    /// Candidate piece one rotation step away.
    ///
    /// The receiver is untouched; callers commit the candidate only after
    /// validating it against the field.
    pub fn rotated(&self, direction: RotationDirection) -> Piece {
        let states = self.shape.rotation_states() as i8;
        let next = (self.rotation as i8 + direction.step()).rem_euclid(states);
        Piece {
            shape: self.shape,
            rotation: next as u8,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.pattern(), f)
    }
}
