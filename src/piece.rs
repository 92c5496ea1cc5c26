use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EngineError;
use crate::grid::{EMPTY, MAX_CELL_VALUE};

// ============================================================================
// Matrix
// ============================================================================

/// Square block of color ids describing one orientation of a piece.
///
/// Squareness is checked once on construction, which keeps [`rotate`] total.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Matrix {
    rows: Vec<Vec<u8>>,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, EngineError> {
        let size = rows.len();
        if size == 0 {
            return Err(EngineError::NotSquare { rows: 0, cols: 0 });
        }
        for row in &rows {
            if row.len() != size {
                return Err(EngineError::NotSquare {
                    rows: size,
                    cols: row.len(),
                });
            }
            if let Some(&bad) = row.iter().find(|&&v| v > MAX_CELL_VALUE) {
                return Err(EngineError::InvalidCell(bad));
            }
        }
        Ok(Self { rows })
    }

    /// Side length of the bounding box.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Non-empty cells as `(row, col, value)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != EMPTY)
                .map(move |(c, &value)| (r, c, value))
        })
    }
}

/// Quarter turn clockwise: `result[i][j] = m[n - 1 - j][i]`.
pub fn rotate(matrix: &Matrix) -> Matrix {
    let n = matrix.size();
    let rows = (0..n)
        .map(|i| (0..n).map(|j| matrix.get(n - 1 - j, i)).collect())
        .collect();
    Matrix { rows }
}

// ============================================================================
// Shape Catalog
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
    ];

    pub fn color_id(self) -> u8 {
        match self {
            Shape::I => 1,
            Shape::O => 2,
            Shape::T => 3,
            Shape::S => 4,
            Shape::Z => 5,
            Shape::J => 6,
            Shape::L => 7,
        }
    }

    /// Spawn orientation, padded out to a square bounding box.
    pub fn template(self) -> Matrix {
        let rows: Vec<Vec<u8>> = match self {
            Shape::I => vec![
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            Shape::O => vec![vec![2, 2], vec![2, 2]],
            Shape::T => vec![vec![0, 3, 0], vec![3, 3, 3], vec![0, 0, 0]],
            Shape::S => vec![vec![0, 4, 4], vec![4, 4, 0], vec![0, 0, 0]],
            Shape::Z => vec![vec![5, 5, 0], vec![0, 5, 5], vec![0, 0, 0]],
            Shape::J => vec![vec![6, 0, 0], vec![6, 6, 6], vec![0, 0, 0]],
            Shape::L => vec![vec![0, 0, 7], vec![7, 7, 7], vec![0, 0, 0]],
        };
        Matrix { rows }
    }
}

// ============================================================================
// Piece
// ============================================================================

/// The falling piece: a matrix anchored by its top-left corner.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub shape: Shape,
    pub matrix: Matrix,
    pub row: i32,
    pub col: i32,
}

impl Piece {
    pub fn new_at(shape: Shape, row: i32, col: i32) -> Self {
        Self {
            shape,
            matrix: shape.template(),
            row,
            col,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Absolute grid positions of the occupied cells, with their color ids.
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.matrix
            .cells()
            .map(|(r, c, value)| (self.row + r as i32, self.col + c as i32, value))
    }
}

/// Places `shape` on row 0, horizontally centered on a grid `grid_width` wide.
pub fn spawn(shape: Shape, grid_width: usize) -> Piece {
    let matrix = shape.template();
    let col = (grid_width / 2) as i32 - (matrix.size() / 2) as i32;
    Piece {
        shape,
        matrix,
        row: 0,
        col,
    }
}

// ============================================================================
// Piece Providers
// ============================================================================

pub trait PieceProvider {
    fn next_shape(&mut self) -> Shape;
}

/// Uniform draw over the seven shapes from an injected RNG.
pub struct RandomPieceProvider<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPieceProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPieceProvider<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PieceProvider for RandomPieceProvider<R> {
    fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.rng.gen_range(0..Shape::ALL.len())]
    }
}

/// Replays a fixed list of shapes, wrapping around at the end.
pub struct SequencePieceProvider {
    shapes: Vec<Shape>,
    index: usize,
}

impl SequencePieceProvider {
    /// An empty list falls back to `Shape::O`.
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_shape(&mut self) -> Shape {
        if self.shapes.is_empty() {
            return Shape::O;
        }
        let shape = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        shape
    }
}
