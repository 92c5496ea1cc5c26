use crate::error::EngineError;

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// Highest color id a cell may hold. 0 is empty, 1..=7 map to the palette.
pub const MAX_CELL_VALUE: u8 = 7;

pub const EMPTY: u8 = 0;

/// Widest template is the 4x4 I piece; anything narrower cannot spawn it.
pub const MIN_GRID_SIDE: usize = 4;

// ============================================================================
// Grid
// ============================================================================

/// Fixed-size playfield of color ids, indexed `[row][col]` with row 0 at the top.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: Vec<Vec<u8>>,
    width: usize,
}

/// Both sides must be at least [`MIN_GRID_SIDE`]. A zero-width row would
/// count as complete forever and stall line clearing.
pub fn check_dimensions(height: usize, width: usize) -> Result<(), EngineError> {
    if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
        return Err(EngineError::GridTooSmall {
            width,
            height,
            min: MIN_GRID_SIDE,
        });
    }
    Ok(())
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Result<Self, EngineError> {
        check_dimensions(height, width)?;
        Ok(Self::empty(height, width))
    }

    fn empty(height: usize, width: usize) -> Self {
        Self {
            cells: vec![vec![EMPTY; width]; height],
            width,
        }
    }

    /// Builds a grid from explicit rows. Rows must share one width, every
    /// value must be a valid color id, and the size must pass
    /// [`check_dimensions`].
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, EngineError> {
        let width = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(EngineError::RaggedGrid {
                    row,
                    found: cells.len(),
                    expected: width,
                });
            }
            if let Some(&bad) = cells.iter().find(|&&v| v > MAX_CELL_VALUE) {
                return Err(EngineError::InvalidCell(bad));
            }
        }
        check_dimensions(rows.len(), width)?;
        Ok(Self { cells: rows, width })
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width
    }

    /// Anything outside the grid counts as occupied. This is what turns the
    /// walls and the floor into ordinary collisions.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        if !self.contains(row, col) {
            return true;
        }
        self.cells[row as usize][col as usize] != EMPTY
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        debug_assert!(value <= MAX_CELL_VALUE, "cell value {value} out of range");
        self.cells[row][col] = value;
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn is_row_complete(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != EMPTY)
    }

    /// Drops `row` and pushes a fresh empty row in at the top, so the height
    /// stays fixed and everything above `row` shifts down by one.
    pub fn remove_row(&mut self, row: usize) {
        self.cells.remove(row);
        self.cells.insert(0, vec![EMPTY; self.width]);
    }

    pub fn filled_count_in_row(&self, row: usize) -> usize {
        self.cells[row].iter().filter(|&&cell| cell != EMPTY).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell != EMPTY).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(GRID_HEIGHT, GRID_WIDTH)
    }
}

// ============================================================================
// Line Clearing
// ============================================================================

/// Removes every complete row and returns how many went.
///
/// Scans bottom-up. After a removal the same index is checked again, since
/// the row above has just dropped into it.
pub fn clear_lines(grid: &mut Grid) -> u32 {
    let mut cleared = 0;
    let mut row = grid.height();

    while row > 0 {
        if grid.is_row_complete(row - 1) {
            grid.remove_row(row - 1);
            cleared += 1;
        } else {
            row -= 1;
        }
    }

    cleared
}
