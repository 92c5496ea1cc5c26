use crate::grid::Grid;
use crate::piece::{Matrix, Piece};

/// True if every occupied cell of `matrix`, anchored at `(row, col)`, lands
/// on an empty in-bounds grid cell.
pub fn can_place(matrix: &Matrix, row: i32, col: i32, grid: &Grid) -> bool {
    matrix
        .cells()
        .all(|(r, c, _)| !grid.is_occupied(row + r as i32, col + c as i32))
}

/// Writes the piece's color ids into the grid. Only call this when locking:
/// the piece must already be resting where it cannot fall further.
pub fn merge(grid: &mut Grid, piece: &Piece) {
    for (row, col, value) in piece.blocks() {
        if grid.contains(row, col) {
            grid.set(row as usize, col as usize, value);
        }
    }
}
