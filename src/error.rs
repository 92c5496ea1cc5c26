use thiserror::Error;

/// Construction and configuration failures.
///
/// Gameplay itself never fails: a blocked move is a `false`, and losing is a
/// state. These errors only come out of building matrices, grids and configs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("shape matrix must be square and non-empty (got {rows} rows, a row of {cols} cells)")]
    NotSquare { rows: usize, cols: usize },
    #[error("cell value {0} is outside the palette range 0..=7")]
    InvalidCell(u8),
    #[error("grid rows must all have the same width (row {row} has {found}, expected {expected})")]
    RaggedGrid {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("grid of {width}x{height} is too small, need at least {min}x{min}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("tick interval must be greater than zero")]
    ZeroTick,
}
