use tracing::{debug, info, trace};

use crate::collision::{can_place, merge};
use crate::config::Config;
use crate::error::EngineError;
use crate::grid::{clear_lines, Grid};
use crate::input::Intent;
use crate::piece::{rotate, spawn, Piece, PieceProvider, RandomPieceProvider, Shape};

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Running,
    GameOver,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceSpawned(Shape),
    PieceMoved,
    PieceRotated,
    PieceLocked,
    LinesCleared(u32),
    GameOver,
}

/// What the scheduler should do after a tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    Continue,
    Stop,
}

// ============================================================================
// Game
// ============================================================================

/// One play session: the grid, the falling piece and the loss flag.
pub struct Game {
    grid: Grid,
    current_piece: Piece,
    state: GameState,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        let provider: Box<dyn PieceProvider> = match config.seed {
            Some(seed) => Box::new(RandomPieceProvider::from_seed(seed)),
            None => Box::new(RandomPieceProvider::from_entropy()),
        };
        Self::with_provider(config.height, config.width, provider)
    }

    pub fn with_provider(
        height: usize,
        width: usize,
        provider: Box<dyn PieceProvider>,
    ) -> Result<Self, EngineError> {
        let grid = Grid::new(height, width)?;
        Ok(Self::start(grid, provider))
    }

    /// Fresh session on `grid`, with the first piece drawn from `provider`.
    fn start(grid: Grid, provider: Box<dyn PieceProvider>) -> Self {
        let width = grid.width();
        let mut game = Self {
            grid,
            current_piece: Piece::new_at(Shape::O, 0, 0),
            state: GameState::Running,
            piece_provider: provider,
            events: Vec::new(),
        };
        game.spawn_next_piece();
        debug!(width, "game started");
        game
    }

    /// Starts from an arbitrary grid and piece. Later spawns draw at random.
    pub fn with_grid(grid: Grid, current_piece: Piece) -> Self {
        Self {
            grid,
            current_piece,
            state: GameState::Running,
            piece_provider: Box::new(RandomPieceProvider::from_entropy()),
            events: Vec::new(),
        }
    }

    /// Same as [`Game::with_grid`], but later spawns come from `provider`.
    pub fn with_grid_and_provider(
        grid: Grid,
        current_piece: Piece,
        provider: Box<dyn PieceProvider>,
    ) -> Self {
        Self {
            piece_provider: provider,
            ..Self::with_grid(grid, current_piece)
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Advances the game by one gravity step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Stop;
        }

        let piece = &self.current_piece;
        if can_place(&piece.matrix, piece.row + 1, piece.col, &self.grid) {
            self.current_piece.row += 1;
            return TickOutcome::Continue;
        }

        self.lock_piece();
        let lines = clear_lines(&mut self.grid);
        if lines > 0 {
            info!(lines, "cleared lines");
            self.events.push(GameEvent::LinesCleared(lines));
        }
        self.spawn_next_piece();

        if self.is_game_over() {
            TickOutcome::Stop
        } else {
            TickOutcome::Continue
        }
    }

    /// Applies one player intent. Rejected intents leave everything untouched.
    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft => {
                self.move_piece(-1);
            }
            Intent::MoveRight => {
                self.move_piece(1);
            }
            Intent::Rotate => {
                self.rotate_piece();
            }
        }
    }

    pub fn move_piece(&mut self, dx: i32) -> bool {
        if self.is_game_over() {
            return false;
        }
        let piece = &self.current_piece;
        let col = piece.col + dx;
        if can_place(&piece.matrix, piece.row, col, &self.grid) {
            self.current_piece.col = col;
            self.events.push(GameEvent::PieceMoved);
            true
        } else {
            trace!(dx, "move blocked");
            false
        }
    }

    /// Clockwise quarter turn. There are no wall kicks: if the turned matrix
    /// does not fit at the current anchor, it is thrown away.
    pub fn rotate_piece(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let piece = &self.current_piece;
        let rotated = rotate(&piece.matrix);
        if can_place(&rotated, piece.row, piece.col, &self.grid) {
            self.current_piece.matrix = rotated;
            self.events.push(GameEvent::PieceRotated);
            true
        } else {
            trace!("rotation blocked");
            false
        }
    }

    /// Replaces the current piece with a fresh one. Loses the game if the
    /// new piece does not fit where it appears.
    pub fn spawn_next_piece(&mut self) {
        let shape = self.piece_provider.next_shape();
        self.current_piece = spawn(shape, self.grid.width());
        self.events.push(GameEvent::PieceSpawned(shape));
        debug!(?shape, col = self.current_piece.col, "spawned piece");

        let piece = &self.current_piece;
        if !can_place(&piece.matrix, piece.row, piece.col, &self.grid) {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
            info!(filled = self.grid.total_filled_cells(), "spawn blocked, game over");
        }
    }

    fn lock_piece(&mut self) {
        merge(&mut self.grid, &self.current_piece);
        debug!(
            shape = ?self.current_piece.shape,
            row = self.current_piece.row,
            col = self.current_piece.col,
            "locked piece"
        );
        self.events.push(GameEvent::PieceLocked);
    }

    /// Grid contents with the falling piece drawn on top.
    pub fn render_grid(&self) -> Grid {
        let mut visual = self.grid.clone();
        if !self.is_game_over() {
            merge(&mut visual, &self.current_piece);
        }
        visual
    }

    /// Takes and clears all pending events.
    ///
    /// Every move, tick and spawn appends here, so the owner of the loop has
    /// to drain this once per frame.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::start(Grid::default(), Box::new(RandomPieceProvider::from_entropy()))
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use crate::grid::Grid;
    use crate::piece::Shape;

    pub fn empty_grid() -> Grid {
        Grid::default()
    }

    pub fn fill_row(grid: &mut Grid, row: usize) {
        for col in 0..grid.width() {
            grid.set(row, col, Shape::T.color_id());
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, row: usize, gap_col: usize) {
        for col in 0..grid.width() {
            if col != gap_col {
                grid.set(row, col, Shape::T.color_id());
            }
        }
    }
}
