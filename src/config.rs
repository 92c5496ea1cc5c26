//! Command line / environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::EngineError;
use crate::grid::{check_dimensions, GRID_HEIGHT, GRID_WIDTH};

pub use crate::grid::MIN_GRID_SIDE;

pub const DEFAULT_TICK_MS: u64 = 500;

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal.",
    long_about = "Stack falling pieces and fill rows to clear them. The game ends when a new piece \
        has nowhere to appear.\n\n\
        CONTROLS:\n  Left / h / a    Move left\n  Right / l / d   Move right\n  \
        Up / Down       Rotate clockwise (also k j w s)\n  q / Esc         Quit"
)]
pub struct Args {
    /// Playfield width in columns.
    #[arg(long, env = "BLOCKFALL_WIDTH", default_value_t = GRID_WIDTH, value_name = "COLS")]
    pub width: usize,

    /// Playfield height in rows.
    #[arg(long, env = "BLOCKFALL_HEIGHT", default_value_t = GRID_HEIGHT, value_name = "ROWS")]
    pub height: usize,

    /// Delay between gravity ticks in milliseconds.
    #[arg(long, env = "BLOCKFALL_TICK_MS", default_value_t = DEFAULT_TICK_MS, value_name = "MS")]
    pub tick_ms: u64,

    /// Seed for piece selection. Random when omitted.
    #[arg(long, env = "BLOCKFALL_SEED", value_name = "N")]
    pub seed: Option<u64>,

    /// Write logs to this file. Logging is off without it.
    #[arg(long, env = "BLOCKFALL_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log verbosity: error, warn, info, debug or trace.
    #[arg(long, env = "BLOCKFALL_LOG_LEVEL", default_value = "info", value_name = "LEVEL")]
    pub log_level: tracing::Level,
}

/// Validated game settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, EngineError> {
        check_dimensions(args.height, args.width)?;
        if args.tick_ms == 0 {
            return Err(EngineError::ZeroTick);
        }
        Ok(Self {
            width: args.width,
            height: args.height,
            tick: Duration::from_millis(args.tick_ms),
            seed: args.seed,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}
