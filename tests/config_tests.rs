//! Command line and environment configuration
//!
//! Env vars are process-wide, so every test here runs serially.

use std::time::Duration;

use blockfall::config::{Args, Config, MIN_GRID_SIDE};
use blockfall::grid::{GRID_HEIGHT, GRID_WIDTH};
use blockfall::EngineError;
use clap::Parser;
use serial_test::serial;

fn parse(argv: &[&str]) -> Result<Config, EngineError> {
    let args = Args::try_parse_from(argv).expect("arguments should parse");
    Config::from_args(&args)
}

#[test]
#[serial]
fn defaults_match_reference_configuration() {
    let config = parse(&["blockfall"]).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.width, GRID_WIDTH);
    assert_eq!(config.height, GRID_HEIGHT);
    assert_eq!(config.tick, Duration::from_millis(500));
    assert_eq!(config.seed, None);
}

#[test]
#[serial]
fn flags_override_defaults() {
    let config = parse(&[
        "blockfall", "--width", "12", "--height", "24", "--tick-ms", "250", "--seed", "9",
    ])
    .unwrap();

    assert_eq!(config.width, 12);
    assert_eq!(config.height, 24);
    assert_eq!(config.tick, Duration::from_millis(250));
    assert_eq!(config.seed, Some(9));
}

#[test]
#[serial]
fn environment_is_read_when_flags_are_absent() {
    std::env::set_var("BLOCKFALL_TICK_MS", "120");
    std::env::set_var("BLOCKFALL_SEED", "77");
    let config = parse(&["blockfall"]);
    std::env::remove_var("BLOCKFALL_TICK_MS");
    std::env::remove_var("BLOCKFALL_SEED");

    let config = config.unwrap();
    assert_eq!(config.tick, Duration::from_millis(120));
    assert_eq!(config.seed, Some(77));
}

#[test]
#[serial]
fn flag_wins_over_environment() {
    std::env::set_var("BLOCKFALL_WIDTH", "16");
    let config = parse(&["blockfall", "--width", "8"]);
    std::env::remove_var("BLOCKFALL_WIDTH");

    assert_eq!(config.unwrap().width, 8);
}

#[test]
#[serial]
fn tiny_grid_is_rejected() {
    let err = parse(&["blockfall", "--width", "3"]).unwrap_err();

    assert_eq!(
        err,
        EngineError::GridTooSmall {
            width: 3,
            height: GRID_HEIGHT,
            min: MIN_GRID_SIDE
        }
    );
}

#[test]
#[serial]
fn zero_tick_is_rejected() {
    assert_eq!(
        parse(&["blockfall", "--tick-ms", "0"]).unwrap_err(),
        EngineError::ZeroTick
    );
}

#[test]
#[serial]
fn log_level_must_be_known() {
    assert!(Args::try_parse_from(["blockfall", "--log-level", "loud"]).is_err());

    let args = Args::try_parse_from(["blockfall", "--log-level", "debug"]).unwrap();
    assert_eq!(args.log_level, tracing::Level::DEBUG);
    assert!(args.log_file.is_none());
}
