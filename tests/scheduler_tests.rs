//! Tick timer and the tick driver

use std::time::{Duration, Instant};

use blockfall::game::{Game, TickOutcome};
use blockfall::grid::GRID_HEIGHT;
use blockfall::piece::{Piece, SequencePieceProvider, Shape};
use blockfall::scheduler::{drive, Scheduler, TickTimer};
use blockfall::test_helpers::*;

#[derive(Default)]
struct RecordingScheduler {
    rearms: usize,
    cancels: usize,
}

impl Scheduler for RecordingScheduler {
    fn rearm(&mut self) {
        self.rearms += 1;
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

const PERIOD: Duration = Duration::from_millis(500);

mod timer {
    use super::*;

    #[test]
    fn fires_after_one_period() {
        let now = Instant::now();
        let timer = TickTimer::start(PERIOD, now);

        assert!(timer.is_active());
        assert!(!timer.is_due(now));
        assert!(timer.is_due(now + PERIOD));
        assert_eq!(timer.time_until_due(now), Some(PERIOD));
        assert_eq!(timer.time_until_due(now + PERIOD * 2), Some(Duration::ZERO));
    }

    #[test]
    fn rearm_pushes_deadline_forward() {
        let now = Instant::now();
        let mut timer = TickTimer::start(PERIOD, now);

        let later = now + PERIOD;
        timer.rearm_at(later);

        assert!(!timer.is_due(later));
        assert!(timer.is_due(later + PERIOD));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let now = Instant::now();
        let mut timer = TickTimer::start(PERIOD, now);

        timer.cancel();

        assert!(!timer.is_active());
        assert!(!timer.is_due(now + PERIOD * 100));
        assert_eq!(timer.time_until_due(now), None);
    }
}

mod driver {
    use super::*;

    #[test]
    fn running_game_rearms() {
        let mut game = Game::with_grid(empty_grid(), Piece::new_at(Shape::O, 0, 4));
        let mut scheduler = RecordingScheduler::default();

        assert_eq!(drive(&mut game, &mut scheduler), TickOutcome::Continue);
        assert_eq!(scheduler.rearms, 1);
        assert_eq!(scheduler.cancels, 0);
    }

    #[test]
    fn game_over_cancels_the_timer() {
        let mut grid = empty_grid();
        grid.set(0, 5, Shape::T.color_id());
        let resting = Piece::new_at(Shape::O, GRID_HEIGHT as i32 - 2, 0);
        let mut game = Game::with_grid_and_provider(
            grid,
            resting,
            Box::new(SequencePieceProvider::new(vec![Shape::O])),
        );
        let mut scheduler = RecordingScheduler::default();

        assert_eq!(drive(&mut game, &mut scheduler), TickOutcome::Stop);
        assert!(game.is_game_over());
        assert_eq!(scheduler.rearms, 0);
        assert_eq!(scheduler.cancels, 1);
    }

    #[test]
    fn tick_timer_is_torn_down_on_game_over() {
        let mut grid = empty_grid();
        fill_row_with_gap(&mut grid, 0, 0);
        let resting = Piece::new_at(Shape::O, GRID_HEIGHT as i32 - 2, 0);
        let mut game = Game::with_grid_and_provider(
            grid,
            resting,
            Box::new(SequencePieceProvider::new(vec![Shape::I])),
        );
        let mut timer = TickTimer::start(PERIOD, Instant::now());

        drive(&mut game, &mut timer);

        assert!(game.is_game_over());
        assert!(!timer.is_active());
    }
}
