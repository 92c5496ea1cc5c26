//! Fixed-delay tick timer with explicit cancellation.

use std::time::{Duration, Instant};

use tracing::info;

use crate::game::{Game, TickOutcome};

pub trait Scheduler {
    /// Schedule the next tick one period from now.
    fn rearm(&mut self);
    /// Tear the timer down; no further ticks fire.
    fn cancel(&mut self);
}

/// Polled timer for a single-threaded event loop.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl TickTimer {
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            deadline: Some(now + period),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Time left before the next tick, or `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn rearm_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }
}

impl Scheduler for TickTimer {
    fn rearm(&mut self) {
        self.rearm_at(Instant::now());
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Runs one tick and tells the scheduler whether to keep going.
pub fn drive<S: Scheduler>(game: &mut Game, scheduler: &mut S) -> TickOutcome {
    let outcome = game.tick();
    match outcome {
        TickOutcome::Continue => scheduler.rearm(),
        TickOutcome::Stop => {
            info!("stopping tick timer");
            scheduler.cancel();
        }
    }
    outcome
}
