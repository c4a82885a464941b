use std::time::{Duration, Instant};

use msweeper_field::State;

/// Game timer. Runs from the first reveal until the game is decided.
#[derive(Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    frozen: Option<Duration>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts or stops the watch to follow the field's state.
    pub fn sync(&mut self, state: State, now: Instant) {
        match state {
            State::Ready => self.reset(),
            State::Playing => {
                if self.started.is_none() {
                    self.started = Some(now);
                }
            },
            State::Won | State::Lost(_) => {
                if self.frozen.is_none() {
                    self.frozen = Some(self.elapsed(now));
                }
            },
        }
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.frozen = None;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.frozen, self.started) {
            (Some(d), _) => d,
            (None, Some(start)) => now.saturating_duration_since(start),
            (None, None) => Duration::ZERO,
        }
    }

    /// Whole seconds, capped at what a three digit display can show.
    pub fn seconds(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs().min(999)
    }
}
