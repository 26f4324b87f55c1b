use std::collections::VecDeque;
use std::time::Duration;

/// Fixed-rate tick accumulator.
///
/// Real elapsed time accumulates; each time it crosses the interval one
/// tick fires and the interval is subtracted rather than the accumulator
/// being reset, so surplus time carries over and the tick rate never
/// drifts behind a jittery caller.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    /// Creates a clock firing every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());

        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Returns the configured tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick would fire.
    #[must_use]
    pub fn until_next_tick(&self) -> Duration {
        self.interval - self.accumulated
    }

    /// Accumulates `delta` and returns how many ticks fired.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulated += delta;

        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// Pending body-growth continuations, as absolute due-times on the
/// simulation clock.
///
/// The growth delay is constant, so scheduling order is due order and a
/// plain queue suffices. Draining happens on the same single-threaded
/// update loop as ticks; there is no concurrent mutation to guard.
#[derive(Debug, Clone, Default)]
pub struct GrowthTimer {
    due: VecDeque<Duration>,
}

impl GrowthTimer {
    /// Creates an empty timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules one growth effect to land at `at`.
    pub fn schedule(&mut self, at: Duration) {
        self.due.push_back(at);
    }

    /// Returns the earliest pending due-time.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.due.front().copied()
    }

    /// Pops one effect if it is due at `now`. Call in a loop to drain.
    pub fn pop_due(&mut self, now: Duration) -> bool {
        match self.due.front() {
            Some(&at) if at <= now => {
                self.due.pop_front();
                true
            }
            _ => false,
        }
    }

    /// Returns the number of scheduled effects.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.due.len()
    }

    /// Drops every scheduled effect.
    pub fn clear(&mut self) {
        self.due.clear();
    }
}
