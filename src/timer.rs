use std::time::{Duration, Instant};

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    next_due: Instant,
}

/// Repeating countdown with at most one active schedule.
///
/// `start` always drops any previous schedule first, so restarting a round can
/// never leave two countdowns running. The event loop polls [`Countdown::due_ticks`]
/// with the current time and applies one countdown step per returned tick.
#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    active: Option<ActiveTimer>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            active: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.stop();
        self.active = Some(ActiveTimer {
            next_due: now + self.period,
        });
    }

    pub fn stop(&mut self) {
        self.active = None;
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Number of whole periods that elapsed since the last poll.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(timer) = self.active.as_mut() else {
            return 0;
        };
        let mut ticks = 0;
        while timer.next_due <= now {
            timer.next_due += self.period;
            ticks += 1;
        }
        ticks
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_PERIOD)
    }
}
