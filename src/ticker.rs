use std::time::{Duration, Instant};

/// Shortest period a ticker runs at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);
/// Longest period a ticker runs at.
pub const MAX_PERIOD: Duration = Duration::from_secs(3600);

/// Fixed-period scheduler polled from the event loop.
///
/// Missed periods are not replayed: a late poll fires once and the next
/// deadline is one period after that poll. The period is clamped to
/// `[MIN_PERIOD, MAX_PERIOD]`.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let clamped = period.clamp(MIN_PERIOD, MAX_PERIOD);
        if clamped != period {
            log::warn!("tick period {period:?} out of range, using {clamped:?}");
        }
        Self {
            period: clamped,
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Returns `true` when a tick is due at `now` and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let mut next = deadline + self.period;
        if next <= now {
            let missed = now
                .duration_since(deadline)
                .as_nanos()
                .checked_div(self.period.as_nanos())
                .unwrap_or_default();
            log::debug!("ticker fell behind, skipping {missed} period(s)");
            next = now + self.period;
        }
        self.next = Some(next);
        true
    }
}
