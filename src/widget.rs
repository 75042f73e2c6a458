use std::time::{Duration, Instant};

use crate::sampler::{SystemWallClock, TimeSampler, WallClock};
use crate::ticker::Ticker;
use crate::tracker::{ContinuousAngleTracker, DisplaySurface};

/// One running clock: sampler, tracker and scheduler bound to a surface.
///
/// The tracker exists only while a surface is attached, so every attach
/// starts from a fresh state and synchronizes without animation.
pub struct ClockWidget<S, C = SystemWallClock> {
    sampler: TimeSampler,
    wall_clock: C,
    ticker: Ticker,
    attached: Option<Attached<S>>,
}

struct Attached<S> {
    surface: S,
    tracker: ContinuousAngleTracker,
}

impl<S: DisplaySurface, C: WallClock> ClockWidget<S, C> {
    pub fn new(sampler: TimeSampler, wall_clock: C, period: Duration) -> Self {
        Self {
            sampler,
            wall_clock,
            ticker: Ticker::new(period),
            attached: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_deadline()
    }

    pub fn surface(&self) -> Option<&S> {
        self.attached.as_ref().map(|attached| &attached.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.attached.as_mut().map(|attached| &mut attached.surface)
    }

    pub fn tracker(&self) -> Option<&ContinuousAngleTracker> {
        self.attached.as_ref().map(|attached| &attached.tracker)
    }

    /// Synchronizes every hand on `surface` and starts the ticker.
    ///
    /// A surface that is already attached is detached and dropped first.
    pub fn on_attach(&mut self, surface: S, now: Instant) {
        if self.on_detach().is_some() {
            log::warn!("clock was already attached, replacing its surface");
        }

        let mut attached = Attached {
            surface,
            tracker: ContinuousAngleTracker::new(),
        };
        let targets = self.sampler.sample_now(&self.wall_clock);
        attached.tracker.synchronize(&targets, &mut attached.surface);
        self.attached = Some(attached);
        self.ticker.start(now);

        log::info!(
            "clock attached, ticking every {:?} ({:?} second hand)",
            self.ticker.period(),
            self.sampler.mode()
        );
    }

    /// Stops the ticker and hands the surface back. The angle state is
    /// discarded.
    pub fn on_detach(&mut self) -> Option<S> {
        self.ticker.stop();
        let attached = self.attached.take()?;
        log::info!("clock detached");
        Some(attached.surface)
    }

    /// Runs one update if the ticker is due. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.update();
        true
    }

    /// Samples the wall clock and advances every hand. No-op when detached.
    pub fn update(&mut self) {
        let Some(attached) = self.attached.as_mut() else {
            return;
        };
        let targets = self.sampler.sample_now(&self.wall_clock);
        attached.tracker.advance_all(&targets, &mut attached.surface);
    }
}
