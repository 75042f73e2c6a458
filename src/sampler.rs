use chrono::Timelike;

use crate::config::SecondHandMode;
use crate::tracker::HandId;

/// A wall-clock instant broken into the fields the hands care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl Tick {
    /// Out-of-range fields are clamped (hour 0–23, minute and second 0–59).
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
            millisecond: 0,
        }
    }

    pub fn with_millis(mut self, millisecond: u32) -> Self {
        self.millisecond = millisecond.min(999);
        self
    }

    /// Extracts a tick from any chrono time value.
    ///
    /// chrono encodes a leap second as nanoseconds past one billion; those
    /// clamp to the last millisecond of the second.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
            .with_millis(time.nanosecond() / 1_000_000)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn millisecond(&self) -> u32 {
        self.millisecond
    }
}

/// Source of "now".
pub trait WallClock {
    fn now(&self) -> Tick;
}

/// Local time as reported by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> Tick {
        Tick::from_time(&chrono::Local::now())
    }
}

/// Always reports the same tick. Used for snapshots.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock(pub Tick);

impl WallClock for FixedWallClock {
    fn now(&self) -> Tick {
        self.0
    }
}

impl<F> WallClock for F
where
    F: Fn() -> Tick,
{
    fn now(&self) -> Tick {
        self()
    }
}

/// Target angles in degrees, each in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl TargetAngles {
    pub fn get(&self, hand: HandId) -> f64 {
        match hand {
            HandId::Hour => self.hour,
            HandId::Minute => self.minute,
            HandId::Second => self.second,
        }
    }
}

/// Converts ticks into hand angles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSampler {
    mode: SecondHandMode,
}

impl TimeSampler {
    pub fn new(mode: SecondHandMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SecondHandMode {
        self.mode
    }

    pub fn sample(&self, tick: &Tick) -> TargetAngles {
        let hour = (tick.hour % 12) as f64 * 30.0 + tick.minute as f64 * 0.5;
        let (minute, second) = match self.mode {
            SecondHandMode::Ticking => (tick.minute as f64 * 6.0, tick.second as f64 * 6.0),
            SecondHandMode::Sweeping => (
                tick.minute as f64 * 6.0 + tick.second as f64 * 0.1,
                tick.second as f64 * 6.0 + tick.millisecond as f64 * 0.006,
            ),
        };

        TargetAngles {
            hour: reduce(hour),
            minute: reduce(minute),
            second: reduce(second),
        }
    }

    pub fn sample_now(&self, clock: &impl WallClock) -> TargetAngles {
        self.sample(&clock.now())
    }
}

fn reduce(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn three_oclock_is_a_right_angle() {
        let angles = TimeSampler::new(SecondHandMode::Ticking).sample(&Tick::new(3, 0, 0));
        assert_close(angles.hour, 90.0);
        assert_close(angles.minute, 0.0);
        assert_close(angles.second, 0.0);
    }

    #[test]
    fn half_past_midnight_puts_hour_hand_between_twelve_and_one() {
        let angles = TimeSampler::new(SecondHandMode::Ticking).sample(&Tick::new(0, 30, 0));
        assert_close(angles.hour, 15.0);
        assert_close(angles.minute, 180.0);
    }

    #[test]
    fn afternoon_hours_fold_onto_the_twelve_hour_dial() {
        let sampler = TimeSampler::new(SecondHandMode::Ticking);
        assert_eq!(
            sampler.sample(&Tick::new(15, 20, 0)),
            sampler.sample(&Tick::new(3, 20, 0))
        );
        assert_close(sampler.sample(&Tick::new(12, 0, 0)).hour, 0.0);
    }

    #[test]
    fn last_second_of_the_day_stays_below_a_full_turn() {
        let angles = TimeSampler::new(SecondHandMode::Sweeping)
            .sample(&Tick::new(23, 59, 59).with_millis(999));
        assert_close(angles.hour, 359.5);
        assert_close(angles.minute, 359.9);
        assert_close(angles.second, 359.994);
        for hand in HandId::ALL {
            assert!((0.0..360.0).contains(&angles.get(hand)));
        }
    }

    #[test]
    fn ticking_ignores_sub_unit_time() {
        let angles =
            TimeSampler::new(SecondHandMode::Ticking).sample(&Tick::new(0, 10, 30).with_millis(500));
        assert_close(angles.minute, 60.0);
        assert_close(angles.second, 180.0);
    }

    #[test]
    fn sweeping_interpolates_minute_and_second() {
        let angles = TimeSampler::new(SecondHandMode::Sweeping)
            .sample(&Tick::new(0, 10, 30).with_millis(500));
        assert_close(angles.minute, 63.0);
        assert_close(angles.second, 183.0);
    }

    #[test]
    fn out_of_range_fields_are_clamped() {
        let tick = Tick::new(24, 60, 61).with_millis(1500);
        assert_eq!(tick.hour(), 23);
        assert_eq!(tick.minute(), 59);
        assert_eq!(tick.second(), 59);
        assert_eq!(tick.millisecond(), 999);
    }

    #[test]
    fn chrono_leap_second_clamps_millis() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let tick = Tick::from_time(&leap);
        assert_eq!(tick.second(), 59);
        assert_eq!(tick.millisecond(), 999);
    }

    #[test]
    fn closures_act_as_wall_clocks() {
        let clock = || Tick::new(6, 0, 0);
        let angles = TimeSampler::default().sample_now(&clock);
        assert_close(angles.hour, 180.0);
    }
}
