//! Continuous hand rotation.
//!
//! Hands are tracked as unbounded absolute angles so that every update is a
//! short step of at most half a turn. A second hand moving from 354° to 0°
//! is emitted as 354 → 360, never as a 354° sweep backwards.

use std::fmt;

use crate::sampler::TargetAngles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandId {
    Hour,
    Minute,
    Second,
}

impl HandId {
    pub const ALL: [HandId; 3] = [HandId::Hour, HandId::Minute, HandId::Second];

    pub const fn index(self) -> usize {
        match self {
            HandId::Hour => 0,
            HandId::Minute => 1,
            HandId::Second => 2,
        }
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandId::Hour => "hour",
            HandId::Minute => "minute",
            HandId::Second => "second",
        };
        f.write_str(name)
    }
}

/// Receives absolute hand rotations.
///
/// Values are not reduced modulo 360. Implementations render them as their
/// reduction but must use the unreduced value to pick the animation
/// direction. A surface that has no element for a hand ignores the call.
pub trait DisplaySurface {
    fn set_rotation(&mut self, hand: HandId, absolute_degrees: f64);

    /// Places a hand without animating towards it.
    fn snap_rotation(&mut self, hand: HandId, absolute_degrees: f64) {
        self.set_rotation(hand, absolute_degrees);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HandPhase {
    #[default]
    Uninitialized,
    Tracking,
}

/// Absolute angle per hand. Starts at zero with every hand uninitialized.
#[derive(Debug, Clone, Default)]
pub struct AngleState {
    angles: [f64; 3],
    phases: [HandPhase; 3],
}

impl AngleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absolute(&self, hand: HandId) -> f64 {
        self.angles[hand.index()]
    }

    pub fn phase(&self, hand: HandId) -> HandPhase {
        self.phases[hand.index()]
    }

    fn store(&mut self, hand: HandId, absolute: f64) {
        self.angles[hand.index()] = absolute;
        self.phases[hand.index()] = HandPhase::Tracking;
    }
}

/// Signed change in `(-180, 180]` that takes `current` to `target` modulo
/// 360 by the shorter arc. A half-turn always resolves forward.
pub fn shortest_delta(current: f64, target: f64) -> f64 {
    let mut diff = target.rem_euclid(360.0) - current.rem_euclid(360.0);
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
}

#[derive(Debug, Clone, Default)]
pub struct ContinuousAngleTracker {
    state: AngleState,
}

impl ContinuousAngleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AngleState {
        &self.state
    }

    pub fn absolute(&self, hand: HandId) -> f64 {
        self.state.absolute(hand)
    }

    /// Sets the hand to `target` with no delta computation.
    pub fn reinitialize(
        &mut self,
        hand: HandId,
        target: f64,
        surface: &mut impl DisplaySurface,
    ) -> f64 {
        self.state.store(hand, target);
        log::trace!("{hand} hand synchronized to {target:.3}°");
        surface.snap_rotation(hand, target);
        target
    }

    /// Moves the hand to `target` by the shortest arc and returns the new
    /// absolute angle. An uninitialized hand is synchronized instead.
    pub fn advance(&mut self, hand: HandId, target: f64, surface: &mut impl DisplaySurface) -> f64 {
        if self.state.phase(hand) == HandPhase::Uninitialized {
            return self.reinitialize(hand, target, surface);
        }

        let current = self.state.absolute(hand);
        let absolute = current + shortest_delta(current, target);
        self.state.store(hand, absolute);
        log::trace!("{hand} hand {current:.3}° -> {absolute:.3}°");
        surface.set_rotation(hand, absolute);
        absolute
    }

    pub fn synchronize(&mut self, targets: &TargetAngles, surface: &mut impl DisplaySurface) {
        for hand in HandId::ALL {
            self.reinitialize(hand, targets.get(hand), surface);
        }
    }

    pub fn advance_all(&mut self, targets: &TargetAngles, surface: &mut impl DisplaySurface) {
        for hand in HandId::ALL {
            self.advance(hand, targets.get(hand), surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        set: Vec<(HandId, f64)>,
        snapped: Vec<(HandId, f64)>,
    }

    impl DisplaySurface for Recorder {
        fn set_rotation(&mut self, hand: HandId, absolute_degrees: f64) {
            self.set.push((hand, absolute_degrees));
        }

        fn snap_rotation(&mut self, hand: HandId, absolute_degrees: f64) {
            self.snapped.push((hand, absolute_degrees));
        }
    }

    #[test]
    fn crossing_the_seam_keeps_moving_forward() {
        let mut tracker = ContinuousAngleTracker::new();
        let mut surface = Recorder::default();
        let sequence: Vec<f64> = [354.0, 0.0, 6.0]
            .into_iter()
            .map(|target| tracker.advance(HandId::Second, target, &mut surface))
            .collect();
        assert_eq!(sequence, vec![354.0, 360.0, 366.0]);
        assert_eq!(surface.snapped, vec![(HandId::Second, 354.0)]);
        assert_eq!(
            surface.set,
            vec![(HandId::Second, 360.0), (HandId::Second, 366.0)]
        );
    }

    #[test]
    fn reinitialize_then_advance_to_same_target_is_still() {
        let mut tracker = ContinuousAngleTracker::new();
        let mut surface = Recorder::default();
        tracker.reinitialize(HandId::Minute, 123.0, &mut surface);
        let absolute = tracker.advance(HandId::Minute, 123.0, &mut surface);
        assert_eq!(absolute, 123.0);
    }

    #[test]
    fn backward_targets_take_the_short_way() {
        let mut tracker = ContinuousAngleTracker::new();
        let mut surface = Recorder::default();
        tracker.reinitialize(HandId::Hour, 10.0, &mut surface);
        assert_eq!(tracker.advance(HandId::Hour, 350.0, &mut surface), -10.0);
        assert_eq!(tracker.advance(HandId::Hour, 340.0, &mut surface), -20.0);
    }

    #[test]
    fn half_turns_resolve_forward() {
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_delta(180.0, 0.0), 180.0);
        assert_eq!(shortest_delta(-90.0, 90.0), 180.0);
        assert_eq!(shortest_delta(720.0 + 270.0, 90.0), 180.0);
    }

    #[test]
    fn delta_uses_the_reduced_current_angle() {
        assert_eq!(shortest_delta(726.0, 12.0), 6.0);
        assert_eq!(shortest_delta(-354.0, 12.0), 6.0);
    }

    #[test]
    fn hands_are_tracked_independently() {
        let mut tracker = ContinuousAngleTracker::new();
        let mut surface = Recorder::default();
        tracker.reinitialize(HandId::Second, 354.0, &mut surface);
        tracker.advance(HandId::Second, 0.0, &mut surface);
        assert_eq!(tracker.state().phase(HandId::Hour), HandPhase::Uninitialized);
        assert_eq!(tracker.absolute(HandId::Hour), 0.0);
        assert_eq!(tracker.absolute(HandId::Second), 360.0);
    }

    #[test]
    fn synchronize_snaps_every_hand() {
        let mut tracker = ContinuousAngleTracker::new();
        let mut surface = Recorder::default();
        let targets = TargetAngles {
            hour: 90.0,
            minute: 0.0,
            second: 354.0,
        };
        tracker.synchronize(&targets, &mut surface);
        assert_eq!(surface.snapped.len(), 3);
        assert!(surface.set.is_empty());
        for hand in HandId::ALL {
            assert_eq!(tracker.state().phase(hand), HandPhase::Tracking);
        }
    }
}
