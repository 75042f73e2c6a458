use std::time::Duration;

use bon::Builder;

use crate::error::ClockError;
use crate::ticker::{MAX_PERIOD, MIN_PERIOD};
use crate::tracker::HandId;

/// Accepted range for `max_framerate`, in frames per second.
pub const FRAMERATE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=1000.0;

/// Color representation for clock face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `rgb(r, g, b)` as used in SVG style attributes.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// How the second hand (and the minute hand with it) moves between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondHandMode {
    /// Jumps in whole 6° steps once per second.
    Ticking,
    /// Interpolates using sub-second time.
    #[default]
    Sweeping,
}

/// Appearance of one hand.
///
/// `length` is a fraction of the face half-extent; `width` is in face units
/// where the whole face spans 200 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStyle {
    pub length: f64,
    pub width: f64,
    pub color: Color,
}

impl HandStyle {
    pub const HOUR: HandStyle = HandStyle::new(0.52, 5.0, Color::WHITE);
    pub const MINUTE: HandStyle = HandStyle::new(0.67, 3.0, Color::WHITE);
    pub const SECOND: HandStyle = HandStyle::new(0.93, 2.0, Color::new(0xff, 0x8c, 0x00));

    pub const fn new(length: f64, width: f64, color: Color) -> Self {
        Self {
            length,
            width,
            color,
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    #[builder(default = "Analogue Clock".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Update loop
    #[builder(default = Duration::from_secs(1))]
    pub tick_interval: Duration,
    #[builder(default)]
    pub second_hand_mode: SecondHandMode,
    #[builder(default = true)]
    pub show_second_hand: bool,
    #[builder(default = 0.25)]
    pub hand_lerp_factor: f64,

    // Face geometry, radii as fractions of the half-extent
    #[builder(default = 0.98)]
    pub face_radius: f64,
    #[builder(default = 3.0)]
    pub face_stroke_width: f64,
    #[builder(default = 0.70)]
    pub inner_radius: f64,
    #[builder(default = 0.04)]
    pub axis_cover_radius: f64,
    #[builder(default = 2.0)]
    pub axis_cover_stroke_width: f64,

    // Hands
    #[builder(default = HandStyle::HOUR)]
    pub hour_hand: HandStyle,
    #[builder(default = HandStyle::MINUTE)]
    pub minute_hand: HandStyle,
    #[builder(default = HandStyle::SECOND)]
    pub second_hand: HandStyle,

    // Colors
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = Color::new(0xb3, 0xb3, 0xb3))]
    pub face_color: Color,
    #[builder(default = Color::BLACK)]
    pub inner_color: Color,
    #[builder(default = Color::BLACK)]
    pub outline_color: Color,
    #[builder(default = Color::BLACK)]
    pub axis_cover_color: Color,
    #[builder(default = Color::WHITE)]
    pub axis_cover_outline_color: Color,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClockConfig {
    pub fn hand(&self, hand: HandId) -> &HandStyle {
        match hand {
            HandId::Hour => &self.hour_hand,
            HandId::Minute => &self.minute_hand,
            HandId::Second => &self.second_hand,
        }
    }

    /// Hands that get a visual element on the face.
    pub fn mounted_hands(&self) -> Vec<HandId> {
        HandId::ALL
            .into_iter()
            .filter(|hand| *hand != HandId::Second || self.show_second_hand)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ClockError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ClockError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if !FRAMERATE_RANGE.contains(&self.max_framerate) {
            return Err(ClockError::InvalidConfig(format!(
                "max framerate must be in [{}, {}], got {}",
                FRAMERATE_RANGE.start(),
                FRAMERATE_RANGE.end(),
                self.max_framerate
            )));
        }
        if !(MIN_PERIOD..=MAX_PERIOD).contains(&self.tick_interval) {
            return Err(ClockError::InvalidConfig(format!(
                "tick interval must be in [{MIN_PERIOD:?}, {MAX_PERIOD:?}], got {:?}",
                self.tick_interval
            )));
        }
        if !(self.hand_lerp_factor > 0.0 && self.hand_lerp_factor <= 1.0) {
            return Err(ClockError::InvalidConfig(format!(
                "hand lerp factor must be in (0, 1], got {}",
                self.hand_lerp_factor
            )));
        }

        let ratios = [
            ("face radius", self.face_radius),
            ("inner radius", self.inner_radius),
            ("axis cover radius", self.axis_cover_radius),
            ("hour hand length", self.hour_hand.length),
            ("minute hand length", self.minute_hand.length),
            ("second hand length", self.second_hand.length),
        ];
        for (name, ratio) in ratios {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ClockError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {ratio}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_face() {
        let config = ClockConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.second_hand_mode, SecondHandMode::Sweeping);
        assert_eq!(config.hand(HandId::Second).color.to_css(), "rgb(255, 140, 0)");
        assert_eq!(config.face_color.to_css(), "rgb(179, 179, 179)");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn hiding_the_second_hand_unmounts_it() {
        let config = ClockConfig::builder().show_second_hand(false).build();
        assert_eq!(config.mounted_hands(), vec![HandId::Hour, HandId::Minute]);
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let config = ClockConfig::builder()
            .tick_interval(Duration::ZERO)
            .build();
        assert!(matches!(
            config.validate(),
            Err(ClockError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_huge_tick_interval() {
        let config = ClockConfig::builder()
            .tick_interval(Duration::from_secs(u64::MAX))
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tick interval"));
    }

    #[test]
    fn rejects_framerates_outside_the_supported_range() {
        for fps in [0.0, -5.0, 1e-12, 1e-30, 0.5, 1000.5, f64::INFINITY, f64::NAN] {
            let config = ClockConfig::builder().max_framerate(fps).build();
            assert!(
                matches!(config.validate(), Err(ClockError::InvalidConfig(_))),
                "framerate {fps} accepted"
            );
        }
    }

    #[test]
    fn accepts_framerate_bounds() {
        for fps in [1.0, 60.0, 1000.0] {
            let config = ClockConfig::builder().max_framerate(fps).build();
            assert!(config.validate().is_ok(), "framerate {fps} rejected");
            // Frame pacing derived from a valid rate never panics.
            let _ = Duration::from_secs_f64(1.0 / config.max_framerate);
        }
    }

    #[test]
    fn rejects_hands_longer_than_the_face() {
        let config = ClockConfig::builder()
            .minute_hand(HandStyle::new(1.5, 3.0, Color::WHITE))
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("minute hand length"));
    }
}
