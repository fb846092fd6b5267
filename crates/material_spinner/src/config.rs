use std::time::Duration;

use serde::{Deserialize, Serialize};
use vello::peniko::Color;

/// Default ring diameter.
pub const DEFAULT_SIZE: f64 = 50.0;
/// Default outline thickness.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.5;
/// Default length of one animation cycle, in seconds.
pub const DEFAULT_ANIMATION_DURATION: f64 = 2.0;

/// Spinner configuration.
///
/// Values are read when the ring geometry is recomputed and when an animation
/// is started; a running animation keeps the settings it was started with.
/// Nothing here is validated: a non-positive radius just yields an invisible
/// ring.
///
/// Every field has a default, so a partial RON document is enough:
///
/// ```
/// use material_spinner::SpinnerConfig;
///
/// let config = SpinnerConfig::from_ron_str("(size: 70.0, stroke_width: 10.0)").unwrap();
/// assert_eq!(config.size, 70.0);
/// assert_eq!(config.animation_duration, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Ring diameter.
    pub size: f64,
    #[serde(with = "rgba8")]
    pub background_color: Color,
    #[serde(with = "rgba8")]
    pub stroke_color: Color,
    pub stroke_width: f64,
    /// Seconds per cycle.
    pub animation_duration: f64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            background_color: Color::TRANSPARENT,
            stroke_color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

impl SpinnerConfig {
    /// Parse a configuration from RON text. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Ring radius: `(size - stroke_width) / 2`.
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.size - self.stroke_width) / 2.0
    }

    /// Cycle length as a [`Duration`]. Negative or non-finite seconds map to zero.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.animation_duration).unwrap_or(Duration::ZERO)
    }
}

/// Colors travel as `[r, g, b, a]` bytes.
mod rgba8 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use vello::peniko::Color;

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        let rgba = color.to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a].serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let [r, g, b, a] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Color::from_rgba8(r, g, b, a))
    }
}
