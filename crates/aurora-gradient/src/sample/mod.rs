//! Circular-canvas color sampling.
//!
//! Maps a point on the interaction circle to a color: angle drives hue,
//! radial distance drives saturation (falling toward the rim) and
//! brightness (rising toward the rim), so the center is a saturated
//! mid-tone and the rim a near-white pastel.

use crate::color::{Color, Hsb};
use crate::coords::{InteractionCircle, Vec2};

/// Per-mode brightness baseline for the sampler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LightnessMode {
    Sparkle,
    Sun,
    Moon,
}

impl LightnessMode {
    #[inline]
    pub fn baseline(self) -> f32 {
        match self {
            LightnessMode::Sparkle => 0.6,
            LightnessMode::Sun => 0.7,
            LightnessMode::Moon => 0.45,
        }
    }
}

/// Tuned sampler coefficients.
///
/// Defaults produce a near-saturated mid-tone at the center and a
/// near-white pastel at the rim. Tunable, but the center/rim contract
/// above must hold for any replacement values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerTuning {
    /// Saturation falloff per unit of normalized radius.
    pub saturation_falloff: f32,
    /// Brightness gain per unit of normalized radius.
    pub brightness_gain: f32,
    /// Floor below which saturation never drops.
    pub min_saturation: f32,
    /// Floor below which brightness never drops.
    pub min_brightness: f32,
}

impl Default for SamplerTuning {
    fn default() -> Self {
        Self {
            saturation_falloff: 0.8,
            brightness_gain: 0.4,
            min_saturation: 0.1,
            min_brightness: 0.2,
        }
    }
}

/// Samples the circle color field at `point`.
///
/// - hue = angle around the center, normalized to `[0, 1)`
/// - saturation = `clamp(1 − falloff·dist, min_s, 1)`
/// - brightness = `clamp(baseline + gain·dist, min_b, 1)`
///
/// The result is always opaque; callers preserve node alpha separately.
pub fn color_at(
    point: Vec2,
    circle: &InteractionCircle,
    mode: LightnessMode,
    tuning: &SamplerTuning,
) -> Color {
    let hue = circle.angle_of(point) / core::f32::consts::TAU;
    let dist = circle.normalized_distance(point);

    let saturation = (1.0 - tuning.saturation_falloff * dist).clamp(tuning.min_saturation, 1.0);
    let brightness =
        (mode.baseline() + tuning.brightness_gain * dist).clamp(tuning.min_brightness, 1.0);

    Color::from_hsb(Hsb::new(hue, saturation, brightness), 1.0)
}
