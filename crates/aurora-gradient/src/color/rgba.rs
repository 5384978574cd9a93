use super::Hsb;

/// Straight-alpha sRGB color.
///
/// Invariant:
/// - channels are expected in `[0, 1]`; use [`clamped`](Self::clamped) on
///   user-provided inputs.
///
/// Premultiplied values exist only transiently inside the blender, via
/// [`premul`](Self::premul) / [`from_premul`](Self::from_premul).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Returns `(r·a, g·a, b·a, a)` for blending.
    #[inline]
    pub fn premul(self) -> (f32, f32, f32, f32) {
        (self.r * self.a, self.g * self.a, self.b * self.a, self.a)
    }

    /// Rebuilds a straight-alpha color from premultiplied components.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        if a <= 0.0 {
            Self::new(0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / a;
            Self::new(r * inv, g * inv, b * inv, a)
        }
    }

    /// Largest per-channel RGB difference between two colors.
    ///
    /// Used by the rasterizer's skip-dither heuristic; alpha is ignored.
    #[inline]
    pub fn max_channel_delta(self, other: Color) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }

    /// Replaces hue/saturation/brightness from `source` while keeping this
    /// color's alpha exactly.
    ///
    /// This is the recolor path for position-driven edits: the sampler
    /// produces an opaque color from the canvas position, and the node's
    /// stored alpha must survive the edit.
    #[inline]
    pub fn recolor_preserving_alpha(self, source: Color) -> Self {
        Self::new(source.r, source.g, source.b, self.a)
    }

    /// Linear interpolation per channel, straight alpha.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_hsb(self) -> Hsb {
        Hsb::from_rgb(self.r, self.g, self.b)
    }

    pub fn from_hsb(hsb: Hsb, alpha: f32) -> Self {
        let (r, g, b) = hsb.to_rgb();
        Self::new(r, g, b, alpha.clamp(0.0, 1.0))
    }
}
