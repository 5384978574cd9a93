/// Hue/saturation/brightness triple.
///
/// `h` is in `[0, 1)` (fraction of a full turn, not degrees); `s` and `b`
/// are in `[0, 1]`. This matches the circular sampler, which derives hue
/// directly from a normalized angle.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
}

impl Hsb {
    #[inline]
    pub fn new(h: f32, s: f32, b: f32) -> Self {
        Self {
            h: h.rem_euclid(1.0),
            s: s.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Standard HSV → RGB. All components in `[0, 1]`.
    pub fn to_rgb(self) -> (f32, f32, f32) {
        let h = self.h.rem_euclid(1.0) * 6.0;
        let i = h.floor();
        let f = h - i;
        let p = self.b * (1.0 - self.s);
        let q = self.b * (1.0 - self.s * f);
        let t = self.b * (1.0 - self.s * (1.0 - f));

        match i as u32 % 6 {
            0 => (self.b, t, p),
            1 => (q, self.b, p),
            2 => (p, self.b, t),
            3 => (p, q, self.b),
            4 => (t, p, self.b),
            _ => (self.b, p, q),
        }
    }

    /// Standard RGB → HSV. Achromatic inputs report hue 0.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta <= 0.0 {
            0.0
        } else if max == r {
            (((g - b) / delta).rem_euclid(6.0)) / 6.0
        } else if max == g {
            ((b - r) / delta + 2.0) / 6.0
        } else {
            ((r - g) / delta + 4.0) / 6.0
        };

        let s = if max <= 0.0 { 0.0 } else { delta / max };

        Self { h, s, b: max }
    }
}
