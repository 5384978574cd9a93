use crate::color::Color;
use crate::coords::Vec2;

/// Fixed anchor triangle for the 3-color blend, in unit render space.
///
/// Anchors are the top corners and the bottom midpoint of the render area,
/// inset by a constant fraction so the pure anchor colors never land
/// exactly on an edge pixel. The inset is tuned, not derived.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnchorLayout {
    pub inset: f32,
}

impl Default for AnchorLayout {
    fn default() -> Self {
        Self { inset: 0.08 }
    }
}

impl AnchorLayout {
    /// Anchor positions in unit space: top-left, top-right, bottom-center.
    #[inline]
    pub fn anchors(&self) -> [Vec2; 3] {
        let i = self.inset;
        [
            Vec2::new(i, i),
            Vec2::new(1.0 - i, i),
            Vec2::new(0.5, 1.0 - i),
        ]
    }
}

/// Denominators smaller than this are treated as degenerate geometry.
const DEGENERATE_DENOM: f32 = 1e-8;

/// Nearest-anchor winner-take-all weights.
fn nearest_anchor(p: Vec2, anchors: &[Vec2; 3]) -> (f32, f32, f32) {
    let mut best = 0;
    let mut best_dist = p.distance(anchors[0]);
    for (i, a) in anchors.iter().enumerate().skip(1) {
        let d = p.distance(*a);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    match best {
        0 => (1.0, 0.0, 0.0),
        1 => (0.0, 1.0, 0.0),
        _ => (0.0, 0.0, 1.0),
    }
}

/// Barycentric coordinates of `p` with respect to the anchor triangle.
///
/// Two-edge-vector dot-product solve. Guarantees `u, v, w ≥ 0` and
/// `u + v + w = 1` for any query point:
/// - negative components (point outside the triangle) are clamped to 0 and
///   the remainder renormalized, which degrades to winner-take-all beyond a
///   vertex region;
/// - a degenerate (collinear/coincident) triangle falls back to the nearest
///   anchor rather than dividing by zero.
pub fn barycentric_weights(p: Vec2, anchors: &[Vec2; 3]) -> (f32, f32, f32) {
    let v0 = anchors[1] - anchors[0];
    let v1 = anchors[2] - anchors[0];
    let v2 = p - anchors[0];

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < DEGENERATE_DENOM {
        return nearest_anchor(p, anchors);
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    let u = u.max(0.0);
    let v = v.max(0.0);
    let w = w.max(0.0);

    let sum = u + v + w;
    if sum <= DEGENERATE_DENOM {
        return nearest_anchor(p, anchors);
    }
    (u / sum, v / sum, w / sum)
}

/// Fills the 3-color slot set from 1–3 active colors.
///
/// Missing slots repeat their predecessor (`cB ← cA`, `cC ← cB`) so the
/// 3-slot blend degrades gracefully below 3 nodes. An empty slice yields
/// opaque black in all slots.
pub fn fill_slots(colors: &[Color]) -> [Color; 3] {
    let a = colors.first().copied().unwrap_or(Color::black());
    let b = colors.get(1).copied().unwrap_or(a);
    let c = colors.get(2).copied().unwrap_or(b);
    [a, b, c]
}

/// Blends three colors by weight in premultiplied-alpha space.
///
/// `weights` are expected non-negative; they are not required to sum to 1
/// (activation fading deliberately hands in partially-faded vectors).
pub fn blend_colors(weights: (f32, f32, f32), colors: &[Color; 3]) -> Color {
    let (u, v, w) = weights;
    let pa = colors[0].premul();
    let pb = colors[1].premul();
    let pc = colors[2].premul();

    Color::from_premul(
        u * pa.0 + v * pb.0 + w * pc.0,
        u * pa.1 + v * pb.1 + w * pc.1,
        u * pa.2 + v * pb.2 + w * pc.2,
        (u * pa.3 + v * pb.3 + w * pc.3).clamp(0.0, 1.0),
    )
    .clamped()
}

/// Live-preview color at `p`: barycentric weights multiplied by per-anchor
/// activation, so a node-count transition fades the new anchor in rather
/// than popping.
///
/// Activation deliberately does not renormalize the weights; a half-faded
/// anchor contributes half its premultiplied color, which is the fade.
pub fn preview_color(
    p: Vec2,
    layout: &AnchorLayout,
    colors: &[Color; 3],
    activation: [f32; 3],
) -> Color {
    let (u, v, w) = barycentric_weights(p, &layout.anchors());
    blend_colors(
        (u * activation[0], v * activation[1], w * activation[2]),
        colors,
    )
}
