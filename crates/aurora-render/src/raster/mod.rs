//! Dithered bitmap synthesis.
//!
//! Two paths, selected by node count:
//! - 3 nodes: per-pixel barycentric blend against the fixed anchor triangle
//! - 1–2 nodes: axis-angled linear gradient span fill
//!
//! Both paths finish with 4×4 ordered (Bayer) dithering scaled by the
//! gradient's grain, unless the caller or the skip heuristic disables it.

mod bitmap;
mod dither;
mod linear;

pub use bitmap::{Bitmap, Rgba8, MAX_DIMENSION};
pub use dither::{amplitude, noise_at, BAYER_4X4, SKIP_DITHER_CHANNEL_DELTA};

use aurora_gradient::blend::{barycentric_weights, blend_colors, fill_slots, AnchorLayout};
use aurora_gradient::color::Color;
use aurora_gradient::coords::Vec2;
use aurora_gradient::model::SpaceGradient;

/// Per-job raster parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterParams {
    pub width: u32,
    pub height: u32,
    /// Caller intent; the skip heuristic may still force dithering off.
    pub allow_dithering: bool,
    pub anchors: AnchorLayout,
}

impl RasterParams {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            allow_dithering: true,
            anchors: AnchorLayout::default(),
        }
    }
}

/// Skip heuristic for the linear path.
///
/// Dithering is pointless for near-identical two-node gradients, and the
/// ≥3-stop clause guards against this path ever being fed a gradient the
/// barycentric path should own.
fn skip_dithering(stops: &[linear::Stop]) -> bool {
    match stops.len() {
        2 => stops[0].1.max_channel_delta(stops[1].1) < SKIP_DITHER_CHANNEL_DELTA,
        n => n >= 3,
    }
}

#[inline]
fn quantize(c: Color, noise: f32, opacity: f32) -> Rgba8 {
    let q = |v: f32| ((v + noise).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba8::new(
        q(c.r),
        q(c.g),
        q(c.b),
        // Noise applies to RGB only; alpha is scaled by gradient opacity.
        ((c.a * opacity).clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Rasterizes a gradient snapshot into a fresh bitmap.
///
/// Fails only on allocation problems (zero/oversized targets, OOM); the
/// scheduler degrades those to [`linear_fallback`].
pub fn rasterize(gradient: &SpaceGradient, params: &RasterParams) -> anyhow::Result<Bitmap> {
    let mut out = Bitmap::new(params.width, params.height)?;

    if gradient.nodes().len() >= 3 {
        fill_barycentric(gradient, params, &mut out);
    } else {
        fill_linear(gradient, params, &mut out);
    }
    Ok(out)
}

/// 3-node path: literal barycentric weights per pixel, no activation
/// fading (the animated fade exists only in the live shader preview).
fn fill_barycentric(gradient: &SpaceGradient, params: &RasterParams, out: &mut Bitmap) {
    let anchors = params.anchors.anchors();
    let colors: Vec<Color> = gradient.nodes().iter().map(|n| n.color).collect();
    let slots = fill_slots(&colors);
    let amp = amplitude(gradient.grain(), params.allow_dithering);
    let opacity = gradient.opacity();

    let (w, h) = (params.width, params.height);
    for y in 0..h {
        let py = (y as f32 + 0.5) / h as f32;
        for x in 0..w {
            let px = (x as f32 + 0.5) / w as f32;
            let weights = barycentric_weights(Vec2::new(px, py), &anchors);
            let c = blend_colors(weights, &slots);
            out.set_pixel(x, y, quantize(c, noise_at(x, y, amp), opacity));
        }
    }
}

/// 1–2 node path: axis-angled linear span fill with ordered noise.
fn fill_linear(gradient: &SpaceGradient, params: &RasterParams, out: &mut Bitmap) {
    let stops = linear::stops_for(gradient);
    let allow = params.allow_dithering && !skip_dithering(&stops);
    let amp = amplitude(gradient.grain(), allow);
    let opacity = gradient.opacity();

    let (w, h) = (params.width, params.height);
    for y in 0..h {
        for x in 0..w {
            let t = linear::axis_t(x, y, w, h, gradient.angle);
            let c = linear::sample(&stops, t);
            out.set_pixel(x, y, quantize(c, noise_at(x, y, amp), opacity));
        }
    }
}

/// Cheap low-resolution strip for live preview and failure degrade.
///
/// One linear pass over 256 pixels, no dithering; hosts stretch it to the
/// display size while the debounced high-quality raster catches up. Small
/// enough that allocation cannot realistically fail.
pub fn linear_fallback(gradient: &SpaceGradient) -> Bitmap {
    const STRIP_WIDTH: u32 = 256;
    let stops = linear::stops_for(gradient);
    let opacity = gradient.opacity();

    let mut out = Bitmap::strip(STRIP_WIDTH);
    for x in 0..STRIP_WIDTH {
        let t = x as f32 / (STRIP_WIDTH - 1) as f32;
        let c = linear::sample(&stops, t);
        out.set_pixel(x, 0, quantize(c, 0.0, opacity));
    }
    out
}
