/// 4×4 Bayer threshold matrix, row-major, each cell `(v + 0.5) / 16` so
/// thresholds are centered within their quantization bins.
pub const BAYER_4X4: [[f32; 4]; 4] = bayer_matrix();

const fn bayer_matrix() -> [[f32; 4]; 4] {
    const CELLS: [[u8; 4]; 4] = [
        [0, 8, 2, 10],
        [12, 4, 14, 6],
        [3, 11, 1, 9],
        [15, 7, 13, 5],
    ];
    let mut out = [[0.0f32; 4]; 4];
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            out[y][x] = (CELLS[y][x] as f32 + 0.5) / 16.0;
            x += 1;
        }
        y += 1;
    }
    out
}

/// Two-node gradients whose colors differ by less than this per channel
/// skip dithering entirely; banding is invisible for near-identical stops.
/// Tuned, not derived.
pub const SKIP_DITHER_CHANNEL_DELTA: f32 = 0.05;

/// Dither amplitude in 8-bit pixel units.
///
/// Exactly 0 when disabled; otherwise grows linearly with grain from 0.6
/// (baseline banding suppression) to 2.0.
#[inline]
pub fn amplitude(grain: f32, allow_dithering: bool) -> f32 {
    if allow_dithering {
        0.6 + 1.4 * grain.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Signed noise for the pixel at `(x, y)`, in normalized color units.
///
/// Zero-centered: the Bayer threshold is shifted by −0.5 before scaling so
/// dithering never biases the mean brightness.
#[inline]
pub fn noise_at(x: u32, y: u32, amplitude: f32) -> f32 {
    let threshold = BAYER_4X4[(y % 4) as usize][(x % 4) as usize];
    (threshold - 0.5) * amplitude / 255.0
}
