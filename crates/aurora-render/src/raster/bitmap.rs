use anyhow::{bail, Context};
use bytemuck::{Pod, Zeroable};

/// One straight-alpha sRGB pixel, byte order R, G, B, A.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Hard ceiling on either bitmap dimension.
///
/// Requests beyond this are treated as allocation failures and degrade to
/// the linear fallback rather than attempting a multi-gigabyte buffer.
pub const MAX_DIMENSION: u32 = 16_384;

/// CPU pixel buffer, tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocates a zeroed bitmap.
    ///
    /// Fails (rather than aborting) on zero/oversized dimensions or when
    /// the allocator refuses the buffer; the scheduler turns that failure
    /// into the cheap linear fallback.
    pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            bail!("bitmap dimensions must be non-zero ({width}×{height})");
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            bail!("bitmap dimensions exceed {MAX_DIMENSION} ({width}×{height})");
        }

        let len = (width as usize) * (height as usize) * 4;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .with_context(|| format!("allocating {len}-byte bitmap ({width}×{height})"))?;
        data.resize(len, 0);

        Ok(Self { width, height, data })
    }

    /// Infallible constructor for the small fallback strip.
    ///
    /// Uses plain allocation (tiny buffer); width is forced to at least 1.
    pub(crate) fn strip(width: u32) -> Self {
        let width = width.max(1);
        Self {
            width,
            height: 1,
            data: vec![0; width as usize * 4],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        debug_assert!(x < self.width && y < self.height);
        self.pixels()[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, p: Rgba8) {
        debug_assert!(x < self.width && y < self.height);
        let w = self.width;
        self.pixels_mut()[(y * w + x) as usize] = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bitmap_is_zeroed() {
        let b = Bitmap::new(4, 3).unwrap();
        assert_eq!(b.as_bytes().len(), 48);
        assert!(b.pixels().iter().all(|p| *p == Rgba8::default()));
    }

    #[test]
    fn zero_dimension_is_an_error() {
        assert!(Bitmap::new(0, 10).is_err());
        assert!(Bitmap::new(10, 0).is_err());
    }

    #[test]
    fn oversized_dimension_is_an_error() {
        assert!(Bitmap::new(MAX_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn pixel_round_trip() {
        let mut b = Bitmap::new(2, 2).unwrap();
        let p = Rgba8::new(1, 2, 3, 4);
        b.set_pixel(1, 0, p);
        assert_eq!(b.pixel(1, 0), p);
        assert_eq!(b.pixel(0, 0), Rgba8::default());
    }
}
