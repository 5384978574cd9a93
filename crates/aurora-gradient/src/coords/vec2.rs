use core::ops::{Add, Div, Mul, Sub};

/// 2D vector in logical pixels (or unit canvas space, depending on caller).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, rhs: Vec2) -> f32 {
        (self - rhs).length()
    }

    /// Angle of the vector in radians, normalized to `[0, 2π)`.
    #[inline]
    pub fn angle(self) -> f32 {
        let a = self.y.atan2(self.x);
        if a < 0.0 { a + core::f32::consts::TAU } else { a }
    }

    /// Unit vector at `angle` radians.
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_normalized_to_positive() {
        // atan2 of (0, -1) is -π/2; normalized it should be 3π/2.
        let a = Vec2::new(0.0, -1.0).angle();
        assert!((a - 3.0 * core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn from_angle_round_trip() {
        let v = Vec2::from_angle(1.2);
        assert!((v.angle() - 1.2).abs() < 1e-6);
        assert!((v.length() - 1.0).abs() < 1e-6);
    }
}
