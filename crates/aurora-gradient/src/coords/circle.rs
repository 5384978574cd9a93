use super::Vec2;

/// The bounded circle inside which gradient nodes may be placed.
///
/// Semantics:
/// - `center` and `radius` are in the same coordinate space as drag input.
/// - Points outside the circle are projected radially onto the boundary,
///   preserving their angle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InteractionCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl InteractionCircle {
    #[inline]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Builds the circle for a window of `width` × `height` with a uniform
    /// `padding` margin: `radius = min(width, height) / 2 − padding`.
    ///
    /// Degenerate windows (padding larger than the half-extent) yield a
    /// zero-radius circle rather than a negative one.
    pub fn for_window(width: f32, height: f32, padding: f32) -> Self {
        let radius = (width.min(height) / 2.0 - padding).max(0.0);
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            radius,
        }
    }

    /// Angle of `point` around the center, radians in `[0, 2π)`.
    #[inline]
    pub fn angle_of(&self, point: Vec2) -> f32 {
        (point - self.center).angle()
    }

    /// Distance of `point` from the center, normalized by the radius and
    /// clamped to `[0, 1]`. A zero-radius circle reports distance 0.
    #[inline]
    pub fn normalized_distance(&self, point: Vec2) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        (point.distance(self.center) / self.radius).clamp(0.0, 1.0)
    }

    /// Point at `angle` radians and `t`×radius from the center.
    #[inline]
    pub fn point_at(&self, angle: f32, t: f32) -> Vec2 {
        self.center + Vec2::from_angle(angle) * (self.radius * t)
    }

    /// Projects `point` radially onto the boundary if it lies outside the
    /// circle; interior points are returned unchanged.
    pub fn clamp_to_circle(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center;
        let dist = offset.length();
        if dist <= self.radius || dist == 0.0 {
            point
        } else {
            self.center + offset * (self.radius / dist)
        }
    }
}
