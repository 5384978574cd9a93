use core::f32::consts::PI;

use crate::coords::{InteractionCircle, Vec2};
use crate::model::{NodeId, SpaceGradient};

/// Tuned layout constants for companion placement.
///
/// The spread and seed radius have no derivation beyond "looks balanced";
/// they are configuration, not geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolverTuning {
    /// Angular offset of each companion from the primary's antipode, radians.
    pub companion_spread: f32,
    /// Normalized radius used by the deterministic initial layout.
    pub seed_radius: f32,
    /// Anchor angles for the initial layout: primary first (upper-left),
    /// then the two companions.
    pub seed_angles: [f32; 3],
}

impl Default for SolverTuning {
    fn default() -> Self {
        Self {
            companion_spread: 0.6,
            seed_radius: 0.9,
            // 135°, 45°, −90°.
            seed_angles: [3.0 * PI / 4.0, PI / 4.0, -PI / 2.0],
        }
    }
}

/// Converts a canvas-space point into the unit position space persisted on
/// nodes: the circle center maps to `(0.5, 0.5)` and the boundary to the
/// unit box inscribing the circle.
#[inline]
pub fn unit_from_canvas(circle: &InteractionCircle, point: Vec2) -> Vec2 {
    if circle.radius <= 0.0 {
        return Vec2::new(0.5, 0.5);
    }
    let offset = (point - circle.center) / circle.radius;
    Vec2::new((offset.x + 1.0) / 2.0, (offset.y + 1.0) / 2.0)
}

/// Inverse of [`unit_from_canvas`].
#[inline]
pub fn canvas_from_unit(circle: &InteractionCircle, unit: Vec2) -> Vec2 {
    let offset = Vec2::new(unit.x * 2.0 - 1.0, unit.y * 2.0 - 1.0);
    circle.center + offset * circle.radius
}

/// Deterministic first layout: runs only when no node has a position yet,
/// and places the primary at the first seed anchor with companions at the
/// remaining anchors, all at `seed_radius` × radius.
///
/// Reproducible regardless of node color, so a fresh 3-node gradient always
/// opens as the same triangle.
pub fn seed_initial_layout(
    gradient: &mut SpaceGradient,
    circle: &InteractionCircle,
    preferred_primary: Option<NodeId>,
    tuning: &SolverTuning,
) {
    if gradient.nodes().iter().any(|n| n.position.is_some()) {
        return;
    }

    let primary = gradient.primary(preferred_primary);
    let companions: Vec<NodeId> = gradient
        .nodes()
        .iter()
        .map(|n| n.id)
        .filter(|id| *id != primary)
        .collect();

    let place = |g: &mut SpaceGradient, id: NodeId, angle: f32| {
        let point = circle.point_at(angle, tuning.seed_radius);
        g.set_node_position(id, unit_from_canvas(circle, point));
    };

    place(gradient, primary, tuning.seed_angles[0]);
    for (i, id) in companions.into_iter().enumerate() {
        place(gradient, id, tuning.seed_angles[1 + i]);
    }
}

/// Re-places the non-primary nodes around the primary.
///
/// - `Pair`: the companion sits exactly antipodal to the primary, at the
///   primary's normalized radius.
/// - `Triple`: both companions sit at `primary_angle + π ± spread`, at the
///   primary's normalized radius.
///
/// Call this only when the *primary* moves; dragging a companion must move
/// that node alone.
pub fn auto_place_companions(
    gradient: &mut SpaceGradient,
    circle: &InteractionCircle,
    preferred_primary: Option<NodeId>,
    tuning: &SolverTuning,
) {
    let primary = gradient.primary(preferred_primary);
    let Some(unit) = gradient.node(primary).and_then(|n| n.position) else {
        return;
    };

    let point = canvas_from_unit(circle, unit);
    let angle = circle.angle_of(point);
    let t = circle.normalized_distance(point);
    let antipode = angle + PI;

    let companions: Vec<NodeId> = gradient
        .nodes()
        .iter()
        .map(|n| n.id)
        .filter(|id| *id != primary)
        .collect();

    let angles: &[f32] = match companions.len() {
        1 => &[antipode],
        2 => &[antipode - tuning.companion_spread, antipode + tuning.companion_spread],
        _ => return,
    };

    for (id, a) in companions.into_iter().zip(angles) {
        let placed = circle.point_at(*a, t);
        gradient.set_node_position(id, unit_from_canvas(circle, placed));
    }
}
