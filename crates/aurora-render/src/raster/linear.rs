use aurora_gradient::color::Color;
use aurora_gradient::model::SpaceGradient;

/// A resolved linear stop: location along the axis plus color.
pub(crate) type Stop = (f32, Color);

/// Stop list for the 1–2 node linear path, sorted by location.
///
/// A single node is duplicated so downstream code always sees two stops.
pub(crate) fn stops_for(gradient: &SpaceGradient) -> Vec<Stop> {
    let mut stops: Vec<Stop> = gradient
        .nodes()
        .iter()
        .map(|n| (n.location, n.color))
        .collect();
    // Model keeps nodes sorted by location; keep the guarantee local anyway.
    stops.sort_by(|a, b| a.0.total_cmp(&b.0));
    if stops.len() == 1 {
        stops.push(stops[0]);
    }
    stops
}

/// Samples the stop list at `t ∈ [0, 1]`, interpolating in premultiplied
/// space between adjacent stops and padding beyond the ends.
pub(crate) fn sample(stops: &[Stop], t: f32) -> Color {
    debug_assert!(stops.len() >= 2);
    let t = t.clamp(0.0, 1.0);

    if t <= stops[0].0 {
        return stops[0].1;
    }
    if t >= stops[stops.len() - 1].0 {
        return stops[stops.len() - 1].1;
    }

    for pair in stops.windows(2) {
        let (l0, c0) = pair[0];
        let (l1, c1) = pair[1];
        if t <= l1 {
            let span = l1 - l0;
            if span <= f32::EPSILON {
                return c1;
            }
            let local = (t - l0) / span;
            let a = c0.premul();
            let b = c1.premul();
            return Color::from_premul(
                a.0 + (b.0 - a.0) * local,
                a.1 + (b.1 - a.1) * local,
                a.2 + (b.2 - a.2) * local,
                a.3 + (b.3 - a.3) * local,
            );
        }
    }
    stops[stops.len() - 1].1
}

/// Axis coordinate of pixel `(x, y)` for a gradient at `angle_deg`.
///
/// The axis passes through the center of the unit render area; `t` spans
/// `[0, 1]` across the area's projected extent in that direction.
#[inline]
pub(crate) fn axis_t(x: u32, y: u32, width: u32, height: u32, angle_deg: f32) -> f32 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let px = (x as f32 + 0.5) / width as f32 - 0.5;
    let py = (y as f32 + 0.5) / height as f32 - 0.5;
    // |cos| + |sin| is the projected half-extent × 2 of the unit square,
    // and is never below 1 for a unit direction.
    let extent = cos.abs() + sin.abs();
    0.5 + (px * cos + py * sin) / extent
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_gradient::model::GradientNode;

    fn two_stop() -> Vec<Stop> {
        vec![(0.0, Color::black()), (1.0, Color::white())]
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn endpoints_return_stop_colors() {
        let stops = two_stop();
        assert_eq!(sample(&stops, 0.0), Color::black());
        assert_eq!(sample(&stops, 1.0), Color::white());
    }

    #[test]
    fn midpoint_interpolates() {
        let c = sample(&two_stop(), 0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_pads() {
        let stops = vec![(0.25, Color::black()), (0.75, Color::white())];
        assert_eq!(sample(&stops, 0.0), Color::black());
        assert_eq!(sample(&stops, 1.0), Color::white());
    }

    #[test]
    fn coincident_stops_do_not_divide_by_zero() {
        let stops = vec![(0.5, Color::black()), (0.5, Color::white())];
        let c = sample(&stops, 0.5);
        assert!(c.is_finite());
    }

    // ── stop construction ─────────────────────────────────────────────────

    #[test]
    fn single_node_is_duplicated() {
        let g = SpaceGradient::new(vec![GradientNode::new(Color::white(), 0.3)]);
        let stops = stops_for(&g);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0], stops[1]);
    }

    // ── axis projection ───────────────────────────────────────────────────

    #[test]
    fn horizontal_axis_spans_left_to_right() {
        assert!(axis_t(0, 50, 100, 100, 0.0) < 0.01);
        assert!(axis_t(99, 50, 100, 100, 0.0) > 0.99);
        assert!((axis_t(50, 0, 100, 100, 0.0) - 0.505).abs() < 1e-3);
    }

    #[test]
    fn vertical_axis_spans_top_to_bottom() {
        assert!(axis_t(50, 0, 100, 100, 90.0) < 0.01);
        assert!(axis_t(50, 99, 100, 100, 90.0) > 0.99);
    }

    #[test]
    fn axis_t_stays_in_unit_range() {
        for angle in [0.0, 33.0, 45.0, 120.0, 270.0, 359.0] {
            for (x, y) in [(0, 0), (99, 0), (0, 49), (99, 49), (73, 21)] {
                let t = axis_t(x, y, 100, 50, angle);
                assert!((0.0..=1.0).contains(&t), "t={t} at angle {angle}");
            }
        }
    }
}
