use std::collections::HashMap;

use crate::coords::{InteractionCircle, Vec2};
use crate::model::{CountState, NodeId, SpaceGradient};
use crate::sample::{self, LightnessMode, SamplerTuning};

use super::solver::{self, SolverTuning};

/// Drag/edit state for one gradient view.
///
/// Holds "what is being dragged" plus the ephemeral canvas positions that
/// have not been persisted into the model yet. Per-frame input lands here;
/// the session mutates the model and keeps its own map in sync.
///
/// Ephemeral positions are visual-only: they let the view draw the thumb
/// exactly under the cursor while the model stores circle-clamped unit
/// coordinates.
#[derive(Debug)]
pub struct EditSession {
    circle: InteractionCircle,
    mode: LightnessMode,
    sampler: SamplerTuning,
    solver: SolverTuning,
    /// Caller-supplied primary hint, honored in `Single`/`Pair` only.
    pub preferred_primary: Option<NodeId>,
    dragging: Option<NodeId>,
    ephemeral: HashMap<NodeId, Vec2>,
}

impl EditSession {
    pub fn new(circle: InteractionCircle, mode: LightnessMode) -> Self {
        Self {
            circle,
            mode,
            sampler: SamplerTuning::default(),
            solver: SolverTuning::default(),
            preferred_primary: None,
            dragging: None,
            ephemeral: HashMap::new(),
        }
    }

    pub fn with_tuning(mut self, sampler: SamplerTuning, solver: SolverTuning) -> Self {
        self.sampler = sampler;
        self.solver = solver;
        self
    }

    /// Updates the circle after a window resize; ephemeral positions are
    /// kept (they are canvas-space and will be re-clamped on the next drag).
    pub fn set_circle(&mut self, circle: InteractionCircle) {
        self.circle = circle;
    }

    #[inline]
    pub fn circle(&self) -> &InteractionCircle {
        &self.circle
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Last visual position for a node, if the session has one.
    #[inline]
    pub fn ephemeral_position(&self, id: NodeId) -> Option<Vec2> {
        self.ephemeral.get(&id).copied()
    }

    /// Runs the deterministic initial layout if no node has been placed.
    pub fn ensure_layout(&mut self, gradient: &mut SpaceGradient) {
        solver::seed_initial_layout(gradient, &self.circle, self.preferred_primary, &self.solver);
    }

    /// Starts a drag on `id`; ignored if the node does not exist.
    pub fn begin_drag(&mut self, gradient: &SpaceGradient, id: NodeId) {
        if gradient.contains(id) {
            self.dragging = Some(id);
            log::debug!("drag started on {id:?}");
        }
    }

    /// Applies a pointer move during a drag.
    ///
    /// Clamps the point to the circle, persists the unit position, and
    /// recolors the dragged node from its circle position (alpha
    /// preserved). Companions are re-placed only when the dragged node is
    /// the primary.
    pub fn drag_to(&mut self, gradient: &mut SpaceGradient, point: Vec2) {
        let Some(id) = self.dragging else {
            return;
        };

        let clamped = self.circle.clamp_to_circle(point);
        self.ephemeral.insert(id, clamped);

        gradient.set_node_position(id, solver::unit_from_canvas(&self.circle, clamped));
        let sampled = sample::color_at(clamped, &self.circle, self.mode, &self.sampler);
        gradient.recolor_node(id, sampled);

        let primary = gradient.primary(self.preferred_primary);
        if id == primary && gradient.count_state() != CountState::Single {
            solver::auto_place_companions(
                gradient,
                &self.circle,
                self.preferred_primary,
                &self.solver,
            );
            // Companions moved under the session's feet: recolor them from
            // their new circle positions and refresh the visual map.
            let companion_ids: Vec<NodeId> = gradient
                .nodes()
                .iter()
                .filter(|n| n.id != primary)
                .map(|n| n.id)
                .collect();
            for cid in companion_ids {
                if let Some(unit) = gradient.node(cid).and_then(|n| n.position) {
                    let canvas = solver::canvas_from_unit(&self.circle, unit);
                    self.ephemeral.insert(cid, canvas);
                    let c = sample::color_at(canvas, &self.circle, self.mode, &self.sampler);
                    gradient.recolor_node(cid, c);
                }
            }
        }
    }

    /// Ends the current drag, if any.
    pub fn end_drag(&mut self) {
        if let Some(id) = self.dragging.take() {
            log::debug!("drag ended on {id:?}");
        }
    }

    /// Drops ephemeral entries whose node no longer exists.
    ///
    /// Must be called after every model mutation that can remove nodes, so
    /// the map cannot leak positions for dead ids.
    pub fn purge_stale(&mut self, gradient: &SpaceGradient) {
        self.ephemeral.retain(|id, _| gradient.contains(*id));
        if let Some(id) = self.dragging {
            if !gradient.contains(id) {
                self.dragging = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::model::GradientNode;

    fn circle() -> InteractionCircle {
        InteractionCircle::new(Vec2::new(100.0, 100.0), 80.0)
    }

    fn gradient(n: usize) -> SpaceGradient {
        let locations = [0.0, 1.0, 0.5];
        SpaceGradient::new(
            locations[..n]
                .iter()
                .map(|l| GradientNode::new(Color::white(), *l))
                .collect(),
        )
    }

    #[test]
    fn drag_clamps_to_circle() {
        let mut session = EditSession::new(circle(), LightnessMode::Sun);
        let mut g = gradient(1);
        let id = g.nodes()[0].id;

        session.begin_drag(&g, id);
        session.drag_to(&mut g, Vec2::new(500.0, 100.0));

        let pos = session.ephemeral_position(id).unwrap();
        assert!((pos.distance(Vec2::new(100.0, 100.0)) - 80.0).abs() < 1e-3);
    }

    #[test]
    fn drag_recolors_but_preserves_alpha() {
        let mut session = EditSession::new(circle(), LightnessMode::Sun);
        let mut g = gradient(1);
        let id = g.nodes()[0].id;
        g.set_node_color(id, Color::new(1.0, 1.0, 1.0, 0.5));

        session.begin_drag(&g, id);
        session.drag_to(&mut g, Vec2::new(140.0, 60.0));

        let n = g.node(id).unwrap();
        assert_eq!(n.color.a, 0.5);
        assert!(n.position.is_some());
    }

    #[test]
    fn primary_drag_places_companions() {
        let mut session = EditSession::new(circle(), LightnessMode::Sun);
        let mut g = gradient(3);
        let primary = g.primary(None);

        session.begin_drag(&g, primary);
        session.drag_to(&mut g, Vec2::new(150.0, 100.0));

        assert!(g.nodes().iter().all(|n| n.position.is_some()));
    }

    #[test]
    fn companion_drag_moves_only_itself() {
        let mut session = EditSession::new(circle(), LightnessMode::Sun);
        let mut g = gradient(3);
        session.ensure_layout(&mut g);
        let primary = g.primary(None);
        let companion = g.nodes().iter().find(|n| n.id != primary).unwrap().id;
        let others_before: Vec<_> = g
            .nodes()
            .iter()
            .filter(|n| n.id != companion)
            .map(|n| (n.id, n.position))
            .collect();

        session.begin_drag(&g, companion);
        session.drag_to(&mut g, Vec2::new(90.0, 120.0));

        for (id, before) in others_before {
            assert_eq!(g.node(id).unwrap().position, before);
        }
    }

    #[test]
    fn purge_drops_dead_ids_and_cancels_drag() {
        let mut session = EditSession::new(circle(), LightnessMode::Sun);
        let mut g = gradient(2);
        let id = g.nodes()[1].id;

        session.begin_drag(&g, id);
        session.drag_to(&mut g, Vec2::new(120.0, 90.0));
        g.remove_node(Some(id));
        session.purge_stale(&g);

        assert!(session.ephemeral_position(id).is_none());
        assert!(!session.is_dragging());
    }

    #[test]
    fn drag_on_unknown_id_is_ignored() {
        let mut session = EditSession::new(circle(), LightnessMode::Sun);
        let g = gradient(1);
        let ghost = GradientNode::new(Color::white(), 0.5).id;
        session.begin_drag(&g, ghost);
        assert!(!session.is_dragging());
    }
}
