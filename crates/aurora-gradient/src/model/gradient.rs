use crate::color::Color;
use crate::coords::Vec2;

use super::{GradientNode, NodeId};

/// Node-count state of a gradient.
///
/// Keyed purely by `|nodes|`; transitions happen through
/// [`SpaceGradient::add_node`] and [`SpaceGradient::remove_node`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CountState {
    Single,
    Pair,
    Triple,
}

/// The background gradient: 1–3 color nodes plus global controls.
///
/// Invariants:
/// - `1 ≤ nodes.len() ≤ 3` at all times; violating add/remove calls are
///   no-ops.
/// - nodes stay sorted by `location`.
/// - while in `Triple`, the primary identity is locked to the node that had
///   the smallest `location` when the gradient entered `Triple`, and stays
///   locked across later drags and recolors. The lock is re-derived only if
///   that node disappears or the count changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceGradient {
    nodes: Vec<GradientNode>,
    /// Axis angle in degrees, used only by the 1–2 stop linear fallback.
    pub angle: f32,
    grain: f32,
    opacity: f32,
    primary_lock: Option<NodeId>,
}

impl SpaceGradient {
    /// Builds a gradient from caller-supplied nodes.
    ///
    /// An empty list substitutes the built-in default seed; more than three
    /// nodes are truncated after sorting by `location`.
    pub fn new(mut nodes: Vec<GradientNode>) -> Self {
        if nodes.is_empty() {
            return Self::default_seed();
        }
        nodes.sort_by(|a, b| a.location.total_cmp(&b.location));
        nodes.truncate(3);

        let mut g = Self {
            nodes,
            angle: 0.0,
            grain: 0.0,
            opacity: 1.0,
            primary_lock: None,
        };
        g.refresh_primary_lock();
        g
    }

    /// The built-in two-stop seed used when a caller hands over no nodes.
    pub fn default_seed() -> Self {
        Self::new(vec![
            GradientNode::new(Color::from_hex("#4A90D9"), 0.0),
            GradientNode::new(Color::from_hex("#F5E6D3"), 1.0),
        ])
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn nodes(&self) -> &[GradientNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&GradientNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    #[inline]
    pub fn count_state(&self) -> CountState {
        match self.nodes.len() {
            1 => CountState::Single,
            2 => CountState::Pair,
            _ => CountState::Triple,
        }
    }

    #[inline]
    pub fn grain(&self) -> f32 {
        self.grain
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Resolves the primary node.
    ///
    /// `Triple` uses the locked identity; `Single`/`Pair` use the
    /// caller-supplied preferred id when it names an existing node,
    /// otherwise the node with the smallest `location`.
    pub fn primary(&self, preferred: Option<NodeId>) -> NodeId {
        if self.nodes.len() == 3 {
            if let Some(lock) = self.primary_lock {
                if self.contains(lock) {
                    return lock;
                }
            }
        } else if let Some(p) = preferred {
            if self.contains(p) {
                return p;
            }
        }
        // Nodes are sorted by location, so the first node is the smallest.
        self.nodes[0].id
    }

    // ── mutation ──────────────────────────────────────────────────────────

    #[inline]
    pub fn set_grain(&mut self, grain: f32) {
        self.grain = grain.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Adds a node, assigning `location` by count at insertion time:
    /// 1st → 0.0, 2nd → 1.0, 3rd → 0.5. A fourth add is a no-op.
    pub fn add_node(&mut self, color: Color) -> Option<NodeId> {
        let location = match self.nodes.len() {
            0 => 0.0,
            1 => 1.0,
            2 => 0.5,
            _ => {
                log::debug!("add_node ignored: gradient already has 3 nodes");
                return None;
            }
        };

        let node = GradientNode::new(color, location);
        let id = node.id;
        self.nodes.push(node);
        self.sort_nodes();
        self.refresh_primary_lock();
        log::debug!("node {id:?} added at location {location}, state {:?}", self.count_state());
        Some(id)
    }

    /// Removes `selected` if it names an existing node, otherwise the last
    /// node. Removing the only node is a no-op.
    pub fn remove_node(&mut self, selected: Option<NodeId>) -> Option<NodeId> {
        if self.nodes.len() <= 1 {
            log::debug!("remove_node ignored: gradient has a single node");
            return None;
        }

        let index = selected
            .and_then(|id| self.nodes.iter().position(|n| n.id == id))
            .unwrap_or(self.nodes.len() - 1);
        let removed = self.nodes.remove(index);
        self.refresh_primary_lock();
        log::debug!("node {:?} removed, state {:?}", removed.id, self.count_state());
        Some(removed.id)
    }

    /// Moves a node along the `[0, 1]` axis and re-sorts.
    ///
    /// Does not touch the primary lock: in `Triple` the locked identity
    /// survives location changes by design of the selection policy.
    pub fn set_node_location(&mut self, id: NodeId, location: f32) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == id) {
            n.location = location.clamp(0.0, 1.0);
            self.sort_nodes();
        }
    }

    /// Stores a canvas-space position for a node.
    ///
    /// Coordinates are expected pre-clamped to the interaction circle by
    /// the editor; components are additionally clamped to unit space here.
    pub fn set_node_position(&mut self, id: NodeId, position: Vec2) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == id) {
            n.position = Some(Vec2::new(
                position.x.clamp(0.0, 1.0),
                position.y.clamp(0.0, 1.0),
            ));
        }
    }

    /// Replaces a node's color outright (alpha included).
    pub fn set_node_color(&mut self, id: NodeId, color: Color) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == id) {
            n.color = color.clamped();
        }
    }

    /// Position-driven recolor: hue/saturation/brightness come from the
    /// sampled color, the node's stored alpha is preserved exactly.
    pub fn recolor_node(&mut self, id: NodeId, sampled: Color) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == id) {
            n.color = n.color.recolor_preserving_alpha(sampled);
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn sort_nodes(&mut self) {
        self.nodes.sort_by(|a, b| a.location.total_cmp(&b.location));
    }

    /// Maintains the `Triple` primary lock across count changes.
    ///
    /// Entering `Triple` locks the smallest-location node at that moment;
    /// leaving `Triple` clears the lock; a dangling lock id is re-derived.
    fn refresh_primary_lock(&mut self) {
        if self.nodes.len() == 3 {
            let valid = self.primary_lock.map(|id| self.contains(id)).unwrap_or(false);
            if !valid {
                self.primary_lock = Some(self.nodes[0].id);
                log::debug!("primary locked to {:?}", self.primary_lock);
            }
        } else {
            self.primary_lock = None;
        }
    }

    /// Stable content hash over all render-relevant fields.
    ///
    /// Used (together with target dimensions) as the render-cache key, so
    /// it must not depend on node identity, only on values. Canvas
    /// positions are deliberately excluded: the rasterizer never reads
    /// them, and they reach the output only through the colors a drag
    /// samples, so hashing them would give every drag frame a fresh key
    /// for a pixel-identical bitmap.
    pub fn content_hash(&self) -> u64 {
        // FNV-1a, 64-bit.
        let mut h: u64 = 0xcbf29ce484222325;
        let mut mix = |v: u32| {
            for byte in v.to_le_bytes() {
                h ^= byte as u64;
                h = h.wrapping_mul(0x100000001b3);
            }
        };

        mix(self.nodes.len() as u32);
        for n in &self.nodes {
            mix(n.color.r.to_bits());
            mix(n.color.g.to_bits());
            mix(n.color.b.to_bits());
            mix(n.color.a.to_bits());
            mix(n.location.to_bits());
        }
        mix(self.angle.to_bits());
        mix(self.grain.to_bits());
        mix(self.opacity.to_bits());
        h
    }
}

impl Default for SpaceGradient {
    fn default() -> Self {
        Self::default_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(location: f32) -> GradientNode {
        GradientNode::new(Color::white(), location)
    }

    fn triple() -> SpaceGradient {
        SpaceGradient::new(vec![node(0.0), node(0.5), node(1.0)])
    }

    // ── count limits ──────────────────────────────────────────────────────

    #[test]
    fn add_blocked_at_three() {
        let mut g = triple();
        assert!(g.add_node(Color::black()).is_none());
        assert_eq!(g.nodes().len(), 3);
    }

    #[test]
    fn remove_blocked_at_one() {
        let mut g = SpaceGradient::new(vec![node(0.0)]);
        assert!(g.remove_node(None).is_none());
        assert_eq!(g.nodes().len(), 1);
    }

    #[test]
    fn empty_input_substitutes_default_seed() {
        let g = SpaceGradient::new(vec![]);
        assert_eq!(g.nodes().len(), 2);
    }

    // ── location policy ───────────────────────────────────────────────────

    #[test]
    fn add_location_policy() {
        let mut g = SpaceGradient::new(vec![node(0.0)]);
        let second = g.add_node(Color::black()).unwrap();
        assert_eq!(g.node(second).unwrap().location, 1.0);
        let third = g.add_node(Color::black()).unwrap();
        assert_eq!(g.node(third).unwrap().location, 0.5);
        // Re-sorted: the midpoint node sits between the ends.
        assert_eq!(g.nodes()[1].id, third);
    }

    // ── primary selection ─────────────────────────────────────────────────

    #[test]
    fn triple_locks_smallest_location_on_entry() {
        let mut g = SpaceGradient::new(vec![node(0.0), node(1.0)]);
        let lowest = g.nodes()[0].id;
        g.add_node(Color::black());
        assert_eq!(g.primary(None), lowest);
    }

    #[test]
    fn triple_lock_survives_location_drag() {
        let mut g = SpaceGradient::new(vec![node(0.0), node(0.5), node(1.0)]);
        let locked = g.primary(None);
        g.set_node_location(locked, 0.9);
        assert_eq!(g.primary(None), locked);
    }

    #[test]
    fn triple_lock_ignores_preferred_hint() {
        let g = triple();
        let locked = g.primary(None);
        let other = g.nodes().iter().find(|n| n.id != locked).unwrap().id;
        assert_eq!(g.primary(Some(other)), locked);
    }

    #[test]
    fn lock_cleared_when_leaving_triple() {
        let mut g = triple();
        let locked = g.primary(None);
        g.set_node_location(locked, 0.9);
        g.remove_node(Some(locked));
        // Back in Pair: smallest location wins again.
        assert_eq!(g.primary(None), g.nodes()[0].id);
    }

    #[test]
    fn pair_preferred_hint_wins_when_valid() {
        let g = SpaceGradient::new(vec![node(0.0), node(1.0)]);
        let high = g.nodes()[1].id;
        assert_eq!(g.primary(Some(high)), high);
    }

    #[test]
    fn pair_dangling_hint_falls_back_to_smallest() {
        let g = SpaceGradient::new(vec![node(0.0), node(1.0)]);
        let ghost = GradientNode::new(Color::white(), 0.5).id;
        assert_eq!(g.primary(Some(ghost)), g.nodes()[0].id);
    }

    // ── remove target selection ───────────────────────────────────────────

    #[test]
    fn remove_prefers_selected_node() {
        let mut g = triple();
        let mid = g.nodes()[1].id;
        assert_eq!(g.remove_node(Some(mid)), Some(mid));
        assert!(!g.contains(mid));
    }

    #[test]
    fn remove_without_selection_drops_last() {
        let mut g = triple();
        let last = g.nodes()[2].id;
        assert_eq!(g.remove_node(None), Some(last));
    }

    // ── scalars and recolor ───────────────────────────────────────────────

    #[test]
    fn grain_and_opacity_clamped() {
        let mut g = triple();
        g.set_grain(1.5);
        g.set_opacity(-0.5);
        assert_eq!(g.grain(), 1.0);
        assert_eq!(g.opacity(), 0.0);
    }

    #[test]
    fn recolor_preserves_alpha() {
        let mut g = SpaceGradient::new(vec![node(0.0)]);
        let id = g.nodes()[0].id;
        g.set_node_color(id, Color::new(0.5, 0.5, 0.5, 0.25));
        g.recolor_node(id, Color::opaque(1.0, 0.0, 0.0));
        let n = g.node(id).unwrap();
        assert_eq!(n.color.a, 0.25);
        assert_eq!(n.color.r, 1.0);
    }

    // ── content hash ──────────────────────────────────────────────────────

    #[test]
    fn content_hash_changes_with_grain() {
        let mut g = triple();
        let before = g.content_hash();
        g.set_grain(0.7);
        assert_ne!(before, g.content_hash());
    }

    #[test]
    fn content_hash_stable_for_equal_values() {
        let g = triple();
        assert_eq!(g.content_hash(), g.content_hash());
    }

    #[test]
    fn content_hash_ignores_canvas_positions() {
        let mut g = triple();
        let id = g.nodes()[0].id;
        let before = g.content_hash();
        g.set_node_position(id, Vec2::new(0.25, 0.75));
        assert_eq!(before, g.content_hash());
    }
}
