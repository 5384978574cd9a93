use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Color;
use crate::coords::Vec2;

/// Stable identity for a gradient node.
///
/// Ids are unique per process and never reused, so ephemeral per-view maps
/// keyed by id cannot alias a removed node to a new one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    /// Allocates a fresh id from the process-wide counter.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single color anchor in the gradient.
///
/// `location` orders nodes along the abstract `[0, 1]` gradient axis and is
/// the sort key; `position`, once placed, is the node's canvas-space
/// coordinate in unit space, clamped by the editor to the interaction
/// circle. Absent until first placed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientNode {
    pub id: NodeId,
    pub color: Color,
    pub location: f32,
    pub position: Option<Vec2>,
}

impl GradientNode {
    pub fn new(color: Color, location: f32) -> Self {
        Self {
            id: NodeId::next(),
            color,
            location: location.clamp(0.0, 1.0),
            position: None,
        }
    }
}
