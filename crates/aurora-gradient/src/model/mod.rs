//! The gradient data entity.
//!
//! A [`SpaceGradient`] owns 1–3 [`GradientNode`]s and is mutated only
//! through the editor's add/remove/drag/recolor operations. Renderers
//! receive cloned snapshots, never live references.

mod node;
mod gradient;

pub use node::{GradientNode, NodeId};
pub use gradient::{CountState, SpaceGradient};
