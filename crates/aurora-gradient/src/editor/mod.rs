//! Interactive gradient editing on the circular canvas.
//!
//! Scope:
//! - companion auto-placement and deterministic initial layout
//! - the drag session state machine, including position-driven recolor
//! - ephemeral (not yet persisted) per-view node positions
//!
//! Color sampling lives in `sample`; the data entity in `model`.

mod solver;
mod drag;

pub use solver::{
    auto_place_companions, canvas_from_unit, seed_initial_layout, unit_from_canvas, SolverTuning,
};
pub use drag::EditSession;
