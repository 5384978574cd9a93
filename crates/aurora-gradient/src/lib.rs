//! Aurora gradient crate.
//!
//! This crate owns the data and math layers of the background gradient
//! system: the 1–3 stop gradient model, circular-canvas color sampling,
//! companion auto-placement, and the barycentric color blend used by the
//! live preview. Pixel synthesis and scheduling live in `aurora-render`.

pub mod coords;
pub mod color;
pub mod model;
pub mod editor;
pub mod sample;
pub mod blend;
