//! Three-color barycentric blending.
//!
//! The live preview and the 3-node raster path both express a pixel as a
//! convex combination of three fixed anchor colors. Node counts below 3
//! reuse the same 3-slot machinery by repeating colors, and count changes
//! are faded with per-anchor activation weights instead of popping.

mod barycentric;
mod activation;

pub use barycentric::{barycentric_weights, blend_colors, fill_slots, preview_color, AnchorLayout};
pub use activation::ActivationAnimator;
