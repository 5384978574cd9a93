//! Geometry primitives for the circular editing canvas.
//!
//! Scope:
//! - 2D vectors in unit/logical space
//! - the bounded interaction circle
//!
//! Color types live in `color`.

mod vec2;
mod circle;

pub use vec2::Vec2;
pub use circle::InteractionCircle;
