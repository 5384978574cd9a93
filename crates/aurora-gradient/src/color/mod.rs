//! Color model shared between the editor, sampler, and renderers.
//!
//! Scope:
//! - straight-alpha RGBA representation
//! - sRGB ⇄ HSB conversion
//! - `#RRGGBB` / `#AARRGGBB` (alpha-first) hex codec
//!
//! Premultiplication is an internal concern of the blender; public colors
//! are always straight-alpha.

mod rgba;
mod hsb;
mod hex;

pub use rgba::Color;
pub use hsb::Hsb;
pub use hex::HexColorError;
