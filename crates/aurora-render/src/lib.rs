//! Aurora render crate.
//!
//! This crate owns pixel synthesis and scheduling: the ordered-dithered
//! rasterizer, the bounded render cache, and the background worker that
//! keeps the interactive thread free during continuous edits. The gradient
//! model and blend math live in `aurora-gradient`.

pub mod logging;
pub mod raster;
pub mod cache;
pub mod scheduler;

pub use raster::{Bitmap, RasterParams, Rgba8};
pub use scheduler::{RenderCtx, RenderScheduler};
