//! glcanvas.
//!
//! Draws a fixed buffer of quads onto a WebGL canvas. The crate owns context
//! acquisition, GPU resource setup and the animation-frame hookup; the browser
//! bindings are compiled only for `wasm32`.

pub mod device;
pub mod runtime;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
pub mod render;

#[cfg(test)]
mod testing;

pub use crate::core::{RendererConfig, RendererState, SurfaceRenderer};
pub use crate::device::{ContextOptions, InitError, SurfaceTarget};
pub use crate::render::{ShaderDiagnostic, ShaderFailurePolicy};
pub use crate::runtime::RedrawPolicy;
