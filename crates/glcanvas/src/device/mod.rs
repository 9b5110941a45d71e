//! Drawing surface + rendering context.
//!
//! This module is responsible for:
//! - the `GlContext` seam every GPU call goes through
//! - resolving a drawable surface and acquiring its context
//! - fatal construction errors
//!
//! The browser implementations live in `web` and only exist on `wasm32`.

mod error;
mod gl;
mod options;
mod surface;

#[cfg(target_arch = "wasm32")]
mod web;

pub use error::InitError;
pub use gl::{GlContext, ShaderStage};
pub use options::ContextOptions;
pub use surface::{Surface, SurfaceRegistry, SurfaceTarget};
