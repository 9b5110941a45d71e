//! Renderer entry point.
//!
//! `SurfaceRenderer` ties the pieces together: it resolves the surface,
//! acquires the context, builds the quad renderer and hooks the frame
//! callback into the scheduler.

mod config;
mod renderer;

pub use config::RendererConfig;
pub use renderer::{RendererState, SurfaceRenderer};
