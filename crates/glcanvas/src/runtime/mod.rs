//! Frame scheduling.
//!
//! The renderer never loops on its own. It registers a callback with a
//! `FrameScheduler` and the platform decides when that callback runs.

mod scheduler;

#[cfg(target_arch = "wasm32")]
mod web;

pub use scheduler::{FrameCallback, FrameScheduler, RedrawPolicy};

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;
