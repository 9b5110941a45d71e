use anyhow::{anyhow, Context, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::{FrameCallback, FrameScheduler};

/// `window.requestAnimationFrame` backed scheduler.
#[derive(Debug, Clone)]
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Scheduler for the global `window`.
    pub fn from_global() -> Result<Self> {
        web_sys::window()
            .map(Self::new)
            .context("no global `window` (not running on the main thread?)")
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        // One-shot: the JS function frees the Rust closure after it runs.
        let f = Closure::once_into_js(move |timestamp: f64| callback(timestamp));

        self.window
            .request_animation_frame(f.unchecked_ref())
            .map(|_handle| ())
            .map_err(|e| anyhow!("requestAnimationFrame failed: {e:?}"))
    }
}
