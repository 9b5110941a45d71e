//! `WebGlCanvas` for JavaScript callers.
//!
//! Build with `wasm-pack build crates/glcanvas-demo --target web` and open
//! `www/index.html` through any static file server.

#![cfg(target_arch = "wasm32")]

use glcanvas::logging::{init_logging, LoggingConfig};
use glcanvas::runtime::{AnimationFrameScheduler, RedrawPolicy};
use glcanvas::{RendererConfig, SurfaceRenderer, SurfaceTarget};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGlRenderingContext};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging(LoggingConfig::default());
}

/// One renderer bound to one canvas. Keep the JS object alive for as long as
/// frames should be drawn.
#[wasm_bindgen]
pub struct WebGlCanvas {
    inner: SurfaceRenderer<WebGlRenderingContext, AnimationFrameScheduler>,
}

#[wasm_bindgen]
impl WebGlCanvas {
    /// `canvas` is either an `HTMLCanvasElement` or the id of one.
    ///
    /// Pass `continuous = true` to redraw on every animation frame instead of
    /// only the first.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: JsValue, continuous: Option<bool>) -> Result<WebGlCanvas, JsError> {
        let target = match canvas.as_string() {
            Some(id) => SurfaceTarget::Id(id),
            None => SurfaceTarget::Surface(
                canvas
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| JsError::new("expected an HTMLCanvasElement or its id"))?,
            ),
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("no document available"))?;
        let scheduler = AnimationFrameScheduler::from_global().map_err(js_error)?;

        let config = RendererConfig {
            redraw: if continuous.unwrap_or(false) {
                RedrawPolicy::Continuous
            } else {
                RedrawPolicy::Once
            },
            ..RendererConfig::default()
        };

        let inner = SurfaceRenderer::from_target(target, &document, scheduler, config)
            .map_err(js_error)?;

        Ok(WebGlCanvas { inner })
    }

    /// Draws immediately, independent of the animation-frame callback.
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self, timestamp: f64) {
        self.inner.render_frame(timestamp);
    }

    #[wasm_bindgen(getter, js_name = framesRendered)]
    pub fn frames_rendered(&self) -> f64 {
        self.inner.frames_rendered() as f64
    }

    /// Compile/link diagnostics, one string per failed step.
    #[wasm_bindgen(getter, js_name = shaderErrors)]
    pub fn shader_errors(&self) -> Vec<String> {
        self.inner
            .shader_diagnostics()
            .iter()
            .map(|d| d.to_string())
            .collect()
    }
}

fn js_error(e: anyhow::Error) -> JsError {
    log::error!("{e:#}");
    JsError::new(&format!("{e:#}"))
}
