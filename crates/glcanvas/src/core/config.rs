use std::borrow::Cow;

use crate::device::ContextOptions;
use crate::paint::Color;
use crate::render::geometry::DEFAULT_QUAD_SIZE;
use crate::render::{ShaderFailurePolicy, QUAD_FRAGMENT_SHADER, QUAD_VERTEX_SHADER};
use crate::runtime::RedrawPolicy;

/// Renderer construction parameters.
///
/// `Default` reproduces the stock behavior: one 100px white quad on black,
/// drawn on the first animation frame only.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Attributes requested when acquiring the WebGL context.
    pub context: ContextOptions,

    /// Number of quads in the vertex buffer, in `1..=MAX_QUAD_COUNT`.
    pub quad_count: u32,

    /// Edge length of each quad, in pixels.
    pub quad_size: f32,

    /// Color the drawing buffer is cleared to before each draw.
    pub clear_color: Color,

    /// Whether each frame re-registers the frame callback.
    pub redraw: RedrawPolicy,

    /// What to do when the shader program does not build cleanly.
    pub shader_failures: ShaderFailurePolicy,

    /// Vertex stage source. `None` leaves the stage unattached.
    pub vertex_shader: Option<Cow<'static, str>>,

    /// Fragment stage source. `None` leaves the stage unattached.
    pub fragment_shader: Option<Cow<'static, str>>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            context: ContextOptions::default(),
            quad_count: 1,
            quad_size: DEFAULT_QUAD_SIZE,
            clear_color: Color::BLACK,
            redraw: RedrawPolicy::Once,
            shader_failures: ShaderFailurePolicy::Continue,
            vertex_shader: Some(Cow::Borrowed(QUAD_VERTEX_SHADER)),
            fragment_shader: Some(Cow::Borrowed(QUAD_FRAGMENT_SHADER)),
        }
    }
}
