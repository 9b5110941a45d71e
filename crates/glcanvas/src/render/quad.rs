use anyhow::{Context, Result};

use crate::core::RendererConfig;
use crate::device::GlContext;
use crate::paint::Color;
use crate::time::FrameTime;

use super::geometry::{upload_quads, QuadGeometry, QuadVertex};
use super::shader::{build_program, ShaderProgram};
use super::transform::{model_transform, screen_projection};

/// Projection uniform name in the vertex stage.
pub const PROJECTION_UNIFORM: &str = "P_MAT";
/// Model uniform name in the vertex stage.
pub const MODEL_UNIFORM: &str = "M_MAT";
/// Position attribute name in the vertex stage.
pub const POSITION_ATTRIBUTE: &str = "VERTEX";

/// Solid quad renderer.
///
/// Owns the context plus the one vertex buffer and one program it draws
/// with. Geometry is in pixels with a top-left origin; the projection uniform
/// does the conversion to clip space.
pub struct QuadRenderer<C: GlContext> {
    gl: C,
    geometry: QuadGeometry<C::Buffer>,
    program: ShaderProgram<C::Program>,
    width: u32,
    height: u32,
    clear_color: Color,
}

impl<C: GlContext> QuadRenderer<C> {
    /// Uploads the quad buffer and builds the shader program.
    ///
    /// Shader problems do not fail this call; inspect [`Self::program`].
    pub fn build(gl: C, (width, height): (u32, u32), config: &RendererConfig) -> Result<Self> {
        let geometry = upload_quads(&gl, config.quad_count, config.quad_size)
            .context("failed to build quad geometry")?;

        let program = build_program(
            &gl,
            config.vertex_shader.as_deref(),
            config.fragment_shader.as_deref(),
        )
        .context("failed to build shader program")?;

        Ok(Self {
            gl,
            geometry,
            program,
            width,
            height,
            clear_color: config.clear_color,
        })
    }

    pub fn program(&self) -> &ShaderProgram<C::Program> {
        &self.program
    }

    pub fn vertex_count(&self) -> i32 {
        self.geometry.vertex_count
    }

    /// Drawing buffer size the viewport and projection were built for.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn context(&self) -> &C {
        &self.gl
    }

    /// One-time pipeline state: viewport, program, uniforms, vertex layout.
    ///
    /// None of this state changes afterwards, so frames only clear and draw.
    pub fn initialize(&self) {
        let gl = &self.gl;
        let program = &self.program.handle;

        gl.viewport(0, 0, self.width as i32, self.height as i32);
        gl.use_program(Some(program));

        let projection = screen_projection(self.width, self.height);
        let p_mat = gl.uniform_location(program, PROJECTION_UNIFORM);
        gl.uniform_matrix4(p_mat.as_ref(), &projection.to_cols_array());

        let m_mat = gl.uniform_location(program, MODEL_UNIFORM);
        gl.uniform_matrix4(m_mat.as_ref(), &model_transform().to_cols_array());

        gl.bind_array_buffer(Some(&self.geometry.buffer));

        match u32::try_from(gl.attrib_location(program, POSITION_ATTRIBUTE)) {
            Ok(index) => {
                gl.enable_vertex_attrib_array(index);
                gl.vertex_attrib_pointer_f32(index, QuadVertex::COMPONENTS, 0, 0);
            }
            Err(_) => {
                log::warn!("program has no active `{POSITION_ATTRIBUTE}` attribute; nothing will be drawn");
            }
        }

        log::debug!(
            "quad renderer initialized: viewport {}x{}, {} vertices",
            self.width,
            self.height,
            self.geometry.vertex_count
        );
    }

    /// Clears to the configured color and draws every vertex as a triangle list.
    pub fn render_frame(&self, time: &FrameTime) {
        log::trace!("frame {} (dt {:.4}s)", time.frame_index, time.dt);

        self.gl.clear_color(self.clear_color);
        self.gl.clear_color_buffer();
        self.gl.draw_triangles(0, self.geometry.vertex_count);
    }
}
