use std::fmt;

use crate::paint::Color;

/// Programmable pipeline stage a shader object belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of a WebGL 1 rendering context the renderer talks to.
///
/// Handles are associated types so the browser context and the test context
/// can each use their own object representation. Creation calls return `None`
/// when the platform hands back a null object (typically after context loss).
///
/// Conventions:
/// - the array buffer target is the only buffer target used
/// - matrices are column-major `[f32; 16]` and uploaded without transposition
/// - vertex attributes are always `FLOAT`, non-normalized
pub trait GlContext {
    type Buffer;
    type Shader;
    type Program;
    type UniformLocation;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>);
    /// Uploads `data` to the bound array buffer with static-draw usage.
    fn array_buffer_data_static(&self, data: &[u8]);

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: Option<&Self::Program>);

    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, value: &[f32; 16]);

    /// Returns the attribute index, or `-1` when the program has no such attribute.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: Color);
    fn clear_color_buffer(&self);
    fn draw_triangles(&self, first: i32, count: i32);
}
