//! GPU rendering subsystem.
//!
//! Builds the quad vertex buffer and shader program and issues the per-frame
//! clear + draw through a `device::GlContext`.
//!
//! Convention:
//! - geometry is in pixels (top-left origin, +Y down)
//! - the `P_MAT` uniform converts pixels to clip space

pub mod geometry;
pub mod shader;
pub mod transform;

mod quad;

pub use quad::{QuadRenderer, MODEL_UNIFORM, POSITION_ATTRIBUTE, PROJECTION_UNIFORM};
pub use shader::{
    build_program, compile_shader, CompiledShader, DiagnosticKind, ShaderDiagnostic,
    ShaderFailurePolicy, ShaderProgram, QUAD_FRAGMENT_SHADER, QUAD_VERTEX_SHADER,
};
