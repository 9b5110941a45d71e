use std::fmt;

use crate::render::ShaderDiagnostic;

/// Fatal renderer construction failure.
///
/// Returned wrapped in `anyhow::Error`; use `downcast_ref::<InitError>()` to
/// inspect the cause.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// No drawable surface is registered under the given id.
    SurfaceNotFound(String),

    /// `quad_count` is zero or too large to draw in one call.
    InvalidQuadCount(u32),

    /// The surface refused to hand out a WebGL context.
    ContextUnavailable,

    /// The context returned a null object for the named resource.
    ResourceAllocation(&'static str),

    /// Shader compilation or linking failed and the caller asked to abort.
    ShaderBuild(Vec<ShaderDiagnostic>),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::SurfaceNotFound(id) => write!(f, "no canvas element with id `{id}`"),
            InitError::InvalidQuadCount(n) => write!(
                f,
                "quad count {n} is outside 1..={}",
                crate::render::geometry::MAX_QUAD_COUNT
            ),
            InitError::ContextUnavailable => f.write_str(
                "unable to initialize WebGL, your browser or machine may not support it",
            ),
            InitError::ResourceAllocation(what) => write!(f, "failed to allocate {what}"),
            InitError::ShaderBuild(diags) => {
                write!(f, "shader program build failed with {} diagnostic(s)", diags.len())?;
                for d in diags {
                    write!(f, "; {d}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for InitError {}
