use std::fmt;

use anyhow::Result;

use crate::device::{GlContext, InitError, ShaderStage};

/// Bundled vertex stage: `VERTEX`/`COLOR` attributes, `P_MAT`/`M_MAT` uniforms.
pub const QUAD_VERTEX_SHADER: &str = include_str!("shaders/quad.vert");

/// Bundled fragment stage: solid white.
pub const QUAD_FRAGMENT_SHADER: &str = include_str!("shaders/quad.frag");

/// Which step produced a diagnostic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiagnosticKind {
    Compile(ShaderStage),
    Link,
}

/// A failed compile or link step and the driver's info log.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShaderDiagnostic {
    pub kind: DiagnosticKind,
    pub log: String,
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::Compile(stage) => write!(f, "error compiling {stage} shader: ")?,
            DiagnosticKind::Link => f.write_str("error linking shader program: ")?,
        }
        f.write_str(self.log.trim_end())
    }
}

/// What construction does when the shader program did not build cleanly.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ShaderFailurePolicy {
    /// Log the diagnostics and keep going with the broken program.
    #[default]
    Continue,
    /// Fail construction with [`InitError::ShaderBuild`].
    Abort,
}

/// Result of compiling one stage.
///
/// The shader object is returned even when compilation failed; the driver
/// keeps it around and linking will report the failure again.
pub struct CompiledShader<S> {
    pub stage: ShaderStage,
    pub handle: S,
    pub diagnostic: Option<ShaderDiagnostic>,
}

/// A linked (or failed-to-link) program plus everything that went wrong
/// while building it.
pub struct ShaderProgram<P> {
    pub handle: P,
    pub diagnostics: Vec<ShaderDiagnostic>,
}

impl<P> ShaderProgram<P> {
    /// `true` when every attached stage compiled and the program linked.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn compile_failures(&self, stage: ShaderStage) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Compile(stage))
            .count()
    }
}

/// Compiles a single stage.
///
/// Returns `None` only when the context could not create a shader object;
/// compile errors are logged and reported through `diagnostic`.
pub fn compile_shader<C: GlContext>(
    gl: &C,
    stage: ShaderStage,
    source: &str,
) -> Option<CompiledShader<C::Shader>> {
    let Some(handle) = gl.create_shader(stage) else {
        log::error!("failed to create {stage} shader object");
        return None;
    };

    gl.shader_source(&handle, source);
    gl.compile_shader(&handle);

    let diagnostic = if gl.shader_compile_status(&handle) {
        None
    } else {
        let d = ShaderDiagnostic {
            kind: DiagnosticKind::Compile(stage),
            log: gl.shader_info_log(&handle).unwrap_or_default(),
        };
        log::error!("{d}");
        Some(d)
    };

    Some(CompiledShader {
        stage,
        handle,
        diagnostic,
    })
}

/// Compiles the given stages, attaches those that produced a shader object,
/// and links.
///
/// Either source may be `None`; that stage is simply not attached. Link
/// failures are logged and collected like compile failures. The only hard
/// error is a context that cannot create a program object at all.
pub fn build_program<C: GlContext>(
    gl: &C,
    vertex_source: Option<&str>,
    fragment_source: Option<&str>,
) -> Result<ShaderProgram<C::Program>> {
    let program = gl
        .create_program()
        .ok_or(InitError::ResourceAllocation("shader program"))?;

    let mut diagnostics = Vec::new();

    let stages = [
        (ShaderStage::Vertex, vertex_source),
        (ShaderStage::Fragment, fragment_source),
    ];

    for (stage, source) in stages {
        let Some(source) = source else { continue };
        let Some(compiled) = compile_shader(gl, stage, source) else { continue };

        gl.attach_shader(&program, &compiled.handle);
        diagnostics.extend(compiled.diagnostic);
    }

    gl.link_program(&program);

    if !gl.program_link_status(&program) {
        let d = ShaderDiagnostic {
            kind: DiagnosticKind::Link,
            log: gl.program_info_log(&program).unwrap_or_default(),
        };
        log::error!("{d}");
        diagnostics.push(d);
    } else {
        log::debug!("shader program linked");
    }

    Ok(ShaderProgram {
        handle: program,
        diagnostics,
    })
}
