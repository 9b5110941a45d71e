/// Context creation attributes passed to `getContext("webgl", ..)`.
///
/// The defaults request every buffer the renderer could use and keep the
/// drawing buffer alive between frames, so a single rendered frame stays
/// visible.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ContextOptions {
    /// Drawing buffer has an alpha channel.
    pub alpha: bool,

    /// Drawing buffer has a depth buffer of at least 16 bits.
    pub depth: bool,

    /// Drawing buffer has a stencil buffer of at least 8 bits.
    pub stencil: bool,

    /// Low-latency hint; lets the browser skip compositor synchronization.
    pub desynchronized: bool,

    /// Request multisample antialiasing when available.
    pub antialias: bool,

    /// Keep drawing buffer contents until cleared or overwritten.
    pub preserve_drawing_buffer: bool,
}

impl ContextOptions {
    /// Attribute names and values as the browser expects them.
    pub fn attributes(&self) -> [(&'static str, bool); 6] {
        [
            ("alpha", self.alpha),
            ("depth", self.depth),
            ("stencil", self.stencil),
            ("desynchronized", self.desynchronized),
            ("antialias", self.antialias),
            ("preserveDrawingBuffer", self.preserve_drawing_buffer),
        ]
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            depth: true,
            stencil: true,
            desynchronized: true,
            antialias: true,
            preserve_drawing_buffer: true,
        }
    }
}
