use anyhow::Result;

use super::{ContextOptions, GlContext, InitError};

/// A drawable target that can hand out a rendering context.
pub trait Surface {
    type Context: GlContext;

    /// Drawing buffer size in physical pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Requests a rendering context with the given attributes.
    ///
    /// Returns `None` when the platform cannot provide one.
    fn acquire_context(&self, options: &ContextOptions) -> Option<Self::Context>;
}

/// Looks up surfaces by identifier (the browser document, by element id).
pub trait SurfaceRegistry {
    type Surface: Surface;

    fn surface_by_id(&self, id: &str) -> Option<Self::Surface>;
}

/// What the renderer should draw into: a surface directly, or an id to look up.
#[derive(Debug, Clone)]
pub enum SurfaceTarget<S> {
    Surface(S),
    Id(String),
}

impl<S> SurfaceTarget<S> {
    pub fn id(id: impl Into<String>) -> Self {
        SurfaceTarget::Id(id.into())
    }

    /// Resolves the target to a concrete surface.
    ///
    /// Ids that do not name a usable surface yield [`InitError::SurfaceNotFound`].
    pub fn resolve<R>(self, registry: &R) -> Result<S>
    where
        R: SurfaceRegistry<Surface = S> + ?Sized,
    {
        match self {
            SurfaceTarget::Surface(s) => Ok(s),
            SurfaceTarget::Id(id) => match registry.surface_by_id(&id) {
                Some(s) => Ok(s),
                None => Err(InitError::SurfaceNotFound(id).into()),
            },
        }
    }
}

impl<S> From<S> for SurfaceTarget<S>
where
    S: Surface,
{
    fn from(surface: S) -> Self {
        SurfaceTarget::Surface(surface)
    }
}
