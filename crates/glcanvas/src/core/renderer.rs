use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::{Context, Result};

use crate::device::{GlContext, InitError, Surface, SurfaceRegistry, SurfaceTarget};
use crate::render::geometry::validate_quad_count;
use crate::render::{QuadRenderer, ShaderDiagnostic, ShaderFailurePolicy};
use crate::runtime::{FrameCallback, FrameScheduler, RedrawPolicy};
use crate::time::FrameClock;

use super::RendererConfig;

/// Lifecycle of a [`SurfaceRenderer`]. Transitions only move forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum RendererState {
    Uninitialized,
    ContextAcquired,
    ResourcesBuilt,
    Initialized,
    Rendering,
}

/// Draws the quad buffer onto one surface from the platform frame callback.
///
/// Construction does all the work: context, buffer, program, pipeline state,
/// and registration of the first frame. The renderer owns its context and GPU
/// objects exclusively; nothing is shared between instances.
///
/// Dropping the renderer disarms any callback still queued with the
/// scheduler. GPU objects are released with the context.
pub struct SurfaceRenderer<C, F>
where
    C: GlContext + 'static,
    F: FrameScheduler + 'static,
{
    shared: Rc<Shared<C, F>>,
}

struct Shared<C: GlContext, F> {
    renderer: QuadRenderer<C>,
    state: Cell<RendererState>,
    clock: RefCell<FrameClock>,
    scheduler: F,
    redraw: RedrawPolicy,

    /// Bound once at construction and re-registered as-is.
    on_frame: FrameCallback,
}

impl<C, F> SurfaceRenderer<C, F>
where
    C: GlContext + 'static,
    F: FrameScheduler + 'static,
{
    /// Resolves `target` (looking ids up in `registry`) and constructs on it.
    pub fn from_target<S, R>(
        target: SurfaceTarget<S>,
        registry: &R,
        scheduler: F,
        config: RendererConfig,
    ) -> Result<Self>
    where
        S: Surface<Context = C>,
        R: SurfaceRegistry<Surface = S> + ?Sized,
    {
        let surface = target.resolve(registry)?;
        Self::new(&surface, scheduler, config)
    }

    /// Acquires a context from `surface`, builds the GPU resources, applies
    /// the pipeline state, and registers the frame callback.
    ///
    /// Fails with [`InitError::InvalidQuadCount`] before touching the surface,
    /// and with [`InitError::ContextUnavailable`] before anything is
    /// allocated when the surface has no context to give. With
    /// [`ShaderFailurePolicy::Abort`], a program that did not build cleanly
    /// fails with [`InitError::ShaderBuild`] before the callback is registered.
    pub fn new<S>(surface: &S, scheduler: F, config: RendererConfig) -> Result<Self>
    where
        S: Surface<Context = C>,
    {
        validate_quad_count(config.quad_count)?;

        let mut state = RendererState::Uninitialized;

        let gl = surface
            .acquire_context(&config.context)
            .ok_or(InitError::ContextUnavailable)?;
        transition(&mut state, RendererState::ContextAcquired);

        let size = surface.size();
        let renderer = QuadRenderer::build(gl, size, &config)?;
        transition(&mut state, RendererState::ResourcesBuilt);

        let program = renderer.program();
        if config.shader_failures == ShaderFailurePolicy::Abort && !program.is_valid() {
            return Err(InitError::ShaderBuild(program.diagnostics.clone()).into());
        }

        renderer.initialize();
        transition(&mut state, RendererState::Initialized);

        let shared = Rc::new_cyclic(|weak: &Weak<Shared<C, F>>| {
            let weak = weak.clone();
            let on_frame: FrameCallback = Rc::new(move |timestamp: f64| {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_frame(timestamp);
                }
            });

            Shared {
                renderer,
                state: Cell::new(state),
                clock: RefCell::new(FrameClock::new()),
                scheduler,
                redraw: config.redraw,
                on_frame,
            }
        });

        shared
            .scheduler
            .request_frame(shared.on_frame.clone())
            .context("failed to register frame callback")?;

        log::info!(
            "surface renderer ready: {}x{}, {} quad(s), redraw {:?}",
            size.0,
            size.1,
            config.quad_count,
            config.redraw
        );

        Ok(Self { shared })
    }

    pub fn state(&self) -> RendererState {
        self.shared.state.get()
    }

    /// Drawing buffer size the renderer was set up for.
    pub fn size(&self) -> (u32, u32) {
        self.shared.renderer.size()
    }

    pub fn vertex_count(&self) -> i32 {
        self.shared.renderer.vertex_count()
    }

    pub fn redraw_policy(&self) -> RedrawPolicy {
        self.shared.redraw
    }

    /// Compile/link problems recorded while building the shader program.
    pub fn shader_diagnostics(&self) -> &[ShaderDiagnostic] {
        &self.shared.renderer.program().diagnostics
    }

    /// Frames drawn so far, from callbacks or [`Self::render_frame`].
    pub fn frames_rendered(&self) -> u64 {
        self.shared.clock.borrow().frames()
    }

    pub fn context(&self) -> &C {
        self.shared.renderer.context()
    }

    /// Draws one frame now, outside the scheduler. Does not request another.
    pub fn render_frame(&self, timestamp: f64) {
        self.shared.draw(timestamp);
    }
}

impl<C, F> Shared<C, F>
where
    C: GlContext,
    F: FrameScheduler,
{
    fn handle_frame(&self, timestamp: f64) {
        if !self.draw(timestamp) {
            return;
        }

        if self.redraw == RedrawPolicy::Continuous {
            if let Err(e) = self.scheduler.request_frame(self.on_frame.clone()) {
                log::error!("failed to schedule next frame: {e:#}");
            }
        }
    }

    fn draw(&self, timestamp: f64) -> bool {
        let current = self.state.get();
        if current < RendererState::Initialized {
            log::warn!("frame requested in state {current:?}; skipped");
            return false;
        }

        let time = self.clock.borrow_mut().tick(timestamp);
        self.renderer.render_frame(&time);

        if current != RendererState::Rendering {
            let mut next = current;
            transition(&mut next, RendererState::Rendering);
            self.state.set(next);
        }
        true
    }
}

fn transition(state: &mut RendererState, next: RendererState) {
    debug_assert!(next >= *state, "renderer state moved backwards");
    log::debug!("renderer state: {:?} -> {:?}", *state, next);
    *state = next;
}
