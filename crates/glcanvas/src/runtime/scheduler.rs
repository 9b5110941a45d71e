use std::rc::Rc;

use anyhow::Result;

/// Callback invoked by the scheduler with the platform timestamp in ms.
///
/// Reference counted so the same bound callback can be handed to the
/// scheduler again for every frame.
pub type FrameCallback = Rc<dyn Fn(f64)>;

/// Platform per-frame hook ("call me once before the next repaint").
pub trait FrameScheduler {
    /// Registers `callback` to run once before the next repaint.
    fn request_frame(&self, callback: FrameCallback) -> Result<()>;
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        (**self).request_frame(callback)
    }
}

/// Whether a frame asks for the next one.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RedrawPolicy {
    /// Draw on the first callback only. The preserved drawing buffer keeps
    /// that frame on screen.
    #[default]
    Once,
    /// Re-register after every frame, at the platform's cadence.
    Continuous,
}
