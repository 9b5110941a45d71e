//! Time subsystem.
//!
//! Converts the timestamps delivered by the frame scheduler into per-frame
//! deltas. One `FrameClock` per renderer; call `tick()` once per frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
