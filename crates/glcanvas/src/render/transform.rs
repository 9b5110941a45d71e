use glam::Mat4;

/// Depth range of the screen projection (`near`, `far`).
pub const SCREEN_DEPTH: (f32, f32) = (0.0, -1000.0);

/// Orthographic projection from pixel coordinates to clip space.
///
/// Left edge 0, right edge `width`, top edge 0, bottom edge `height`:
/// `(0, 0)` lands on clip `(-1, 1)` and `(width, height)` on `(1, -1)`.
/// Same column-major matrix `glOrtho` would produce.
pub fn screen_projection(width: u32, height: u32) -> Mat4 {
    let (near, far) = SCREEN_DEPTH;
    Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, near, far)
}

/// Model transform for the quad buffer. Vertices are already in pixels.
pub fn model_transform() -> Mat4 {
    Mat4::IDENTITY
}
