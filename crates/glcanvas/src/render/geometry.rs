use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use crate::device::{GlContext, InitError};

/// One 2D position, fed to the `VERTEX` attribute.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    /// Components per vertex, as passed to `vertexAttribPointer`.
    pub const COMPONENTS: i32 = 2;
}

/// Vertices per quad (two triangles, no index buffer).
pub const VERTICES_PER_QUAD: usize = 6;

/// Largest quad count whose vertex count still fits a draw call's `i32`.
pub const MAX_QUAD_COUNT: u32 = (i32::MAX as usize / VERTICES_PER_QUAD) as u32;

/// Edge length applied to the unit-square template.
pub const DEFAULT_QUAD_SIZE: f32 = 100.0;

/// Unit square as two triangles, in screen orientation (+Y down).
pub const QUAD_TEMPLATE: [QuadVertex; VERTICES_PER_QUAD] = [
    QuadVertex { pos: [0.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [0.0, 1.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [0.0, 0.0] },
];

/// Expands `count` copies of the template, scaled by `size`.
///
/// All copies overlap at the origin; there is no per-quad placement.
pub fn quad_vertices(count: u32, size: f32) -> Vec<QuadVertex> {
    QUAD_TEMPLATE
        .iter()
        .map(|v| QuadVertex {
            pos: [v.pos[0] * size, v.pos[1] * size],
        })
        .cycle()
        .take(count as usize * VERTICES_PER_QUAD)
        .collect()
}

/// Rejects counts that would draw nothing or overflow the draw count.
pub fn validate_quad_count(count: u32) -> Result<(), InitError> {
    if (1..=MAX_QUAD_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(InitError::InvalidQuadCount(count))
    }
}

/// Static vertex buffer on the GPU plus the vertex count needed to draw it.
pub struct QuadGeometry<B> {
    pub buffer: B,
    pub vertex_count: i32,
}

/// Uploads `count` quads into a new static array buffer.
///
/// The buffer is left bound to the array buffer target.
pub fn upload_quads<C: GlContext>(
    gl: &C,
    count: u32,
    size: f32,
) -> Result<QuadGeometry<C::Buffer>> {
    validate_quad_count(count)?;
    let vertices = quad_vertices(count, size);
    let vertex_count =
        i32::try_from(vertices.len()).map_err(|_| InitError::InvalidQuadCount(count))?;

    let buffer = gl
        .create_buffer()
        .ok_or(InitError::ResourceAllocation("vertex buffer"))?;

    gl.bind_array_buffer(Some(&buffer));
    gl.array_buffer_data_static(bytemuck::cast_slice(&vertices));

    log::debug!("uploaded {count} quad(s), {vertex_count} vertices");

    Ok(QuadGeometry {
        buffer,
        vertex_count,
    })
}
