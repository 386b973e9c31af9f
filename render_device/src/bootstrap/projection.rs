/// Projection matrices and viewport
///
/// Pure computation, no driver calls. Matrices use glam's column-vector
/// convention; upload code transposes them for row-major shader constants.

use glam::Mat4;

use crate::config::FIELD_OF_VIEW_Y;
use crate::driver::Viewport;

/// Matrices computed once from the screen geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Left-handed perspective, 45 degree vertical field of view
    pub projection_matrix: Mat4,
    pub world_matrix: Mat4,
    /// Left-handed orthographic sized to the screen in pixels, for 2D
    pub ortho_matrix: Mat4,
}

pub fn compute_projection(width: u32, height: u32, near: f32, far: f32) -> ProjectionState {
    let width = width as f32;
    let height = height as f32;

    ProjectionState {
        projection_matrix: Mat4::perspective_lh(FIELD_OF_VIEW_Y, width / height, near, far),
        world_matrix: Mat4::IDENTITY,
        ortho_matrix: Mat4::orthographic_lh(
            -width / 2.0,
            width / 2.0,
            -height / 2.0,
            height / 2.0,
            near,
            far,
        ),
    }
}

/// Viewport covering the whole render target, depth range 0..1
pub fn build_viewport(width: u32, height: u32) -> Viewport {
    Viewport {
        top_left_x: 0.0,
        top_left_y: 0.0,
        width: width as f32,
        height: height as f32,
        min_depth: 0.0,
        max_depth: 1.0,
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
