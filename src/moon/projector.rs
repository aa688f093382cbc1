//! Billboard silhouette projector (vertex-stage math).
//!
//! Maps a unit quad's corners into a billboarded, perspective-distorted
//! sphere silhouette facing the camera. A quad plus analytic disc
//! reconstruction is cheaper than true sphere geometry and gives correct
//! silhouette curvature under perspective for free.

use crate::core::types::{Vec2, Vec3};
use crate::math::TangentFrame;

/// The quad is oversized by sqrt(2) so it always fully bounds the
/// projected disc.
pub const QUAD_OVERSIZE: f32 = std::f32::consts::SQRT_2;

/// Eye-space position for a quad-local corner in `[-1, 1]^2`.
///
/// `eye = m - normalize(x*u + y*v) * tan(radius) * sqrt(2)`. The offset
/// vanishes at the quad origin, where the result is exactly the moon
/// direction.
pub fn project_vertex(corner: Vec2, frame: &TangentFrame, angular_radius: f32) -> Vec3 {
    let scale = angular_radius.tan() * QUAD_OVERSIZE;
    let offset = (frame.u * corner.x + frame.v * corner.y).normalize_or_zero();
    frame.m - offset * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_for(m: Vec3) -> TangentFrame {
        TangentFrame::from_direction(m)
    }

    #[test]
    fn test_quad_center_projects_to_moon_direction() {
        let m = Vec3::new(0.001, 0.0, 0.9999995);
        let frame = frame_for(m);
        let eye = project_vertex(Vec2::ZERO, &frame, 0.01);
        assert_eq!(eye, m, "offset term must vanish exactly at the quad origin");
    }

    #[test]
    fn test_corner_offset_magnitude() {
        let m = Vec3::new(0.0, 1.0, 0.0);
        let frame = frame_for(m);
        let radius = 0.01_f32;
        let eye = project_vertex(Vec2::new(1.0, 1.0), &frame, radius);

        let expected = radius.tan() * QUAD_OVERSIZE;
        let offset = (eye - m).length();
        assert!(
            (offset - expected).abs() < 1e-6,
            "corner offset {offset} should be tan(r)*sqrt(2) = {expected}"
        );
    }

    #[test]
    fn test_offset_lies_in_tangent_plane() {
        let m = Vec3::new(0.3, 0.5, 0.8).normalize();
        let frame = frame_for(m);
        let eye = project_vertex(Vec2::new(-1.0, 0.5), &frame, 0.02);
        let offset = eye - m;
        assert!(
            offset.dot(m).abs() < 1e-6,
            "offset should be perpendicular to the moon direction, dot={}",
            offset.dot(m)
        );
    }

    #[test]
    fn test_opposite_corners_are_symmetric() {
        let m = Vec3::new(0.0, 0.8, 0.6);
        let frame = frame_for(m);
        let a = project_vertex(Vec2::new(1.0, 1.0), &frame, 0.01) - m;
        let b = project_vertex(Vec2::new(-1.0, -1.0), &frame, 0.01) - m;
        assert!((a + b).length() < 1e-6, "opposite corners should mirror: {a:?} vs {b:?}");
    }
}
