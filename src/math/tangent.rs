//! Tangent-frame construction around a unit direction

use crate::core::types::Vec3;

/// Squared-length threshold below which the +Z cross product is considered
/// degenerate.
const POLE_EPSILON: f32 = 1e-12;

/// Orthonormal basis `(u, v, m)` aligned to a unit direction `m`.
///
/// Used to map 2D quad offsets into 3D sphere-surface offsets. The frame is
/// right-handed: `cross(u, v) == m`.
#[derive(Clone, Copy, Debug)]
pub struct TangentFrame {
    pub u: Vec3,
    pub v: Vec3,
    pub m: Vec3,
}

impl TangentFrame {
    /// Build the tangent space of the unit sphere at direction `m`.
    ///
    /// `u = normalize(cross(+Z, m))`, `v = normalize(cross(m, u))`. When `m`
    /// is within epsilon of the zenith the cross product degenerates; the
    /// frame falls back to the x axis so callers never see NaN.
    pub fn from_direction(m: Vec3) -> Self {
        let mut u = Vec3::Z.cross(m);
        if u.length_squared() < POLE_EPSILON {
            u = Vec3::X;
        } else {
            u = u.normalize();
        }
        let v = m.cross(u).normalize();
        Self { u, v, m }
    }

    /// Map quad-local `(x, y)` plus sphere height `z` into world space.
    #[inline]
    pub fn transform(&self, x: f32, y: f32, z: f32) -> Vec3 {
        self.u * x + self.v * y + self.m * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(frame: &TangentFrame, m: Vec3) {
        assert!(
            (frame.u.length() - 1.0).abs() < 1e-5,
            "u not unit for m={m:?}: |u|={}",
            frame.u.length()
        );
        assert!(
            (frame.v.length() - 1.0).abs() < 1e-5,
            "v not unit for m={m:?}: |v|={}",
            frame.v.length()
        );
        assert!(
            frame.u.dot(frame.v).abs() < 1e-5,
            "u not perpendicular to v for m={m:?}: dot={}",
            frame.u.dot(frame.v)
        );
        let handed = frame.u.cross(frame.v);
        assert!(
            (handed - m).length() < 1e-4,
            "frame not right-handed for m={m:?}: cross(u,v)={handed:?}"
        );
    }

    #[test]
    fn test_frame_orthonormal_over_sphere() {
        for i in 0..16 {
            for j in 1..8 {
                let azimuth = i as f32 / 16.0 * std::f32::consts::TAU;
                let polar = j as f32 / 8.0 * std::f32::consts::PI;
                let m = Vec3::new(
                    polar.sin() * azimuth.cos(),
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                );
                let frame = TangentFrame::from_direction(m);
                assert_orthonormal(&frame, m);
            }
        }
    }

    #[test]
    fn test_degenerate_zenith_falls_back() {
        for m in [Vec3::Z, Vec3::NEG_Z] {
            let frame = TangentFrame::from_direction(m);
            assert!(!frame.u.is_nan() && !frame.v.is_nan(), "NaN frame for m={m:?}");
            assert_orthonormal(&frame, m);
            assert_eq!(frame.u, Vec3::X);
        }
    }

    #[test]
    fn test_transform_maps_basis() {
        let m = Vec3::new(0.0, 1.0, 0.0);
        let frame = TangentFrame::from_direction(m);
        let p = frame.transform(0.0, 0.0, 1.0);
        assert!((p - m).length() < 1e-6, "z axis should map to m, got {p:?}");
    }
}
