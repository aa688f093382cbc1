//! Hapke-Lommel-Seeliger reflectance and lunar-eclipse darkening
//! (fragment-stage math).
//!
//! Reconstructs the unit-sphere surface point from quad coordinates,
//! evaluates an analytic approximation of how regolith scatters light
//! (retrodirective opposition brightening plus general scattering), blends
//! sunlit and earthshine contributions, and darkens the result with a
//! distance-based eclipse shadow-band approximation. Mirrored exactly by
//! `shaders/moon.wgsl`.

use std::f32::consts::PI;

use crate::core::types::{Vec2, Vec3, Vec4};
use crate::math::TangentFrame;
use crate::moon::params::MoonFrameParams;

/// Drawn disc radius in quad space; the band between `DISC_RADIUS` and 1 is
/// left for the anti-aliased border.
pub const DISC_RADIUS: f32 = 0.98;

/// Surface density parameter: sharpness of the opposition peak at full moon.
const HLS_G: f32 = 0.6;
/// Small amount of forward scattering.
const HLS_T: f32 = 0.1;

const TWO_OVER_THREEPI: f32 = 0.212_206_6;

// Earth shadow geometry in a unit-sphere scene whose unit diameter is double
// the earth-moon distance. Empirically tuned, no physical derivation.
pub const ECLIPSE_E0: f32 = 0.004_519_002_4;
pub const ECLIPSE_E1: f32 = 4.65 * ECLIPSE_E0;
pub const ECLIPSE_E2: f32 = 2.65 * ECLIPSE_E0;

/// Clamped-Hermite step. Well defined for reversed edges (`edge0 > edge1`),
/// which the eclipse bands rely on; GLSL leaves that case undefined.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Squared height of the sphere surface above the quad plane at `(x, y)`,
/// or `None` when the point lies outside the drawn disc.
pub fn disc_height_sq(x: f32, y: f32) -> Option<f32> {
    let zz = DISC_RADIUS * DISC_RADIUS - x * x - y * y;
    if zz < 1.0 - DISC_RADIUS { None } else { Some(zz) }
}

/// Planar horizon predicate (+Z zenith); hosts with curved-planet horizons
/// pass their own.
#[inline]
pub fn planar_below_horizon(eye: Vec3) -> bool {
    eye.z < 0.0
}

/// Hapke-Lommel-Seeliger approximation of the moon's reflectance.
///
/// `eye` and `sun` are unit directions from the observer; `normal` is the
/// sphere-surface normal in moon tangent space. Under this sign convention
/// the surface faces the sun when `dot(normal, sun) < 0`; the value is 0
/// otherwise (which also guards the `dot_nl == 0` division).
pub fn reflectance(eye: Vec3, sun: Vec3, normal: Vec3) -> f32 {
    let cos_p = eye.dot(sun).clamp(0.0, 1.0);
    let p = cos_p.acos();
    let tan_p = p.tan();

    let dot_ne = normal.dot(eye);
    let dot_nl = normal.dot(sun);

    if dot_nl >= 0.0 {
        return 0.0;
    }

    // Retrodirective term. Well behaved at both limits under IEEE floats:
    // tan(0) gives exp(-inf) = 0 and the term tends to 2; past the clamped
    // p = pi/2 the tangent blows up and the term tends to 1 from either side.
    let retro = 2.0
        - tan_p / (2.0 * HLS_G)
            * (1.0 - (-HLS_G / tan_p).exp())
            * (3.0 - (-HLS_G / tan_p).exp());

    let scatter = (p.sin() + (PI - p) * cos_p) / PI + HLS_T * (1.0 - cos_p) * (1.0 - cos_p);

    TWO_OVER_THREEPI * retro * scatter / (1.0 + (-dot_ne) / dot_nl)
}

/// Eclipse darkening multiplier for a surface normal, moon direction, and
/// sun direction. `(1, 1, 1)` outside the penumbra band.
///
/// Not a shadow-volume test: the distance between the shadow axis and the
/// surface point (scaled into the unit-sphere scene) selects smoothstep
/// darkening bands, with a brightness recovery near the umbra edge driven by
/// the undisplaced moon-center distance.
pub fn eclipse_multiplier(normal: Vec3, moon_direction: Vec3, sun: Vec3) -> Vec3 {
    // Surface point scaled to moon size in the unit-sphere scene.
    let a = normal * ECLIPSE_E0 - moon_direction;
    let d = a.cross(sun).length();

    if d >= ECLIPSE_E1 {
        return Vec3::ONE;
    }

    let le0 = 0.600 * Vec3::new(1.0, 1.0, 1.0);
    let le1 = 1.800 * Vec3::new(1.0, 1.0, 1.0);
    let le2 = 0.077 * Vec3::new(0.5, 0.8, 1.0);
    let le3 = 0.050 * Vec3::new(0.3, 0.4, 0.9);

    let s2 = 0.08;

    let mut le = Vec3::ONE
        - le0 * smoothstep(ECLIPSE_E1, ECLIPSE_E2, d).min(1.0)
        - le1 * smoothstep(ECLIPSE_E2 * (1.0 + s2), ECLIPSE_E2 * (1.0 - s2), d).min(0.2);

    // Brightness recovery from the mean (undisplaced) center distance.
    let a2 = moon_direction * ECLIPSE_E0 - moon_direction;
    let d2 = a2.cross(sun).length();

    let r_x = (1.825 - 0.5 * d2 / ECLIPSE_E0) / 1.825;
    let mut b = 1.0;

    if r_x > 0.0 {
        b = 1.0 + 28.0 * (3.0 * r_x * r_x - 2.0 * r_x * r_x * r_x);

        if d < ECLIPSE_E2 * 2.0 {
            le -= le2 * (1.0 - d / ECLIPSE_E2).clamp(0.0, 1.0);
            le += le3 * smoothstep(ECLIPSE_E2 * (1.0 - s2 * 2.0), ECLIPSE_E2 * (1.0 + s2), d);
        }
    }

    le * b
}

/// One interpolated fragment input.
#[derive(Clone, Copy, Debug)]
pub struct ShadeSample {
    /// Quad-local coordinate, `[-1, 1]^2`.
    pub quad_xy: Vec2,
    /// Interpolated eye-space position.
    pub eye_pos: Vec3,
}

/// Full per-pixel shade: disc membership, horizon test, normal
/// reconstruction, reflectance, albedo lookup, earthshine blend, and
/// eclipse darkening. `None` means the pixel is discarded (no contribution).
pub fn shade<A, H>(
    sample: ShadeSample,
    frame: &TangentFrame,
    params: &MoonFrameParams,
    albedo: A,
    below_horizon: H,
) -> Option<Vec3>
where
    A: Fn(Vec3) -> Vec3,
    H: Fn(Vec3) -> bool,
{
    let (x, y) = (sample.quad_xy.x, sample.quad_xy.y);
    let zz = disc_height_sq(x, y)?;

    let eye = sample.eye_pos.normalize();
    if below_horizon(eye) {
        return None;
    }

    let z = zz.sqrt();
    let mn = frame.transform(x, y, z);

    let f = reflectance(eye, params.sun_direction, mn);

    // Row-vector multiply (v * R), matching the shader's orientation lookup.
    let stu = (params.orientation.transpose() * Vec4::new(x, y, z, 1.0)).truncate();
    let c = albedo(stu);

    let mut diffuse = params.earth_shine + params.sun_shine_color * params.sun_shine_intensity * f;
    diffuse *= c;
    diffuse = diffuse.max(Vec3::ZERO);

    // Deep in the umbra the tuned band weights can push channels negative;
    // the original relied on the fixed-point framebuffer clamp.
    let le = eclipse_multiplier(mn, params.moon_direction, params.sun_direction);
    Some((le * diffuse).max(Vec3::ZERO))
}
