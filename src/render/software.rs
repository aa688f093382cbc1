//! Software rasterizer for the moon disc.
//!
//! Runs the same vertex projection and fragment shading as the GPU path,
//! pixel by pixel, into an RGBA image. Useful for headless rendering, golden
//! images, and debugging shader math without a device.

use image::{Rgba, RgbaImage};

use crate::core::types::{Vec2, Vec3};
use crate::math::TangentFrame;
use crate::moon::params::MoonFrameParams;
use crate::moon::projector::project_vertex;
use crate::moon::reflectance::{shade, ShadeSample};

/// Render the moon quad into a `width` x `height` image.
///
/// Each pixel maps to quad coordinates in `[-1, 1]^2` (y up). `albedo` looks
/// up the surface color for an oriented sample direction; `below_horizon`
/// is the host's horizon predicate. Shaded pixels are scaled by `exposure`
/// and clamped to 8-bit; discarded pixels come out fully transparent.
pub fn render_moon<A, H>(
    params: &MoonFrameParams,
    width: u32,
    height: u32,
    exposure: f32,
    albedo: A,
    below_horizon: H,
) -> RgbaImage
where
    A: Fn(Vec3) -> Vec3,
    H: Fn(Vec3) -> bool,
{
    let frame = TangentFrame::from_direction(params.moon_direction_refracted);
    let mut out = RgbaImage::new(width, height);

    for (px, py, pixel) in out.enumerate_pixels_mut() {
        let x = (px as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let y = 1.0 - (py as f32 + 0.5) / height as f32 * 2.0;
        let quad_xy = Vec2::new(x, y);

        let eye_pos = project_vertex(quad_xy, &frame, params.apparent_radius);
        let sample = ShadeSample { quad_xy, eye_pos };

        *pixel = match shade(sample, &frame, params, &albedo, &below_horizon) {
            Some(color) => {
                let c = (color * exposure).clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
                Rgba([c.x as u8, c.y as u8, c.z as u8, 255])
            }
            None => Rgba([0, 0, 0, 0]),
        };
    }

    out
}
