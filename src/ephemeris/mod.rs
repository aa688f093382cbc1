//! Ephemeris provider interface.
//!
//! The moon node consumes astronomy as an opaque provider: direction and
//! apparent size of the moon, its orientation matrix, the earthshine base
//! intensity, and the sun direction. Hosts with a real astronomy library
//! implement [`Ephemeris`] themselves; [`ClockEphemeris`] is a self-contained
//! analytic approximation, [`FixedEphemeris`] holds explicit values.

pub mod clock;

pub use clock::{ClockConfig, ClockEphemeris};

use crate::core::types::{Mat4, Vec3};

/// Source of per-frame astronomy inputs.
pub trait Ephemeris {
    /// Unit direction toward the moon plus its apparent angular radius in
    /// radians. `refracted` selects the refraction-corrected direction.
    fn moon_position(&self, refracted: bool) -> (Vec3, f32);

    /// Rotation applied to cube-map lookups so the correct face points at
    /// the observer (optical librations).
    fn moon_orientation(&self) -> Mat4;

    /// Earthshine base intensity for the current sun-earth-moon geometry.
    fn earth_shine_intensity(&self) -> f32;

    /// Unit direction toward the sun.
    fn sun_direction(&self) -> Vec3;
}

/// Ephemeris with explicit values; for tests and hosts that update the
/// fields from their own astronomy.
#[derive(Clone, Copy, Debug)]
pub struct FixedEphemeris {
    pub moon_direction: Vec3,
    pub moon_direction_refracted: Vec3,
    /// Apparent angular radius, radians.
    pub angular_radius: f32,
    pub orientation: Mat4,
    pub earth_shine_intensity: f32,
    pub sun_direction: Vec3,
}

impl Default for FixedEphemeris {
    fn default() -> Self {
        Self {
            moon_direction: Vec3::Z,
            moon_direction_refracted: Vec3::Z,
            angular_radius: clock::MEAN_ANGULAR_RADIUS,
            orientation: Mat4::IDENTITY,
            earth_shine_intensity: 0.0,
            sun_direction: Vec3::NEG_Z,
        }
    }
}

impl Ephemeris for FixedEphemeris {
    fn moon_position(&self, refracted: bool) -> (Vec3, f32) {
        if refracted {
            (self.moon_direction_refracted, self.angular_radius)
        } else {
            (self.moon_direction, self.angular_radius)
        }
    }

    fn moon_orientation(&self) -> Mat4 {
        self.orientation
    }

    fn earth_shine_intensity(&self) -> f32 {
        self.earth_shine_intensity
    }

    fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }
}
