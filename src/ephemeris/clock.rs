//! Analytic clock-driven ephemeris.
//!
//! An hour/day approximation, not an orbital model: the sun traces a
//! sinusoidal arc peaking at noon, the moon an opposite arc peaking at
//! midnight, with a slow monthly drift from the orbital period. Good enough
//! to drive the moon node stand-alone; hosts wanting real astronomy
//! implement [`Ephemeris`](super::Ephemeris) over their own library.

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat4, Vec3};
use crate::ephemeris::Ephemeris;

/// Mean apparent angular radius of the moon, radians (~15.5 arcmin).
pub const MEAN_ANGULAR_RADIUS: f32 = 0.0045;

/// Peak earthshine intensity, reached at new moon.
const EARTH_SHINE_PEAK: f32 = 0.1;

/// Configuration for [`ClockEphemeris`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Current hour, `[0, 24)`.
    pub hour: f32,
    /// Elapsed day count, drives phase and orbital drift.
    pub day: u32,
    /// Synodic period in days.
    pub orbit_period_days: f32,
    /// Day offset into the cycle at day 0. The default puts day 0 at full moon.
    pub phase_offset: f32,
    /// Orbit-plane inclination, degrees.
    pub orbit_inclination: f32,
    /// Apparent angular radius, radians.
    pub angular_radius: f32,
    /// Altitude lift applied to the refracted direction at the horizon,
    /// radians (~34 arcmin of standard atmospheric refraction).
    pub refraction_lift: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            hour: 0.0,
            day: 0,
            orbit_period_days: 29.5,
            phase_offset: 14.75,
            orbit_inclination: 5.14,
            angular_radius: MEAN_ANGULAR_RADIUS,
            refraction_lift: 0.0099,
        }
    }
}

/// Ephemeris driven by a simple day/hour clock.
#[derive(Clone, Debug, Default)]
pub struct ClockEphemeris {
    config: ClockConfig,
}

impl ClockEphemeris {
    pub fn new(config: ClockConfig) -> Self {
        Self { config }
    }

    /// Set the clock; hour wraps into the next day.
    pub fn set_time(&mut self, hour: f32, day: u32) {
        self.config.hour = hour.rem_euclid(24.0);
        self.config.day = day + (hour / 24.0).floor().max(0.0) as u32;
    }

    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Moon phase fraction: 0 = new, 0.5 = full, 1 = new again.
    pub fn phase_fraction(&self) -> f32 {
        ((self.config.day as f32 + self.config.phase_offset) / self.config.orbit_period_days)
            .fract()
    }

    /// Fraction of the disc that is sunlit, from the phase.
    pub fn illuminated_fraction(&self) -> f32 {
        (1.0 - (self.phase_fraction() * std::f32::consts::TAU).cos()) * 0.5
    }
}

/// Moon direction for a given hour and day (z-up).
///
/// The moon traces an arc opposite the sun: rises at ~18:00, peaks at
/// midnight, sets at ~6:00. The orbital period drifts the rise/set times
/// slowly over the month, and inclination tilts the orbit plane slightly.
pub fn moon_direction(hour: f32, day: u32, config: &ClockConfig) -> Vec3 {
    let hour_angle = hour * 15.0_f32.to_radians();
    let day_angle = (hour - 18.0) * std::f32::consts::PI / 12.0;
    let altitude = (day_angle.sin() * 80.0_f32).to_radians(); // max 80 degrees

    let orbit_fraction = (day as f32 + config.phase_offset) / config.orbit_period_days;
    let incl = config.orbit_inclination.to_radians();
    let orbit_tilt = (orbit_fraction * std::f32::consts::TAU).sin() * incl;

    Vec3::new(
        hour_angle.sin() * altitude.cos(),
        hour_angle.cos() * altitude.cos(),
        altitude.sin() + orbit_tilt.sin() * 0.1,
    )
    .normalize()
}

/// Sun direction for a given hour (z-up): rises at 6:00, peaks at noon,
/// sets at 18:00, below the horizon at night.
pub fn sun_direction(hour: f32) -> Vec3 {
    let hour_angle = (hour - 12.0) * 15.0_f32.to_radians();
    let day_angle = (hour - 6.0) * std::f32::consts::PI / 12.0;
    let altitude = (day_angle.sin() * 90.0_f32).to_radians();

    Vec3::new(
        hour_angle.sin() * altitude.cos(),
        hour_angle.cos() * altitude.cos(),
        altitude.sin(),
    )
    .normalize()
}

impl Ephemeris for ClockEphemeris {
    fn moon_position(&self, refracted: bool) -> (Vec3, f32) {
        let dir = moon_direction(self.config.hour, self.config.day, &self.config);
        if !refracted {
            return (dir, self.config.angular_radius);
        }

        // Refraction lifts the apparent altitude, strongest at the horizon.
        let lift = self.config.refraction_lift * (1.0 - dir.z.clamp(0.0, 1.0));
        let altitude = dir.z.clamp(-1.0, 1.0).asin() + lift;
        let horizontal = Vec3::new(dir.x, dir.y, 0.0).normalize_or_zero();
        let lifted = horizontal * altitude.cos() + Vec3::Z * altitude.sin();
        (lifted.normalize(), self.config.angular_radius)
    }

    fn moon_orientation(&self) -> Mat4 {
        // Librations are not modeled; the same face points at the observer.
        Mat4::IDENTITY
    }

    fn earth_shine_intensity(&self) -> f32 {
        // Earthshine is sunlight reflected off the earth onto the unlit
        // portion: brightest at new moon, gone at full moon.
        EARTH_SHINE_PEAK * (1.0 - self.illuminated_fraction())
    }

    fn sun_direction(&self) -> Vec3 {
        sun_direction(self.config.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_are_normalized() {
        let eph = ClockEphemeris::default();
        for day in 0..30 {
            for hour in [0.0, 5.5, 11.0, 17.5, 23.0] {
                let dir = moon_direction(hour, day, eph.config());
                assert!(
                    (dir.length() - 1.0).abs() < 1e-3,
                    "moon dir not normalized at day {day} hour {hour}: len={}",
                    dir.length()
                );
                let sun = sun_direction(hour);
                assert!(
                    (sun.length() - 1.0).abs() < 1e-3,
                    "sun dir not normalized at hour {hour}: len={}",
                    sun.length()
                );
            }
        }
    }

    #[test]
    fn test_moon_high_at_midnight_sun_below() {
        let eph = ClockEphemeris::default();
        let (moon, _) = eph.moon_position(false);
        assert!(moon.z > 0.5, "moon should be high at midnight, z={}", moon.z);
        assert!(
            eph.sun_direction().z < -0.5,
            "sun should be well below the horizon at midnight, z={}",
            eph.sun_direction().z
        );
    }

    #[test]
    fn test_phase_cycle() {
        let eph = ClockEphemeris::default();
        // phase_offset 14.75 over a 29.5 day period puts day 0 at full moon
        assert!((eph.phase_fraction() - 0.5).abs() < 1e-4);
        assert!((eph.illuminated_fraction() - 1.0).abs() < 1e-4);

        let mut new_moon = ClockEphemeris::default();
        new_moon.set_time(0.0, 15);
        assert!(
            new_moon.illuminated_fraction() < 0.01,
            "day 15 should be near new moon, illum={}",
            new_moon.illuminated_fraction()
        );
    }

    #[test]
    fn test_earth_shine_peaks_at_new_moon() {
        let full = ClockEphemeris::default();
        let mut new_moon = ClockEphemeris::default();
        new_moon.set_time(0.0, 15);
        assert!(new_moon.earth_shine_intensity() > full.earth_shine_intensity());
        assert!(full.earth_shine_intensity() < 1e-3);
    }

    #[test]
    fn test_refraction_lifts_near_horizon() {
        let mut eph = ClockEphemeris::default();
        // Moonrise: low altitude, refraction should lift the apparent position
        eph.set_time(18.5, 0);
        let (apparent, _) = eph.moon_position(false);
        let (refracted, _) = eph.moon_position(true);
        assert!(
            refracted.z > apparent.z,
            "refracted z {} should exceed apparent z {}",
            refracted.z,
            apparent.z
        );
        assert!((refracted.length() - 1.0).abs() < 1e-3);
    }
}
