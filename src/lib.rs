//! Moondisc - physically-motivated Moon disc rendering for real-time skies
//!
//! Computes the Moon's apparent position, orientation, angular size, and
//! illumination (earthshine, sunlit Hapke-Lommel-Seeliger reflectance, and
//! an approximate lunar-eclipse darkening) each frame, and rasterizes the
//! sphere as a screen-aligned quad shaded analytically.
//!
//! Coordinate convention: +Z is the zenith. The horizon test and the
//! tangent-frame reference axis both assume it.

pub mod core;
pub mod math;
pub mod ephemeris;
pub mod moon;
pub mod render;
