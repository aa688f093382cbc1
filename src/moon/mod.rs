//! The renderable moon component.
//!
//! [`MoonNode`] owns the persistent appearance configuration and rebuilds an
//! immutable [`MoonFrameParams`] value each frame from an ephemeris provider.
//! [`projector`] and [`reflectance`] are the CPU reference implementations of
//! the vertex- and fragment-stage math, mirrored exactly by
//! `shaders/moon.wgsl`.

pub mod config;
pub mod params;
pub mod projector;
pub mod reflectance;

pub use config::MoonAppearanceConfig;
pub use params::{MoonFrameParams, MoonNode, MoonUniforms};
