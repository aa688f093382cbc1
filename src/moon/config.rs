//! Moon appearance configuration.

use serde::{Deserialize, Serialize};

/// User-configurable appearance parameters. Persists for the node's
/// lifetime; mutated only through the node's setters. Values are not
/// validated, the shader clamps defensively.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoonAppearanceConfig {
    /// Multiplier on the apparent angular radius. The real moon looks
    /// surprisingly small on screen, so the disc is oversized by default.
    pub scale: f32,
    /// Sunlit color (linear RGB).
    pub sun_shine_color: [f32; 3],
    /// Sunlit intensity multiplier.
    pub sun_shine_intensity: f32,
    /// Earthshine color (linear RGB).
    pub earth_shine_color: [f32; 3],
    /// Earthshine intensity scale on top of the ephemeris base intensity.
    pub earth_shine_scale: f32,
}

impl MoonAppearanceConfig {
    pub fn default_scale() -> f32 {
        2.0
    }

    pub fn default_sun_shine_color() -> [f32; 3] {
        [1.0, 0.96, 0.80]
    }

    pub fn default_sun_shine_intensity() -> f32 {
        24.0
    }

    pub fn default_earth_shine_color() -> [f32; 3] {
        [0.92, 0.96, 1.00]
    }

    pub fn default_earth_shine_scale() -> f32 {
        1.0
    }
}

impl Default for MoonAppearanceConfig {
    fn default() -> Self {
        Self {
            scale: Self::default_scale(),
            sun_shine_color: Self::default_sun_shine_color(),
            sun_shine_intensity: Self::default_sun_shine_intensity(),
            earth_shine_color: Self::default_earth_shine_color(),
            earth_shine_scale: Self::default_earth_shine_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = MoonAppearanceConfig::default();
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.sun_shine_color, [1.0, 0.96, 0.80]);
        assert_eq!(config.sun_shine_intensity, 24.0);
        assert_eq!(config.earth_shine_color, [0.92, 0.96, 1.00]);
        assert_eq!(config.earth_shine_scale, 1.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = MoonAppearanceConfig {
            scale: 3.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MoonAppearanceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scale, 3.5);
        assert_eq!(back.sun_shine_intensity, config.sun_shine_intensity);
    }
}
