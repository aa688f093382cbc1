//! Per-frame moon parameters and the renderable node component.

use bytemuck::{Pod, Zeroable};

use crate::core::types::{Mat4, Vec3};
use crate::ephemeris::Ephemeris;
use crate::moon::config::MoonAppearanceConfig;

/// Per-frame value bundle consumed by the shader. Rebuilt every frame from
/// the ephemeris provider plus the stored configuration; no identity beyond
/// the current frame.
#[derive(Clone, Copy, Debug)]
pub struct MoonFrameParams {
    /// Apparent moon direction (unit).
    pub moon_direction: Vec3,
    /// Apparent angular radius in radians, pre-multiplied by the config scale.
    pub apparent_radius: f32,
    /// Refraction-corrected direction (unit).
    pub moon_direction_refracted: Vec3,
    /// Radius carried with the refracted direction. Kept as the *unscaled*
    /// apparent radius, matching long-standing behavior.
    pub refracted_radius: f32,
    /// Cube-map orientation (optical librations).
    pub orientation: Mat4,
    pub sun_direction: Vec3,
    pub sun_shine_color: Vec3,
    pub sun_shine_intensity: f32,
    /// Earthshine color pre-multiplied by scale and ephemeris intensity.
    pub earth_shine: Vec3,
}

impl Default for MoonFrameParams {
    fn default() -> Self {
        let config = MoonAppearanceConfig::default();
        Self {
            moon_direction: Vec3::Z,
            apparent_radius: 1.0,
            moon_direction_refracted: Vec3::Z,
            refracted_radius: 1.0,
            orientation: Mat4::IDENTITY,
            sun_direction: Vec3::NEG_Z,
            sun_shine_color: Vec3::from(config.sun_shine_color),
            sun_shine_intensity: config.sun_shine_intensity,
            earth_shine: Vec3::ZERO,
        }
    }
}

/// GPU-ready uniform block; must match `MoonUniforms` in
/// `shaders/uniforms.wgsl` field for field.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MoonUniforms {
    /// xyz = apparent direction, w = scaled apparent angular radius.
    pub moon: [f32; 4],
    /// xyz = refracted direction, w = unscaled apparent radius.
    pub moonr: [f32; 4],
    pub orientation: [[f32; 4]; 4],
    /// xyz = sun direction.
    pub sun: [f32; 4],
    /// rgb = color, w = intensity.
    pub sun_shine: [f32; 4],
    /// rgb, pre-multiplied by scale and earthshine intensity.
    pub earth_shine: [f32; 4],
}

impl From<&MoonFrameParams> for MoonUniforms {
    fn from(p: &MoonFrameParams) -> Self {
        Self {
            moon: p.moon_direction.extend(p.apparent_radius).to_array(),
            moonr: p.moon_direction_refracted.extend(p.refracted_radius).to_array(),
            orientation: p.orientation.to_cols_array_2d(),
            sun: p.sun_direction.extend(0.0).to_array(),
            sun_shine: p.sun_shine_color.extend(p.sun_shine_intensity).to_array(),
            earth_shine: p.earth_shine.extend(0.0).to_array(),
        }
    }
}

impl Default for MoonUniforms {
    fn default() -> Self {
        Self::from(&MoonFrameParams::default())
    }
}

/// The moon disc as a plain renderable component: persistent configuration
/// plus the last-built frame parameters. Call [`update`](Self::update) once
/// per frame, then feed [`uniforms`](Self::uniforms) to the render pipeline.
#[derive(Clone, Debug)]
pub struct MoonNode {
    config: MoonAppearanceConfig,
    params: MoonFrameParams,
}

impl Default for MoonNode {
    fn default() -> Self {
        Self::new(MoonAppearanceConfig::default())
    }
}

impl MoonNode {
    pub fn new(config: MoonAppearanceConfig) -> Self {
        let params = MoonFrameParams {
            sun_shine_color: Vec3::from(config.sun_shine_color),
            sun_shine_intensity: config.sun_shine_intensity,
            ..Default::default()
        };
        Self { config, params }
    }

    /// Rebuild the frame parameters from the ephemeris provider.
    pub fn update(&mut self, eph: &dyn Ephemeris) {
        let (moon, radius) = eph.moon_position(false);
        let (moonr, _) = eph.moon_position(true);

        self.params.moon_direction = moon;
        self.params.apparent_radius = radius * self.config.scale;
        self.params.moon_direction_refracted = moonr;
        // The refracted slot carries the unscaled apparent radius.
        self.params.refracted_radius = radius;
        self.params.orientation = eph.moon_orientation();
        self.params.sun_direction = eph.sun_direction();
        self.params.sun_shine_color = Vec3::from(self.config.sun_shine_color);
        self.params.sun_shine_intensity = self.config.sun_shine_intensity;
        self.params.earth_shine = Vec3::from(self.config.earth_shine_color)
            * self.config.earth_shine_scale
            * eph.earth_shine_intensity();
    }

    /// Last-built frame parameters.
    #[inline]
    pub fn params(&self) -> &MoonFrameParams {
        &self.params
    }

    /// GPU-ready uniform block for the current frame.
    pub fn uniforms(&self) -> MoonUniforms {
        MoonUniforms::from(&self.params)
    }

    #[inline]
    pub fn config(&self) -> &MoonAppearanceConfig {
        &self.config
    }

    /// Change the disc scale. Takes effect immediately: the stored apparent
    /// radius is rescaled in place rather than waiting for the next
    /// ephemeris read. Returns the stored scale.
    pub fn set_scale(&mut self, scale: f32) -> f32 {
        self.params.apparent_radius = self.params.apparent_radius / self.config.scale * scale;
        self.config.scale = scale;
        self.config.scale
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.config.scale
    }

    pub fn set_sun_shine_color(&mut self, color: Vec3) -> Vec3 {
        self.config.sun_shine_color = color.to_array();
        self.params.sun_shine_color = color;
        color
    }

    #[inline]
    pub fn sun_shine_color(&self) -> Vec3 {
        Vec3::from(self.config.sun_shine_color)
    }

    pub fn set_sun_shine_intensity(&mut self, intensity: f32) -> f32 {
        self.config.sun_shine_intensity = intensity;
        self.params.sun_shine_intensity = intensity;
        intensity
    }

    #[inline]
    pub fn sun_shine_intensity(&self) -> f32 {
        self.config.sun_shine_intensity
    }

    /// Takes effect at the next [`update`](Self::update), when the
    /// earthshine product is rebuilt.
    pub fn set_earth_shine_color(&mut self, color: Vec3) -> Vec3 {
        self.config.earth_shine_color = color.to_array();
        color
    }

    #[inline]
    pub fn earth_shine_color(&self) -> Vec3 {
        Vec3::from(self.config.earth_shine_color)
    }

    /// Takes effect at the next [`update`](Self::update).
    pub fn set_earth_shine_scale(&mut self, scale: f32) -> f32 {
        self.config.earth_shine_scale = scale;
        scale
    }

    #[inline]
    pub fn earth_shine_scale(&self) -> f32 {
        self.config.earth_shine_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::FixedEphemeris;

    fn perturbed_zenith_ephemeris() -> FixedEphemeris {
        // Slightly off the +Z pole to keep the tangent frame well defined
        let dir = Vec3::new(0.001, 0.0, 0.9999995);
        FixedEphemeris {
            moon_direction: dir,
            moon_direction_refracted: dir,
            angular_radius: 0.01,
            earth_shine_intensity: 0.05,
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_node_exposes_defaults() {
        let node = MoonNode::default();
        assert_eq!(node.scale(), 2.0);
        assert_eq!(node.sun_shine_intensity(), 24.0);
        assert_eq!(node.earth_shine_color(), Vec3::new(0.92, 0.96, 1.00));
        assert_eq!(node.earth_shine_scale(), 1.0);
    }

    #[test]
    fn test_update_scales_apparent_radius() {
        let mut node = MoonNode::default();
        node.update(&perturbed_zenith_ephemeris());

        let u = node.uniforms();
        assert!(
            (u.moon[3] - 0.02).abs() < 1e-7,
            "scaled radius should be 0.01 * 2.0, got {}",
            u.moon[3]
        );
    }

    #[test]
    fn test_refracted_radius_carries_unscaled_apparent_value() {
        // Long-standing quirk: the refracted slot is never scaled
        let mut node = MoonNode::default();
        node.update(&perturbed_zenith_ephemeris());

        let u = node.uniforms();
        assert_eq!(u.moonr[3], 0.01, "refracted radius must stay unscaled");
        assert!(u.moon[3] > u.moonr[3]);
    }

    #[test]
    fn test_set_scale_round_trip_restores_radius() {
        let mut node = MoonNode::default();
        node.update(&perturbed_zenith_ephemeris());
        let original = node.params().apparent_radius;

        node.set_scale(5.0);
        assert!((node.params().apparent_radius - 0.05).abs() < 1e-6);

        node.set_scale(2.0);
        assert!(
            (node.params().apparent_radius - original).abs() < 1e-6,
            "round trip should restore the radius: {} vs {original}",
            node.params().apparent_radius
        );
    }

    #[test]
    fn test_earth_shine_premultiplied() {
        let mut node = MoonNode::default();
        node.set_earth_shine_scale(2.0);
        node.update(&perturbed_zenith_ephemeris());

        let expected = Vec3::new(0.92, 0.96, 1.00) * 2.0 * 0.05;
        let got = node.params().earth_shine;
        assert!(
            (got - expected).length() < 1e-6,
            "earthshine {got:?} should equal color * scale * intensity {expected:?}"
        );
    }

    #[test]
    fn test_setters_return_stored_value() {
        let mut node = MoonNode::default();
        assert_eq!(node.set_scale(3.0), 3.0);
        assert_eq!(node.set_sun_shine_intensity(10.0), 10.0);
        assert_eq!(node.set_sun_shine_color(Vec3::ONE), Vec3::ONE);
        assert_eq!(node.sun_shine_color(), Vec3::ONE);
    }

    #[test]
    fn test_default_uniforms_match_original_defaults() {
        let u = MoonUniforms::default();
        assert_eq!(u.moon, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(u.moonr, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(u.earth_shine, [0.0; 4]);
    }
}
