//! Cube-map albedo texture for the moon surface.
//!
//! Six square faces loaded from `<stem>_px.<ext>` through `<stem>_nz.<ext>`
//! next to a base path like `textures/moon.png`. The full mip chain is built
//! CPU-side so the sampler can use trilinear minification.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::core::error::Error;
use crate::core::types::Result;

/// The six cube-map faces, in wgpu array-layer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// File-name suffix for this face.
    pub fn suffix(self) -> &'static str {
        match self {
            CubeFace::PosX => "_px",
            CubeFace::NegX => "_nx",
            CubeFace::PosY => "_py",
            CubeFace::NegY => "_ny",
            CubeFace::PosZ => "_pz",
            CubeFace::NegZ => "_nz",
        }
    }
}

/// Per-face path from a base path: `moon.png` -> `moon_px.png` and so on.
pub fn face_path(base: &Path, face: CubeFace) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{}", face.suffix());
    if let Some(ext) = base.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    base.with_file_name(name)
}

/// Number of mip levels for a square face of the given size.
pub fn mip_level_count(size: u32) -> u32 {
    32 - size.leading_zeros()
}

/// Downscale chain for one face, base level first, down to 1x1.
pub fn build_mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let mut size = base.width().max(base.height());
    let mut levels = vec![base];
    while size > 1 {
        size = (size / 2).max(1);
        let prev = &levels[levels.len() - 1];
        let next = image::imageops::resize(
            prev,
            (prev.width() / 2).max(1),
            (prev.height() / 2).max(1),
            image::imageops::FilterType::Triangle,
        );
        levels.push(next);
    }
    levels
}

/// The moon's albedo cube map plus its sampler.
pub struct MoonCubeMap {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl MoonCubeMap {
    /// Load six faces addressed by the suffix convention next to `base_path`.
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, base_path: &Path) -> Result<Self> {
        let mut faces = Vec::with_capacity(6);
        for face in CubeFace::ALL {
            let path = face_path(base_path, face);
            let img = image::open(&path)?.to_rgba8();
            if img.width() != img.height() {
                return Err(Error::Texture(format!(
                    "cube face {} is not square: {}x{}",
                    path.display(),
                    img.width(),
                    img.height()
                )));
            }
            faces.push(img);
        }
        Self::from_faces(device, queue, faces)
    }

    /// Create from six decoded RGBA faces, in [`CubeFace::ALL`] order.
    pub fn from_faces(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        faces: Vec<RgbaImage>,
    ) -> Result<Self> {
        if faces.len() != 6 {
            return Err(Error::Texture(format!("expected 6 cube faces, got {}", faces.len())));
        }
        let size = faces[0].width();
        if size == 0 {
            return Err(Error::Texture("cube face has zero size".into()));
        }
        if faces.iter().any(|f| f.width() != size || f.height() != size) {
            return Err(Error::Texture("cube faces have mismatched dimensions".into()));
        }

        let mip_count = mip_level_count(size);
        log::info!("Creating moon cube map: {size}x{size}, {mip_count} mip levels");

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("moon_cube"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, face) in faces.into_iter().enumerate() {
            for (level, img) in build_mip_chain(face).into_iter().enumerate() {
                queue.write_texture(
                    wgpu::TexelCopyTextureInfo {
                        texture: &texture,
                        mip_level: level as u32,
                        origin: wgpu::Origin3d {
                            x: 0,
                            y: 0,
                            z: layer as u32,
                        },
                        aspect: wgpu::TextureAspect::All,
                    },
                    &img,
                    wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(4 * img.width()),
                        rows_per_image: Some(img.height()),
                    },
                    wgpu::Extent3d {
                        width: img.width(),
                        height: img.height(),
                        depth_or_array_layers: 1,
                    },
                );
            }
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("moon_cube_view"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("moon_cube_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Ok(Self { texture, view, sampler })
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_suffixes() {
        let suffixes: Vec<&str> = CubeFace::ALL.iter().map(|f| f.suffix()).collect();
        assert_eq!(suffixes, ["_px", "_nx", "_py", "_ny", "_pz", "_nz"]);
    }

    #[test]
    fn test_face_path_keeps_directory_and_extension() {
        let base = Path::new("textures/moon.png");
        assert_eq!(
            face_path(base, CubeFace::PosX),
            PathBuf::from("textures/moon_px.png")
        );
        assert_eq!(
            face_path(base, CubeFace::NegZ),
            PathBuf::from("textures/moon_nz.png")
        );
    }

    #[test]
    fn test_face_path_without_extension() {
        let base = Path::new("moon");
        assert_eq!(face_path(base, CubeFace::PosY), PathBuf::from("moon_py"));
    }

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1), 1);
        assert_eq!(mip_level_count(2), 2);
        assert_eq!(mip_level_count(64), 7);
        assert_eq!(mip_level_count(1024), 11);
    }

    #[test]
    fn test_mip_chain_halves_down_to_one() {
        let base = RgbaImage::new(64, 64);
        let chain = build_mip_chain(base);
        assert_eq!(chain.len(), 7);
        let sizes: Vec<u32> = chain.iter().map(|l| l.width()).collect();
        assert_eq!(sizes, [64, 32, 16, 8, 4, 2, 1]);
    }
}
