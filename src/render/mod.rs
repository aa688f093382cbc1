//! GPU pipeline, cube-map resources, shader composition, and the software
//! rasterizer fallback.

pub mod shader;
pub mod cubemap;
pub mod pipeline;
pub mod software;

pub use cubemap::{CubeFace, MoonCubeMap};
pub use pipeline::MoonPipeline;
