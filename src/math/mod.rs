//! Mathematical utilities

pub mod tangent;

pub use tangent::TangentFrame;
