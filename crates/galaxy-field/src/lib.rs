//! Galaxy point fields: a procedural generator and the GPU-ready point layout.
//!
//! - Each point is 6 packed `f32`: position (x, y, z) then color (r, g, b).
//! - Points are grouped into clusters of `cluster_size` around random centers.
//! - Every `void_threshold`-th cluster is scattered uniformly instead, leaving
//!   sparse "void" regions between the galaxy groupings.
//!
//! Record layout (24 bytes, native-endian f32):
//!   00 : f32[3] position
//!   0C : f32[3] color (linear, 0..1)

pub mod generate;
pub mod point;

pub use generate::{
    generate, generate_with_rng, GeneratorConfig, DEFAULT_CLUSTER_SIZE, DEFAULT_COUNT,
    DEFAULT_VOID_THRESHOLD,
};
pub use point::{Bounds, Point, PointCloud, COLOR_OFFSET, POINT_STRIDE, POSITION_OFFSET};

/// Errors raised while validating or running the generator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
}
