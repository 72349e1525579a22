// src/data/mod.rs
//! GPU-side data for the galaxy viewer.
//!
//! This module provides:
//! - The static vertex buffer upload for a generated point cloud.
//! - The uniform layouts shared with `galaxy_points.wgsl`.

pub mod point_cloud;
pub mod types;

pub use self::point_cloud::upload_point_cloud;
pub use self::types::{CameraUniform, PointBuffer};
