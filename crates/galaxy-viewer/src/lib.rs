// src/lib.rs
//! Real-time viewer for procedurally generated galaxy point fields.
//!
//! The field is generated once by `galaxy_field`, copied into a static GPU
//! vertex buffer and drawn every frame as single-pixel points while the scene
//! spins slowly in front of a fixed camera.

pub mod app;
pub mod camera;
pub mod config;
pub mod data;
pub mod error;
pub mod input;
pub mod renderer;
pub mod timing;

pub use error::{Result, ViewerError};
