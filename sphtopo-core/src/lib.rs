//! Core data structures and traits for sphtopo
//! 
//! This crate provides the fundamental types shared by the segmentation and
//! topology crates: spherical coordinates, unit-sphere tessellations,
//! angular bounding boxes, and the common error type.

pub mod coord;
pub mod unit_sphere;
pub mod sphere_box;
pub mod traits;
pub mod error;

pub use coord::*;
pub use unit_sphere::*;
pub use sphere_box::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::Vector3;
