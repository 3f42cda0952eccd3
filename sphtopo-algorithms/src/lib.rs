//! # sphtopo Algorithms
//!
//! Algorithms for scalar fields sampled on a tessellated sphere.
//!
//! This crate provides Gaussian smoothing over the sphere's adjacency graph,
//! a disjoint-set forest with per-component merge thresholds, and graph-based
//! region segmentation built on both.

pub mod disjoint_set;
pub mod smoothing;
pub mod segmentation;

// Re-export commonly used items
pub use disjoint_set::*;
pub use smoothing::*;
pub use segmentation::*;
