//! # sphtopo
//!
//! Spherical field segmentation and topology hierarchy linking for Rust.
//!
//! This is the umbrella crate that provides convenient access to all sphtopo
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Spherical coordinates, unit-sphere tessellations, angular boxes
//! - **Algorithms**: Gaussian smoothing and graph-based region segmentation
//! - **Topology**: Arena-backed inferior/superior hierarchy links
//!
//! ## Quick Start
//!
//! ```rust
//! use sphtopo::prelude::*;
//!
//! let sphere = UnitSphere::icosphere(2);
//! let field: Vec<f64> = sphere
//!     .cartesian()
//!     .iter()
//!     .map(|p| if p.z > 0.0 { 1.0 } else { 0.0 })
//!     .collect();
//!
//! let mut segmenter = RegionSegmenter::new(&sphere, SegmentationConfig::new(0.0, 0.5, 1)).unwrap();
//! segmenter.set_data(field).unwrap();
//! segmenter.segment(0.5, 1).unwrap();
//! assert!(segmenter.num_regions() >= 2);
//!
//! let mut graph = TopologyGraph::new();
//! let face = graph.insert("face");
//! let edge = graph.insert("edge");
//! graph.link_inferior(face, edge).unwrap();
//! assert_eq!(graph.superiors(edge), &[face]);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables algorithms and topology
//! - `algorithms`: Smoothing and segmentation
//! - `topology`: Hierarchy links
//! - `all`: Enables all features

// Re-export core functionality
pub use sphtopo_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use sphtopo_algorithms as algorithms;

#[cfg(feature = "topology")]
pub use sphtopo_topology as topology;

/// Convenient imports for common use cases
pub mod prelude {
    pub use sphtopo_core::*;

    #[cfg(feature = "algorithms")]
    pub use sphtopo_algorithms::*;

    #[cfg(feature = "topology")]
    pub use sphtopo_topology::*;
}
