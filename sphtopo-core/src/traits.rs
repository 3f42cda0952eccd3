//! Core traits for sphtopo

use crate::{coord::SphereCoord, sphere_box::SphereBox, Error, Result};
use std::collections::HashSet;

/// A discretized sphere: vertices with angular positions plus adjacency.
///
/// Segmentation and smoothing only see the mesh through this trait, so any
/// tessellation that can report positions and neighbor lists can be used.
pub trait SphereTessellation: Sync {
    /// Number of vertices on the sphere
    fn vertex_count(&self) -> usize;

    /// Angular position of `vertex`
    fn coord(&self, vertex: usize) -> SphereCoord;

    /// Indices of the vertices adjacent to `vertex`
    fn neighbors(&self, vertex: usize) -> &[usize];

    /// Check that every neighbor index names a vertex of this mesh
    fn validate_adjacency(&self) -> Result<()> {
        let n = self.vertex_count();
        for v in 0..n {
            if let Some(&u) = self.neighbors(v).iter().find(|&&u| u >= n) {
                return Err(Error::InvalidData(format!(
                    "vertex {} lists neighbor {} but the mesh has {} vertices",
                    v, u, n
                )));
            }
        }
        Ok(())
    }

    /// Unique undirected edges as `(u, v)` with `u < v`.
    ///
    /// Edges are emitted in vertex order, then neighbor-list order. A pair
    /// listed by only one of its endpoints still yields one edge.
    fn edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for u in 0..self.vertex_count() {
            for &v in self.neighbors(u) {
                let key = if u < v { (u, v) } else { (v, u) };
                if key.0 != key.1 && seen.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges
    }
}

/// Trait for objects with an angular extent
pub trait AngularBounds {
    /// Min/max theta and phi over the object's vertices
    fn angular_bounds(&self) -> SphereBox;
}

impl<T: SphereTessellation + ?Sized> AngularBounds for T {
    fn angular_bounds(&self) -> SphereBox {
        let mut bbox = SphereBox::empty();
        for v in 0..self.vertex_count() {
            bbox.extend(&self.coord(v));
        }
        bbox
    }
}
