//! Unit-sphere tessellation

use crate::coord::{SphereCoord, Vector3d};
use crate::traits::SphereTessellation;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vertices on the unit sphere with per-vertex adjacency lists.
///
/// Deserialization goes through [`UnitSphere::new`], so a loaded sphere
/// satisfies the same index checks as one built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawUnitSphere")]
pub struct UnitSphere {
    coords: Vec<SphereCoord>,
    neighbors: Vec<Vec<usize>>,
}

/// Unchecked serialized form of [`UnitSphere`]
#[derive(Deserialize)]
struct RawUnitSphere {
    coords: Vec<SphereCoord>,
    neighbors: Vec<Vec<usize>>,
}

impl TryFrom<RawUnitSphere> for UnitSphere {
    type Error = Error;

    fn try_from(raw: RawUnitSphere) -> Result<Self> {
        Self::new(raw.coords, raw.neighbors)
    }
}

impl UnitSphere {
    /// Create a tessellation from angular positions and neighbor lists.
    ///
    /// Neighbor indices must be in range and a vertex may not list itself.
    pub fn new(coords: Vec<SphereCoord>, neighbors: Vec<Vec<usize>>) -> Result<Self> {
        if coords.len() != neighbors.len() {
            return Err(Error::InvalidData(format!(
                "{} coordinates but {} neighbor lists",
                coords.len(),
                neighbors.len()
            )));
        }

        let n = coords.len();
        for (v, list) in neighbors.iter().enumerate() {
            for &u in list {
                if u >= n {
                    return Err(Error::InvalidData(format!(
                        "vertex {} lists neighbor {} but the sphere has {} vertices",
                        v, u, n
                    )));
                }
                if u == v {
                    return Err(Error::InvalidData(format!("vertex {} lists itself as a neighbor", v)));
                }
            }
        }

        Ok(Self { coords, neighbors })
    }

    /// Create a tessellation from direction vectors and neighbor lists
    pub fn from_cartesian(points: &[Vector3d], neighbors: Vec<Vec<usize>>) -> Result<Self> {
        let coords = points.iter().map(SphereCoord::from_cartesian).collect();
        Self::new(coords, neighbors)
    }

    /// Geodesic sphere built by subdividing an icosahedron `subdivisions` times.
    ///
    /// Level 0 has 12 vertices; each level multiplies the face count by four
    /// (42, 162, 642, ... vertices).
    pub fn icosphere(subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let mut vertices: Vec<Vector3d> = [
            (-1.0, t, 0.0),
            (1.0, t, 0.0),
            (-1.0, -t, 0.0),
            (1.0, -t, 0.0),
            (0.0, -1.0, t),
            (0.0, 1.0, t),
            (0.0, -1.0, -t),
            (0.0, 1.0, -t),
            (t, 0.0, -1.0),
            (t, 0.0, 1.0),
            (-t, 0.0, -1.0),
            (-t, 0.0, 1.0),
        ]
        .iter()
        .map(|&(x, y, z)| Vector3d::new(x, y, z).normalize())
        .collect();

        let mut faces: Vec<[usize; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
            let mut midpoint = |a: usize, b: usize, vertices: &mut Vec<Vector3d>| -> usize {
                let key = if a < b { (a, b) } else { (b, a) };
                *midpoints.entry(key).or_insert_with(|| {
                    let m = (vertices[a] + vertices[b]).normalize();
                    vertices.push(m);
                    vertices.len() - 1
                })
            };

            let mut next = Vec::with_capacity(faces.len() * 4);
            for &[a, b, c] in &faces {
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            faces = next;
        }

        let mut neighbors = vec![Vec::new(); vertices.len()];
        let mut connect = |a: usize, b: usize| {
            if !neighbors[a].contains(&b) {
                neighbors[a].push(b);
            }
            if !neighbors[b].contains(&a) {
                neighbors[b].push(a);
            }
        };
        for &[a, b, c] in &faces {
            connect(a, b);
            connect(b, c);
            connect(c, a);
        }

        Self {
            coords: vertices.iter().map(SphereCoord::from_cartesian).collect(),
            neighbors,
        }
    }

    /// Get the number of vertices
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if the sphere has no vertices
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// All angular positions, indexed by vertex
    pub fn coords(&self) -> &[SphereCoord] {
        &self.coords
    }

    /// Unit vector of every vertex
    pub fn cartesian(&self) -> Vec<Vector3d> {
        self.coords.iter().map(SphereCoord::to_cartesian).collect()
    }
}

impl SphereTessellation for UnitSphere {
    fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    fn coord(&self, vertex: usize) -> SphereCoord {
        self.coords[vertex]
    }

    fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.neighbors[vertex]
    }
}
