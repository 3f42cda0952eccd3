//! Spherical coordinate types

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A direction on the unit sphere.
///
/// `theta` is the polar angle measured from +z in `[0, π]`, `phi` the
/// azimuth measured from +x in `(-π, π]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SphereCoord {
    pub theta: f64,
    pub phi: f64,
}

impl SphereCoord {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Convert a (not necessarily normalized) direction to angular form.
    ///
    /// The zero vector maps to the north pole.
    pub fn from_cartesian(v: &Vector3d) -> Self {
        let norm = v.norm();
        if norm < 1e-12 {
            return Self::default();
        }
        let theta = (v.z / norm).clamp(-1.0, 1.0).acos();
        let phi = v.y.atan2(v.x);
        Self { theta, phi }
    }

    /// Unit vector pointing along this direction
    pub fn to_cartesian(&self) -> Vector3d {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        Vector3d::new(st * cp, st * sp, ct)
    }

    /// Great-circle distance in radians
    pub fn angular_distance(&self, other: &SphereCoord) -> f64 {
        let a = self.to_cartesian();
        let b = other.to_cartesian();
        // atan2 stays accurate for nearly coincident and nearly antipodal pairs
        a.cross(&b).norm().atan2(a.dot(&b))
    }
}

impl From<Vector3d> for SphereCoord {
    fn from(v: Vector3d) -> Self {
        Self::from_cartesian(&v)
    }
}
