//! Axis-aligned boxes in (theta, phi) space

use crate::coord::SphereCoord;
use serde::{Deserialize, Serialize};

/// Min/max extent of a set of directions along both angular axes.
///
/// The box is a plain interval product; azimuth wrap-around at ±π is not
/// folded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereBox {
    pub theta_min: f64,
    pub theta_max: f64,
    pub phi_min: f64,
    pub phi_max: f64,
}

impl SphereBox {
    /// An empty box that any `extend` call will replace
    pub fn empty() -> Self {
        Self {
            theta_min: f64::INFINITY,
            theta_max: f64::NEG_INFINITY,
            phi_min: f64::INFINITY,
            phi_max: f64::NEG_INFINITY,
        }
    }

    /// Smallest box holding every coordinate in `coords`
    pub fn from_coords<'a, I>(coords: I) -> Self
    where
        I: IntoIterator<Item = &'a SphereCoord>,
    {
        let mut bbox = Self::empty();
        for c in coords {
            bbox.extend(c);
        }
        bbox
    }

    /// Grow the box to include `c`
    pub fn extend(&mut self, c: &SphereCoord) {
        self.theta_min = self.theta_min.min(c.theta);
        self.theta_max = self.theta_max.max(c.theta);
        self.phi_min = self.phi_min.min(c.phi);
        self.phi_max = self.phi_max.max(c.phi);
    }

    pub fn is_empty(&self) -> bool {
        self.theta_min > self.theta_max || self.phi_min > self.phi_max
    }

    pub fn contains(&self, c: &SphereCoord) -> bool {
        c.theta >= self.theta_min
            && c.theta <= self.theta_max
            && c.phi >= self.phi_min
            && c.phi <= self.phi_max
    }

    /// Extent along theta
    pub fn theta_range(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.theta_max - self.theta_min
        }
    }

    /// Extent along phi
    pub fn phi_range(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.phi_max - self.phi_min
        }
    }
}

impl Default for SphereBox {
    fn default() -> Self {
        Self::empty()
    }
}
