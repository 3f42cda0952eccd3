//! Gaussian smoothing of scalar fields over a sphere's adjacency graph

use rayon::prelude::*;
use sphtopo_core::{Error, Result, SphereTessellation};

/// Smooth `data` with a Gaussian kernel over each vertex's one-ring.
///
/// Every vertex is replaced by the weighted mean of itself (weight 1) and
/// its adjacent vertices, weighted by `exp(-d² / 2σ²)` where `d` is the
/// great-circle distance. A `sigma` of zero returns an unmodified copy.
///
/// # Arguments
/// * `mesh` - Sphere tessellation providing positions and adjacency
/// * `data` - One value per vertex
/// * `sigma` - Kernel width in radians
///
/// # Returns
/// * `Result<Vec<f64>>` - The smoothed field, aligned with `data`
pub fn gaussian_smooth<M>(mesh: &M, data: &[f64], sigma: f64) -> Result<Vec<f64>>
where
    M: SphereTessellation + ?Sized,
{
    let n = mesh.vertex_count();
    if data.len() != n {
        return Err(Error::DimensionMismatch { expected: n, actual: data.len() });
    }

    if !sigma.is_finite() || sigma < 0.0 {
        return Err(Error::InvalidData(format!("sigma must be finite and non-negative, got {}", sigma)));
    }

    mesh.validate_adjacency()?;

    if sigma == 0.0 {
        return Ok(data.to_vec());
    }

    let two_sigma_sq = 2.0 * sigma * sigma;

    let smoothed = (0..n)
        .into_par_iter()
        .map(|v| {
            let center = mesh.coord(v);
            let mut weighted_sum = data[v];
            let mut weight_total = 1.0;

            for &u in mesh.neighbors(v) {
                let d = center.angular_distance(&mesh.coord(u));
                let w = (-(d * d) / two_sigma_sq).exp();
                weighted_sum += w * data[u];
                weight_total += w;
            }

            weighted_sum / weight_total
        })
        .collect();

    Ok(smoothed)
}
