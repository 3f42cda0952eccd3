//! Segmentation algorithms
//!
//! Graph-based region growing over a scalar field sampled on a tessellated
//! sphere. The field is smoothed, every mesh edge is weighted by the
//! absolute difference of its endpoint values, and components are grown in
//! ascending weight order with an adaptive per-component threshold.

use crate::disjoint_set::DisjointSet;
use crate::smoothing::gaussian_smooth;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sphtopo_core::{Error, Result, SphereBox, SphereTessellation, UnitSphere};
use std::collections::HashMap;
use tracing::debug;

/// Parameters of a segmentation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Gaussian kernel width in radians (0 disables smoothing)
    pub sigma: f64,
    /// Scale of the merge threshold; larger values favour larger regions
    pub c: f64,
    /// Regions smaller than this are merged into a neighbour
    pub min_size: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            c: 1.0,
            min_size: 1,
        }
    }
}

impl SegmentationConfig {
    /// Create a new configuration
    pub fn new(sigma: f64, c: f64, min_size: usize) -> Self {
        Self { sigma, c, min_size }
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::InvalidData(format!(
                "sigma must be finite and non-negative, got {}",
                self.sigma
            )));
        }
        if !self.c.is_finite() || self.c < 0.0 {
            return Err(Error::InvalidData(format!(
                "c must be finite and non-negative, got {}",
                self.c
            )));
        }
        Ok(())
    }
}

/// A mesh edge with its dissimilarity weight
#[derive(Debug, Clone, Copy, PartialEq)]
struct WeightedEdge {
    u: usize,
    v: usize,
    weight: f64,
}

/// Outcome of a completed segmentation
#[derive(Debug, Clone)]
struct Segmentation {
    /// Region id -> ascending vertex indices
    regions: Vec<Vec<usize>>,
    /// Vertex -> region id
    vertex_region: Vec<usize>,
    /// Lazily computed angular boxes, one per region
    bboxes: Option<Vec<SphereBox>>,
}

/// Segments a scalar field on a sphere into connected regions.
///
/// The mesh is borrowed and must outlive the segmenter. Typical use:
/// `set_data`, optionally `smooth`, then `segment`, then query `regions`,
/// `region_bounding_boxes`, `region_data` or `region_color`.
#[derive(Debug)]
pub struct RegionSegmenter<'a, M: SphereTessellation + ?Sized = UnitSphere> {
    mesh: &'a M,
    config: SegmentationConfig,
    data: Option<Vec<f64>>,
    smooth_data: Option<Vec<f64>>,
    segmentation: Option<Segmentation>,
}

impl<'a, M: SphereTessellation + ?Sized> RegionSegmenter<'a, M> {
    /// Create a segmenter over `mesh` with the given parameters
    pub fn new(mesh: &'a M, config: SegmentationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mesh,
            config,
            data: None,
            smooth_data: None,
            segmentation: None,
        })
    }

    pub fn mesh(&self) -> &M {
        self.mesh
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    pub fn sigma(&self) -> f64 {
        self.config.sigma
    }

    pub fn c(&self) -> f64 {
        self.config.c
    }

    pub fn min_size(&self) -> usize {
        self.config.min_size
    }

    /// Number of regions found by the last segmentation, 0 before one ran
    pub fn num_regions(&self) -> usize {
        self.segmentation.as_ref().map_or(0, |s| s.regions.len())
    }

    pub fn is_segmented(&self) -> bool {
        self.segmentation.is_some()
    }

    /// The raw field, if one was installed
    pub fn data(&self) -> Option<&[f64]> {
        self.data.as_deref()
    }

    /// The smoothed field, if smoothing has run
    pub fn smoothed_data(&self) -> Option<&[f64]> {
        self.smooth_data.as_deref()
    }

    /// Install the raw scalar field, one value per mesh vertex.
    ///
    /// Discards any previous smoothing and segmentation.
    pub fn set_data(&mut self, values: Vec<f64>) -> Result<()> {
        let expected = self.mesh.vertex_count();
        if values.len() != expected {
            return Err(Error::DimensionMismatch { expected, actual: values.len() });
        }
        self.data = Some(values);
        self.smooth_data = None;
        self.segmentation = None;
        Ok(())
    }

    /// Smooth the raw field into a separate buffer; the raw field is untouched.
    ///
    /// The most recent `sigma` is kept as the segmenter's sigma.
    pub fn smooth(&mut self, sigma: f64) -> Result<()> {
        let data = self.data.as_deref().ok_or_else(|| {
            Error::InvalidData("no scalar field installed; call set_data first".to_string())
        })?;
        let smoothed = gaussian_smooth(self.mesh, data, sigma)?;
        self.config.sigma = sigma;
        self.smooth_data = Some(smoothed);
        Ok(())
    }

    /// Grow regions over the mesh edge set.
    ///
    /// Smooths with the configured sigma first if `smooth` has not run.
    /// Every call discards the previous result and recomputes from scratch.
    ///
    /// # Arguments
    /// * `c` - Threshold scale; a component of size `s` joined by an edge of
    ///   weight `w` gets internal threshold `w + c / s`
    /// * `min_size` - Components smaller than this are merged into an
    ///   adjacent component in a second pass
    pub fn segment(&mut self, c: f64, min_size: usize) -> Result<()> {
        let config = SegmentationConfig { c, min_size, ..self.config };
        config.validate()?;

        if self.smooth_data.is_none() {
            self.smooth(self.config.sigma)?;
        }
        self.config = config;
        self.segmentation = None;

        let smoothed = self.smooth_data.as_deref().ok_or_else(|| {
            Error::InvalidData("no scalar field installed; call set_data first".to_string())
        })?;

        let n = self.mesh.vertex_count();
        let mut edges: Vec<WeightedEdge> = self
            .mesh
            .edges()
            .into_iter()
            .map(|(u, v)| {
                if u >= n || v >= n {
                    return Err(Error::InvalidData(format!(
                        "edge ({}, {}) out of range for {} vertices",
                        u, v, n
                    )));
                }
                Ok(WeightedEdge {
                    u,
                    v,
                    weight: (smoothed[u] - smoothed[v]).abs(),
                })
            })
            .collect::<Result<_>>()?;

        // Stable: equal weights keep mesh edge order
        edges.par_sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut forest = DisjointSet::new(n, c);

        for edge in &edges {
            let a = forest.find(edge.u);
            let b = forest.find(edge.v);
            if a != b && edge.weight <= forest.threshold(a) && edge.weight <= forest.threshold(b) {
                let root = forest.union(a, b);
                let size = forest.size(root);
                forest.set_threshold(root, edge.weight + c / size as f64);
            }
        }

        debug!(
            vertices = n,
            edges = edges.len(),
            components = forest.num_sets(),
            "threshold merge pass complete"
        );

        for edge in &edges {
            let a = forest.find(edge.u);
            let b = forest.find(edge.v);
            if a != b && (forest.size(a) < min_size || forest.size(b) < min_size) {
                forest.union(a, b);
            }
        }

        debug!(components = forest.num_sets(), min_size, "min-size merge pass complete");

        let mut root_to_region: HashMap<usize, usize> = HashMap::new();
        let mut regions: Vec<Vec<usize>> = Vec::new();
        let mut vertex_region = Vec::with_capacity(n);

        for v in 0..n {
            let root = forest.find(v);
            let id = *root_to_region.entry(root).or_insert_with(|| {
                regions.push(Vec::new());
                regions.len() - 1
            });
            regions[id].push(v);
            vertex_region.push(id);
        }

        self.segmentation = Some(Segmentation {
            regions,
            vertex_region,
            bboxes: None,
        });
        Ok(())
    }

    fn segmentation(&self) -> Result<&Segmentation> {
        self.segmentation.as_ref().ok_or(Error::NotSegmented)
    }

    /// Region id -> ascending vertex indices.
    ///
    /// Ids are dense and ordered by each region's smallest vertex index.
    pub fn regions(&self) -> Result<&[Vec<usize>]> {
        Ok(&self.segmentation()?.regions)
    }

    /// Region id of `vertex`
    pub fn region_of(&self, vertex: usize) -> Result<usize> {
        let seg = self.segmentation()?;
        seg.vertex_region.get(vertex).copied().ok_or_else(|| {
            Error::InvalidData(format!(
                "vertex {} out of range for {} vertices",
                vertex,
                seg.vertex_region.len()
            ))
        })
    }

    /// Angular bounding box of every region, computed on first request
    pub fn region_bounding_boxes(&mut self) -> Result<&[SphereBox]> {
        let mesh = self.mesh;
        let seg = self.segmentation.as_mut().ok_or(Error::NotSegmented)?;
        if seg.bboxes.is_none() {
            let bboxes = seg
                .regions
                .iter()
                .map(|verts| {
                    let mut bbox = SphereBox::empty();
                    for &v in verts {
                        bbox.extend(&mesh.coord(v));
                    }
                    bbox
                })
                .collect();
            seg.bboxes = Some(bboxes);
        }
        Ok(seg.bboxes.as_deref().unwrap_or_default())
    }

    /// Per vertex, the mean raw value of the vertex's region
    pub fn region_data(&self) -> Result<Vec<f64>> {
        let seg = self.segmentation()?;
        let data = self.data.as_deref().ok_or(Error::NotSegmented)?;

        let means: Vec<f64> = seg
            .regions
            .iter()
            .map(|verts| verts.iter().map(|&v| data[v]).sum::<f64>() / verts.len() as f64)
            .collect();

        Ok(seg.vertex_region.iter().map(|&r| means[r]).collect())
    }

    /// Per vertex, an RGB colour in `[0, 1]` identifying the vertex's region.
    ///
    /// Colours are seeded by region id and so are stable across runs.
    pub fn region_color(&self) -> Result<Vec<[f32; 3]>> {
        let seg = self.segmentation()?;

        let palette: Vec<[f32; 3]> = (0..seg.regions.len())
            .map(|id| {
                let mut rng = StdRng::seed_from_u64(id as u64);
                [rng.gen(), rng.gen(), rng.gen()]
            })
            .collect();

        Ok(seg.vertex_region.iter().map(|&r| palette[r]).collect())
    }
}
