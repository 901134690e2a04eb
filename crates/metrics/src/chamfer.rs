use meshdiff_mesh::TriangleMesh;

use crate::config::MetricsConfig;
use crate::error::MetricResult;
use crate::nearest::sampled_surface_distances;

/// Mean nearest-neighbor distances between two sampled surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChamferDistance {
    /// Mean distance from samples of A to the closest sample of B.
    pub a_to_b: f64,
    /// Mean distance from samples of B to the closest sample of A.
    pub b_to_a: f64,
    /// Average of the two directional means.
    pub symmetric: f64,
}

impl ChamferDistance {
    pub fn from_directional(a_to_b: f64, b_to_a: f64) -> Self {
        Self {
            a_to_b,
            b_to_a,
            symmetric: (a_to_b + b_to_a) / 2.0,
        }
    }
}

impl From<ChamferDistance> for (f64, f64, f64) {
    fn from(d: ChamferDistance) -> Self {
        (d.a_to_b, d.b_to_a, d.symmetric)
    }
}

fn mean(distances: &[f64]) -> f64 {
    distances.iter().sum::<f64>() / distances.len() as f64
}

/// Chamfer distance between the surfaces of `mesh_a` and `mesh_b`, from
/// `samples` random points on each.
///
/// Samples are redrawn on every call, so results vary slightly between calls.
/// Use [`chamfer_with_config`] with a seed for reproducible values.
pub fn chamfer<M: TriangleMesh>(
    mesh_a: &M,
    mesh_b: &M,
    samples: usize,
) -> MetricResult<ChamferDistance> {
    chamfer_with_config(mesh_a, mesh_b, &MetricsConfig::new().with_samples(samples))
}

pub fn chamfer_with_config<M: TriangleMesh>(
    mesh_a: &M,
    mesh_b: &M,
    config: &MetricsConfig,
) -> MetricResult<ChamferDistance> {
    let (a_to_b, b_to_a) = sampled_surface_distances(mesh_a, mesh_b, config)?;
    Ok(ChamferDistance::from_directional(
        mean(&a_to_b),
        mean(&b_to_a),
    ))
}
