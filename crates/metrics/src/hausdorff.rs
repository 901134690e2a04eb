use meshdiff_mesh::TriangleMesh;

use crate::config::MetricsConfig;
use crate::error::MetricResult;
use crate::nearest::sampled_surface_distances;

/// Worst-case nearest-neighbor distances between two sampled surfaces.
///
/// Unlike [`crate::ChamferDistance`] the symmetric value is the larger of the
/// two directions, not their average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HausdorffDistance {
    pub a_to_b: f64,
    pub b_to_a: f64,
    pub symmetric: f64,
}

impl HausdorffDistance {
    pub fn from_directional(a_to_b: f64, b_to_a: f64) -> Self {
        Self {
            a_to_b,
            b_to_a,
            symmetric: a_to_b.max(b_to_a),
        }
    }
}

impl From<HausdorffDistance> for (f64, f64, f64) {
    fn from(d: HausdorffDistance) -> Self {
        (d.a_to_b, d.b_to_a, d.symmetric)
    }
}

fn max(distances: &[f64]) -> f64 {
    distances.iter().copied().fold(0.0, f64::max)
}

/// Hausdorff distance between the surfaces of `mesh_a` and `mesh_b`, from
/// `samples` random points on each.
///
/// A single far-off region dominates the result.
pub fn hausdorff<M: TriangleMesh>(
    mesh_a: &M,
    mesh_b: &M,
    samples: usize,
) -> MetricResult<HausdorffDistance> {
    hausdorff_with_config(mesh_a, mesh_b, &MetricsConfig::new().with_samples(samples))
}

pub fn hausdorff_with_config<M: TriangleMesh>(
    mesh_a: &M,
    mesh_b: &M,
    config: &MetricsConfig,
) -> MetricResult<HausdorffDistance> {
    let (a_to_b, b_to_a) = sampled_surface_distances(mesh_a, mesh_b, config)?;
    Ok(HausdorffDistance::from_directional(
        max(&a_to_b),
        max(&b_to_a),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_is_the_maximum() {
        let d = HausdorffDistance::from_directional(1.0, 3.0);
        assert_eq!(3.0, d.symmetric);
        let d = HausdorffDistance::from_directional(4.0, 3.0);
        assert_eq!((4.0, 3.0, 4.0), <(f64, f64, f64)>::from(d));
    }

    #[test]
    fn max_of_distances() {
        assert_eq!(7.5, max(&[1.0, 7.5, 3.0]));
    }
}
