use meshdiff_mesh::TriangleMesh;

use crate::config::MetricsConfig;
use crate::error::{MetricError, MetricResult};
use crate::nearest::nearest_distances;
use crate::poisson::poisson_disk_sample;

/// Root-mean-square distance from the vertices of `mesh_a` to the surface of `mesh_b`.
///
/// The surface of B is represented by a Poisson-disk resampling of it, which
/// keeps the reference density even where B is finely triangulated. Only
/// A's actual vertices are measured and the value is directional: swap the
/// arguments for the reverse.
pub fn rms_vertex_distance<M: TriangleMesh>(mesh_a: &M, mesh_b: &M) -> MetricResult<f64> {
    rms_vertex_distance_with_config(mesh_a, mesh_b, &MetricsConfig::default())
}

pub fn rms_vertex_distance_with_config<M: TriangleMesh>(
    mesh_a: &M,
    mesh_b: &M,
    config: &MetricsConfig,
) -> MetricResult<f64> {
    if mesh_a.triangle_count() == 0 || mesh_a.vertices().is_empty() {
        return Err(MetricError::invalid_mesh("mesh has no faces"));
    }
    let cloud = poisson_disk_sample(
        mesh_b,
        config.poisson_samples,
        config.poisson_init_factor,
        &mut *config.rng(),
    )?;

    // B's own corners are points of its surface too. Keeping them in the cloud
    // means a vertex of A that coincides with one of B's measures exactly zero.
    let mut reference = cloud.points;
    reference.extend(mesh_b.triangles().flat_map(|t| [t.p0, t.p1, t.p2]));

    let distances = nearest_distances(mesh_a.vertices(), &reference)?;
    let mean_sq = distances.iter().map(|d| d * d).sum::<f64>() / distances.len() as f64;
    Ok(mean_sq.sqrt())
}
