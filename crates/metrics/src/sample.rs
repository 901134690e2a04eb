//! Area-weighted random sampling of triangle mesh surfaces.

use meshdiff_mesh::{TriangleMesh, Vector3};
use rand::Rng;

use crate::error::{MetricError, MetricResult};

/// Points drawn from a mesh surface.
///
/// The three vectors are parallel: `normals[i]` is the flat normal of face
/// `faces[i]`, the face `points[i]` was drawn from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSample {
    pub points: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub faces: Vec<usize>,
}

impl SurfaceSample {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keeps the samples at `indices`, in the given order.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            points: indices.iter().map(|&i| self.points[i]).collect(),
            normals: indices.iter().map(|&i| self.normals[i]).collect(),
            faces: indices.iter().map(|&i| self.faces[i]).collect(),
        }
    }
}

/// Running total of face areas, used to pick faces in proportion to their area.
///
/// Fails if the mesh has no faces or its total area is zero (or not finite).
fn cumulative_areas<M: TriangleMesh>(mesh: &M) -> MetricResult<Vec<f64>> {
    if mesh.triangle_count() == 0 {
        return Err(MetricError::invalid_mesh("mesh has no faces"));
    }
    let mut total = 0.0;
    let cumulative: Vec<f64> = mesh
        .triangles()
        .map(|t| {
            total += t.area();
            total
        })
        .collect();
    if !(total > 0.0 && total.is_finite()) {
        return Err(MetricError::invalid_mesh(format!(
            "mesh has no usable surface area (total area {total})"
        )));
    }
    Ok(cumulative)
}

/// Draws `n` points uniformly over the surface of `mesh`.
///
/// Each face receives samples in proportion to its area and points are
/// uniform within a face. Faces without area are never selected.
pub fn sample_surface<M, R>(mesh: &M, n: usize, rng: &mut R) -> MetricResult<SurfaceSample>
where
    M: TriangleMesh,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(MetricError::invalid_parameter(
            "sample count must be positive",
        ));
    }
    let cumulative = cumulative_areas(mesh)?;
    let total = cumulative[cumulative.len() - 1];
    let last = cumulative.len() - 1;
    let normals = mesh.face_normals();

    let mut sample = SurfaceSample {
        points: Vec::with_capacity(n),
        normals: Vec::with_capacity(n),
        faces: Vec::with_capacity(n),
    };
    for _ in 0..n {
        let r = rng.gen::<f64>() * total;
        // First face whose running total exceeds `r`. Clamp in case rounding put
        // `r` at the very end of the range.
        let face = cumulative.partition_point(|&c| c <= r).min(last);

        // Two uniform values in the unit square cover the parallelogram spanned
        // by the triangle edges; reflecting the far half folds it onto the triangle.
        let (mut u, mut v) = (rng.gen::<f64>(), rng.gen::<f64>());
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        sample.points.push(mesh.triangle(face).point_at(u, v));
        sample.normals.push(normals[face]);
        sample.faces.push(face);
    }
    log::debug!(
        "drew {} surface samples from {} faces (area {})",
        n,
        mesh.triangle_count(),
        total
    );
    Ok(sample)
}

/// Draws `n` points from the surface of `mesh` with the thread-local generator.
///
/// Repeated calls return different samples; use [`sample_surface`] with a
/// seeded generator for reproducible output.
pub fn sample_points<M: TriangleMesh>(mesh: &M, n: usize) -> MetricResult<SurfaceSample> {
    sample_surface(mesh, n, &mut rand::thread_rng())
}
