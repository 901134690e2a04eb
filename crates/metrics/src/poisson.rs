//! Poisson-disk (blue noise) resampling of mesh surfaces.
//!
//! Uses weighted sample elimination: draw a dense uniform pool, weight every
//! pool point by how crowded its neighborhood is, then repeatedly discard the
//! most crowded point until the target count remains. The survivors are
//! spread evenly over the surface regardless of how the mesh is triangulated.

use std::collections::BinaryHeap;

use meshdiff_mesh::TriangleMesh;
use ordered_float::OrderedFloat;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{MetricError, MetricResult};
use crate::nearest::PointIndex;
use crate::sample::{sample_surface, SurfaceSample};

const ALPHA: f64 = 8.0;
const BETA: f64 = 0.5;
const GAMMA: f64 = 1.5;

/// Neighbor weighting for sample elimination.
struct Weighting {
    r_min: f64,
    r_max: f64,
}

impl Weighting {
    fn new(surface_area: f64, target: usize, pool: usize) -> Self {
        // Largest spacing `target` points can keep on a surface of this area,
        // from the density of hexagonally packed disks.
        let r_max = 2.0 * ((surface_area / target as f64) / (2.0 * 3f64.sqrt())).sqrt();
        let ratio = target as f64 / pool as f64;
        let r_min = r_max * BETA * (1.0 - ratio.powf(GAMMA));
        Self { r_min, r_max }
    }

    fn weight(&self, distance_sq: f64) -> f64 {
        let d = distance_sq.sqrt().max(self.r_min);
        (1.0 - d / self.r_max).powf(ALPHA)
    }
}

/// Resamples the surface of `mesh` to `n` evenly spaced points.
///
/// The elimination starts from `init_factor * n` uniform samples; a factor of
/// one skips elimination and returns the uniform samples directly.
pub fn poisson_disk_sample<M, R>(
    mesh: &M,
    n: usize,
    init_factor: usize,
    rng: &mut R,
) -> MetricResult<SurfaceSample>
where
    M: TriangleMesh,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(MetricError::invalid_parameter(
            "sample count must be positive",
        ));
    }
    if init_factor == 0 {
        return Err(MetricError::invalid_parameter(
            "initial pool factor must be at least 1",
        ));
    }
    let pool_size = n.checked_mul(init_factor).ok_or_else(|| {
        MetricError::invalid_parameter(format!("{n} x {init_factor} samples overflows"))
    })?;

    let pool = sample_surface(mesh, pool_size, rng)?;
    if pool_size == n {
        return Ok(pool);
    }

    let weighting = Weighting::new(mesh.surface_area(), n, pool_size);
    let index = PointIndex::new(&pool.points)?;
    let neighbors = |i: usize| -> Vec<(usize, f64)> {
        index
            .within(&pool.points[i], weighting.r_max)
            .into_iter()
            .filter(|&(j, _)| j != i)
            .collect()
    };

    let mut weights: Vec<f64> = (0..pool_size)
        .into_par_iter()
        .map(|i| {
            neighbors(i)
                .iter()
                .map(|&(_, d2)| weighting.weight(d2))
                .sum()
        })
        .collect();

    // Max-heap keyed on weight. Entries are never updated in place: a changed
    // weight pushes a new entry and stale ones are skipped when popped.
    let mut heap: BinaryHeap<(OrderedFloat<f64>, usize)> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| (OrderedFloat(w), i))
        .collect();
    let mut alive = vec![true; pool_size];
    let mut remaining = pool_size;

    while remaining > n {
        let Some((OrderedFloat(w), i)) = heap.pop() else {
            break;
        };
        if !alive[i] || w != weights[i] {
            continue;
        }
        alive[i] = false;
        remaining -= 1;

        for (j, d2) in neighbors(i) {
            if alive[j] {
                weights[j] -= weighting.weight(d2);
                heap.push((OrderedFloat(weights[j]), j));
            }
        }
    }

    let kept: Vec<usize> = (0..pool_size).filter(|&i| alive[i]).collect();
    log::debug!(
        "poisson-disk: kept {} of {} samples (r_max {:.6})",
        kept.len(),
        pool_size,
        weighting.r_max
    );
    Ok(pool.select(&kept))
}
