//! Nearest-neighbor distances between point sets.
//!
//! The reference set is indexed once in a KD-tree and every query point is
//! then a logarithmic lookup, which keeps tens of thousands of samples per
//! side tractable where an all-pairs comparison would not be.

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use meshdiff_mesh::{TriangleMesh, Vector3};
use rayon::prelude::*;

use crate::config::MetricsConfig;
use crate::error::{MetricError, MetricResult};
use crate::sample::sample_surface;

/// A KD-tree over a fixed set of points.
pub struct PointIndex {
    tree: ImmutableKdTree<f64, 3>,
    len: usize,
}

impl PointIndex {
    /// Indexes `points`. Fails if there are none.
    pub fn new(points: &[Vector3]) -> MetricResult<Self> {
        if points.is_empty() {
            return Err(MetricError::empty_input("cannot index an empty point set"));
        }
        // Safety: Vector3 has the size and alignment of [f64; 3] (asserted where it is
        // defined) and stores x, y, z in order, so the point buffer can be viewed as a
        // slice of coordinate arrays without copying.
        let coords: &[[f64; 3]] =
            unsafe { std::slice::from_raw_parts(points.as_ptr().cast(), points.len()) };
        Ok(Self {
            tree: ImmutableKdTree::new_from_slice(coords),
            len: points.len(),
        })
    }

    /// Number of indexed points. Never zero.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the index of the indexed point closest to `query` and its distance.
    ///
    /// When several points are equally close any one of them may be returned;
    /// the distance is the same either way.
    pub fn nearest(&self, query: &Vector3) -> (usize, f64) {
        let found = self
            .tree
            .nearest_one::<SquaredEuclidean>(query.as_ref());
        (found.item as usize, found.distance.sqrt())
    }

    /// Returns every indexed point within `radius` of `query` as
    /// `(index, squared distance)` pairs, in no particular order.
    pub fn within(&self, query: &Vector3, radius: f64) -> Vec<(usize, f64)> {
        self.tree
            .within_unsorted::<SquaredEuclidean>(query.as_ref(), radius * radius)
            .into_iter()
            .map(|n| (n.item as usize, n.distance))
            .collect()
    }

    /// Distance from each of `queries` to its nearest indexed point, in query order.
    pub fn nearest_distances(&self, queries: &[Vector3]) -> Vec<f64> {
        queries.par_iter().map(|q| self.nearest(q).1).collect()
    }
}

/// For every point in `query`, the Euclidean distance to the closest point in `reference`.
///
/// Fails with [`MetricError::EmptyInput`] if either set is empty.
pub fn nearest_distances(query: &[Vector3], reference: &[Vector3]) -> MetricResult<Vec<f64>> {
    if query.is_empty() {
        return Err(MetricError::empty_input("no query points"));
    }
    if reference.is_empty() {
        return Err(MetricError::empty_input("no reference points"));
    }
    let index = PointIndex::new(reference)?;
    log::debug!(
        "querying {} points against {} reference points",
        query.len(),
        index.len()
    );
    Ok(index.nearest_distances(query))
}

/// Samples both surfaces and returns the nearest-neighbor distances in each
/// direction: A's samples against B's, then B's samples against A's.
pub(crate) fn sampled_surface_distances<M: TriangleMesh>(
    mesh_a: &M,
    mesh_b: &M,
    config: &MetricsConfig,
) -> MetricResult<(Vec<f64>, Vec<f64>)> {
    let samples_a = sample_surface(mesh_a, config.samples, &mut *config.rng())?;
    let samples_b = sample_surface(mesh_b, config.samples, &mut *config.rng())?;

    let a_to_b = nearest_distances(&samples_a.points, &samples_b.points)?;
    let b_to_a = nearest_distances(&samples_b.points, &samples_a.points)?;
    Ok((a_to_b, b_to_a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::MetricSpace;
    use proptest::prelude::*;

    fn brute_force(query: &[Vector3], reference: &[Vector3]) -> Vec<f64> {
        query
            .iter()
            .map(|q| {
                reference
                    .iter()
                    .map(|r| q.distance(*r))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect()
    }

    #[test]
    fn exact_distances() {
        let reference = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(10.0, 0.0, 0.0)];
        let query = vec![
            Vector3::new(0.0, 3.0, 4.0),
            Vector3::new(9.0, 0.0, 0.0),
            Vector3::new(10.0, 0.0, 0.0),
        ];
        let d = nearest_distances(&query, &reference).unwrap();
        assert_eq!(vec![5.0, 1.0, 0.0], d);
    }

    #[test]
    fn ties_report_the_same_distance() {
        let reference = vec![Vector3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let index = PointIndex::new(&reference).unwrap();
        let (i, d) = index.nearest(&Vector3::new(0.0, 0.0, 0.0));
        assert!(i < 2);
        assert_eq!(1.0, d);
    }

    #[test]
    fn duplicate_reference_points() {
        let reference = vec![Vector3::new(1.0, 1.0, 1.0); 100];
        let d = nearest_distances(&[Vector3::new(1.0, 1.0, 3.0)], &reference).unwrap();
        assert_eq!(vec![2.0], d);
    }

    #[test]
    fn within_radius() {
        let reference: Vec<Vector3> = (0..10).map(|i| Vector3::new(i as f64, 0.0, 0.0)).collect();
        let index = PointIndex::new(&reference).unwrap();
        let mut found: Vec<usize> = index
            .within(&Vector3::new(4.0, 0.0, 0.0), 1.5)
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        found.sort_unstable();
        assert_eq!(vec![3, 4, 5], found);
    }

    #[test]
    fn empty_inputs() {
        let points = vec![Vector3::new(0.0, 0.0, 0.0)];
        assert!(matches!(
            nearest_distances(&[], &points),
            Err(MetricError::EmptyInput(_))
        ));
        assert!(matches!(
            nearest_distances(&points, &[]),
            Err(MetricError::EmptyInput(_))
        ));
        assert!(matches!(
            PointIndex::new(&[]),
            Err(MetricError::EmptyInput(_))
        ));
    }

    fn point() -> impl Strategy<Value = Vector3> {
        (-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64)
            .prop_map(|(x, y, z)| Vector3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn matches_brute_force(
            query in prop::collection::vec(point(), 1..40),
            reference in prop::collection::vec(point(), 1..80),
        ) {
            let fast = nearest_distances(&query, &reference).unwrap();
            let slow = brute_force(&query, &reference);
            prop_assert_eq!(fast.len(), query.len());
            for (f, s) in fast.iter().zip(&slow) {
                prop_assert!(*f >= 0.0);
                prop_assert!((f - s).abs() <= 1e-9 * (1.0 + s));
            }
        }
    }
}
