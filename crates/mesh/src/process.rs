use std::collections::{HashMap, VecDeque};

use ordered_float::OrderedFloat;

use crate::{
    geometry::Vector3,
    vertex_index::{Facet, VertexIndex},
    TriangleMesh,
};

type PointKey = [OrderedFloat<f64>; 3];

/// Selects the clean-up steps applied by [`VertexIndex::process_with`].
///
/// Every step is enabled by default, which is what a freshly loaded STL needs
/// before it is compared against anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Drop facets with a NaN or infinite coordinate.
    pub remove_non_finite: bool,
    /// Merge vertices with identical coordinates.
    pub merge_vertices: bool,
    /// Drop facets that reference the same vertex more than once.
    pub remove_collapsed: bool,
    /// Drop vertices that no facet references.
    pub remove_unreferenced: bool,
    /// Make winding consistent across every shared edge.
    pub fix_winding: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            remove_non_finite: true,
            merge_vertices: true,
            remove_collapsed: true,
            remove_unreferenced: true,
            fix_winding: true,
        }
    }
}

/// Counts what `process_with` changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub non_finite_facets: usize,
    pub merged_vertices: usize,
    pub collapsed_facets: usize,
    pub unreferenced_vertices: usize,
    pub flipped_facets: usize,
}

impl ProcessSummary {
    pub fn had_changes(&self) -> bool {
        *self != Self::default()
    }
}

impl VertexIndex {
    /// Runs every processing step. See [`ProcessOptions`].
    pub fn process(self) -> Self {
        self.process_with(&ProcessOptions::default()).0
    }

    pub fn process_with(mut self, options: &ProcessOptions) -> (Self, ProcessSummary) {
        let mut summary = ProcessSummary::default();

        if options.remove_non_finite {
            summary.non_finite_facets = self.remove_non_finite();
        }
        if options.merge_vertices {
            summary.merged_vertices = self.merge_vertices();
        }
        if options.remove_collapsed {
            let before = self.facets.len();
            self.facets.retain(|f| !f.is_collapsed());
            summary.collapsed_facets = before - self.facets.len();
        }
        if options.remove_unreferenced {
            summary.unreferenced_vertices = self.remove_unreferenced();
        }
        if options.fix_winding {
            summary.flipped_facets = fix_winding(&mut self.facets);
        }

        if summary.non_finite_facets > 0 || summary.collapsed_facets > 0 {
            log::warn!(
                "dropped {} non-finite and {} collapsed facets",
                summary.non_finite_facets,
                summary.collapsed_facets
            );
        }
        if self.is_empty() {
            log::warn!("mesh has no facets left after processing");
        }
        if summary.had_changes() {
            log::debug!(
                "processed mesh: {} vertices, {} facets ({:?})",
                self.points.len(),
                self.facets.len(),
                summary
            );
        } else {
            log::debug!("mesh needed no processing");
        }
        (self, summary)
    }

    fn remove_non_finite(&mut self) -> usize {
        let before = self.facets.len();
        let points = &self.points;
        self.facets.retain(|f| {
            f.indices().iter().all(|&i| {
                let p = points[i as usize];
                p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
            })
        });
        before - self.facets.len()
    }

    /// Collapses vertices with equal positions onto their first occurrence.
    ///
    /// Returns the number of vertices removed.
    fn merge_vertices(&mut self) -> usize {
        let mut seen: HashMap<PointKey, u32> = HashMap::with_capacity(self.points.len());
        let mut merged = Vec::with_capacity(self.points.len());
        let remap: Vec<u32> = self
            .points
            .iter()
            .map(|p| {
                *seen.entry(point_key(p)).or_insert_with(|| {
                    merged.push(*p);
                    merged.len() as u32 - 1
                })
            })
            .collect();

        let removed = self.points.len() - merged.len();
        self.points = merged;
        for f in &mut self.facets {
            *f = Facet::new(
                remap[f.p0 as usize],
                remap[f.p1 as usize],
                remap[f.p2 as usize],
            );
        }
        removed
    }

    fn remove_unreferenced(&mut self) -> usize {
        let mut used = vec![false; self.points.len()];
        for f in &self.facets {
            for i in f.indices() {
                used[i as usize] = true;
            }
        }

        let mut remap = vec![u32::MAX; self.points.len()];
        let mut kept = Vec::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            if used[i] {
                remap[i] = kept.len() as u32;
                kept.push(*p);
            }
        }

        let removed = self.points.len() - kept.len();
        self.points = kept;
        for f in &mut self.facets {
            *f = Facet::new(
                remap[f.p0 as usize],
                remap[f.p1 as usize],
                remap[f.p2 as usize],
            );
        }
        removed
    }
}

fn point_key(p: &Vector3) -> PointKey {
    [p.x.into(), p.y.into(), p.z.into()]
}

fn edge_key(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Flips facets until every manifold edge is traversed in opposite directions
/// by its two facets.
///
/// Each edge-connected component keeps the orientation of its lowest-numbered
/// facet. Edges shared by more than two facets are not used to propagate
/// orientation. Returns the number of facets flipped.
fn fix_winding(facets: &mut [Facet]) -> usize {
    let mut edges: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (i, f) in facets.iter().enumerate() {
        for (a, b) in f.edges() {
            edges.entry(edge_key(a, b)).or_default().push(i);
        }
    }

    let mut visited = vec![false; facets.len()];
    let mut queue = VecDeque::new();
    let mut flipped = 0;
    for seed in 0..facets.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            for (a, b) in facets[current].edges() {
                let Some(neighbors) = edges.get(&edge_key(a, b)) else {
                    continue;
                };
                if neighbors.len() != 2 {
                    continue;
                }
                for &other in neighbors {
                    if other == current || visited[other] {
                        continue;
                    }
                    visited[other] = true;
                    // A consistently wound neighbor walks the shared edge as b -> a.
                    if facets[other].has_directed_edge(a, b) {
                        facets[other].flip();
                        flipped += 1;
                    }
                    queue.push_back(other);
                }
            }
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Triangle;

    fn quad_soup() -> VertexIndex {
        VertexIndex::from_triangles(vec![
            Triangle::from([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]),
            Triangle::from([[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
        ])
    }

    #[test]
    fn merges_shared_corners() {
        let (mesh, summary) = quad_soup().process_with(&ProcessOptions::default());
        assert_eq!(4, mesh.points.len());
        assert_eq!(2, mesh.facets.len());
        assert_eq!(2, summary.merged_vertices);
        assert_eq!(0, summary.flipped_facets);
    }

    #[test]
    fn merge_treats_signed_zero_as_equal() {
        let mut mesh = quad_soup();
        mesh.points[3].x = -0.0;
        let mesh = mesh.process();
        assert_eq!(4, mesh.points.len());
    }

    #[test]
    fn fixes_inconsistent_winding() {
        let mut soup = quad_soup();
        // Reverse the second triangle.
        soup.points.swap(4, 5);
        let (mesh, summary) = soup.process_with(&ProcessOptions::default());
        assert_eq!(1, summary.flipped_facets);
        let normals = mesh.face_normals();
        assert_eq!(normals[0], normals[1]);
    }

    #[test]
    fn winding_left_alone_when_disabled() {
        let mut soup = quad_soup();
        soup.points.swap(4, 5);
        let options = ProcessOptions {
            fix_winding: false,
            ..Default::default()
        };
        let (mesh, summary) = soup.process_with(&options);
        assert_eq!(0, summary.flipped_facets);
        let normals = mesh.face_normals();
        assert_eq!(normals[0], -normals[1]);
    }

    #[test]
    fn drops_non_finite_and_collapsed_facets() {
        let mesh = VertexIndex::from_triangles(vec![
            Triangle::from([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            Triangle::from([[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            Triangle::from([[2.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 1.0, 0.0]]),
        ]);
        let (mesh, summary) = mesh.process_with(&ProcessOptions::default());
        assert_eq!(1, mesh.facets.len());
        assert_eq!(3, mesh.points.len());
        assert_eq!(1, summary.non_finite_facets);
        assert_eq!(1, summary.collapsed_facets);
        assert!(summary.had_changes());
    }

    #[test]
    fn all_facets_dropped_leaves_empty_mesh() {
        let mesh = VertexIndex::from_triangles(vec![Triangle::from([
            [0.0, 0.0, 0.0],
            [f64::INFINITY, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ])]);
        let mesh = mesh.process();
        assert!(mesh.is_empty());
        assert!(mesh.points.is_empty());
    }

    #[test]
    fn clean_mesh_is_unchanged() {
        let mesh = quad_soup().process();
        let (again, summary) = mesh.clone().process_with(&ProcessOptions::default());
        assert!(!summary.had_changes());
        assert_eq!(mesh, again);
    }
}
