use crate::{
    error::MeshError,
    geometry::{Triangle, Vector3},
    TriangleMesh,
};

/// Maintains geometry for a single facet.
///
/// This type must be paired with a list of vertices. The points here are only indices into
/// another vector. We do this so we can store each vertex reference as 4 bytes instead of
/// the 24 bytes required to store the entire Vector3. This has further savings if a vertex
/// is reused, which is the case for every closed mesh once duplicate points are merged.
///
/// As a simple example, consider a simple geometry such as:
///
///    *-------*
///    |\     /|
///    | \   / |
///    |  \ /  |
///    |   *   |
///    |  / \  |
///    | /   \ |
///    |/     \|
///    *-------*
///
/// Here we have 5 points and 4 facets. If we would store every facet as a series of points
/// we would need:
///    3 floats * 8b * 3 points * 4 facets = 288 bytes.
///
/// If instead we store:
///    3 floats * 8b * 5 points  = 120b
///  + 3 indices * 4b * 4 facets =  48b
///                              =======
///                               168b
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Facet {
    pub p0: u32,
    pub p1: u32,
    pub p2: u32,
}

impl Facet {
    pub fn new(p0: u32, p1: u32, p2: u32) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// The three directed edges of the facet, following its winding.
    pub fn edges(&self) -> [(u32, u32); 3] {
        [(self.p0, self.p1), (self.p1, self.p2), (self.p2, self.p0)]
    }

    pub fn has_directed_edge(&self, from: u32, to: u32) -> bool {
        self.edges().contains(&(from, to))
    }

    /// Reverses the winding (and so the normal) of the facet.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.p1, &mut self.p2);
    }

    /// True if two corners share a vertex, leaving a facet without area.
    pub fn is_collapsed(&self) -> bool {
        self.p0 == self.p1 || self.p1 == self.p2 || self.p2 == self.p0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexIndex {
    pub points: Vec<Vector3>,
    pub facets: Vec<Facet>,
}

impl VertexIndex {
    /// Builds a mesh from shared vertex positions and facets that index into them.
    ///
    /// Fails if any facet references a vertex that does not exist.
    pub fn from_parts(points: Vec<Vector3>, facets: Vec<Facet>) -> Result<Self, MeshError> {
        for (i, facet) in facets.iter().enumerate() {
            if let Some(&index) = facet
                .indices()
                .iter()
                .find(|&&index| index as usize >= points.len())
            {
                return Err(MeshError::IndexOutOfRange {
                    facet: i,
                    index,
                    vertices: points.len(),
                });
            }
        }
        Ok(Self { points, facets })
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl TriangleMesh for VertexIndex {
    fn from_triangles(triangles: Vec<Triangle>) -> Self {
        // Triangle sources such as STL provide one point for every facet vertex, so this is
        // simply an identity mapping (ex: facet[i] == 3i, 3i+1, 3i+2). Use `process` to
        // de-duplicate the points vector.
        let facets = (0..triangles.len() as u32)
            .map(|i| Facet::new(3 * i, 3 * i + 1, 3 * i + 2))
            .collect();
        let points = triangles
            .into_iter()
            .flat_map(|t| [t.p0, t.p1, t.p2])
            .collect();
        VertexIndex { points, facets }
    }

    fn triangle_count(&self) -> usize {
        self.facets.len()
    }

    fn vertices(&self) -> &[Vector3] {
        &self.points
    }

    fn triangle(&self, index: usize) -> Triangle {
        let f = &self.facets[index];
        Triangle {
            p0: self.points[f.p0 as usize],
            p1: self.points[f.p1 as usize],
            p2: self.points[f.p2 as usize],
        }
    }
}
