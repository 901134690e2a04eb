mod error;
mod geometry;
mod process;
mod vertex_index;

pub use error::*;
pub use geometry::*;
pub use process::*;
pub use vertex_index::*;

/// A reasonable default mesh to select for unopinionated consumers.
pub type DefaultMesh = VertexIndex;

pub trait TriangleMesh: Sized {
    /// Creates a TriangleMesh from a list of triangles.
    ///
    /// # Arguments
    ///
    /// * `triangles` - A vector of the triangles of the mesh.
    fn from_triangles(triangles: Vec<Triangle>) -> Self;

    /// Returns the number of triangles that comprises this mesh.
    fn triangle_count(&self) -> usize;

    /// Returns the vertex positions of the mesh.
    ///
    /// For meshes that share vertices between faces every position appears
    /// once; triangle soups repeat a position for every face that uses it.
    fn vertices(&self) -> &[Vector3];

    /// Returns the geometry of the triangle at `index`.
    ///
    /// Panics if `index >= self.triangle_count()`.
    fn triangle(&self, index: usize) -> Triangle;

    fn triangles(&self) -> Triangles<'_, Self> {
        Triangles {
            mesh: self,
            next: 0,
        }
    }

    /// Flat normal of every face, in face order.
    fn face_normals(&self) -> Vec<Vector3> {
        self.triangles().map(|t| t.normal()).collect()
    }

    fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }
}

pub struct Triangles<'a, M> {
    mesh: &'a M,
    next: usize,
}

impl<'a, M: TriangleMesh> Iterator for Triangles<'a, M> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.mesh.triangle_count() {
            let t = self.mesh.triangle(self.next);
            self.next += 1;
            Some(t)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mesh.triangle_count() - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, M: TriangleMesh> ExactSizeIterator for Triangles<'a, M> {}
