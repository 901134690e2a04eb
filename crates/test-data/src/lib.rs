//! Procedurally generated models shared by the tests of every crate.

use byteorder::{LittleEndian, WriteBytesExt};

pub type RawTriangle = [[f64; 3]; 3];

pub struct TestModel {
    pub triangles: Vec<RawTriangle>,
}

impl TestModel {
    pub fn unique_vertex_count(&self) -> usize {
        let mut seen: Vec<[u64; 3]> = self
            .triangles
            .iter()
            .flatten()
            .map(|p| [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()])
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Returns a copy of the model moved by `offset`.
    pub fn translated(&self, offset: [f64; 3]) -> Self {
        self.map_points(|p| [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]])
    }

    /// Returns a copy of the model scaled about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        self.map_points(|p| [p[0] * factor, p[1] * factor, p[2] * factor])
    }

    /// Returns a copy with every occurrence of `vertex` moved by `offset`.
    pub fn with_vertex_moved(&self, vertex: [f64; 3], offset: [f64; 3]) -> Self {
        self.map_points(|p| {
            if p == vertex {
                [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]]
            } else {
                p
            }
        })
    }

    fn map_points<F: Fn([f64; 3]) -> [f64; 3]>(&self, f: F) -> Self {
        Self {
            triangles: self
                .triangles
                .iter()
                .map(|t| [f(t[0]), f(t[1]), f(t[2])])
                .collect(),
        }
    }

    /// Encodes the model as a binary STL file.
    pub fn stl_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(84 + 50 * self.triangles.len());
        out.extend_from_slice(&[0u8; 80]);
        // Writes into a Vec cannot fail.
        out.write_u32::<LittleEndian>(self.triangles.len() as u32)
            .unwrap();
        for t in &self.triangles {
            for _ in 0..3 {
                out.write_f32::<LittleEndian>(0.0).unwrap();
            }
            for p in t {
                for c in p {
                    out.write_f32::<LittleEndian>(*c as f32).unwrap();
                }
            }
            out.write_u16::<LittleEndian>(0).unwrap();
        }
        out
    }

    /// Encodes the model as an ASCII STL file.
    pub fn ascii_stl(&self, name: &str) -> String {
        let mut out = format!("solid {name}\n");
        for t in &self.triangles {
            out.push_str("  facet normal 0 0 0\n    outer loop\n");
            for p in t {
                out.push_str(&format!("      vertex {} {} {}\n", p[0], p[1], p[2]));
            }
            out.push_str("    endloop\n  endfacet\n");
        }
        out.push_str(&format!("endsolid {name}\n"));
        out
    }
}

/// An axis aligned cube with one corner at the origin, wound counter-clockwise
/// when seen from outside. 8 vertices, 12 triangles.
pub fn cube(size: f64) -> TestModel {
    let s = size;
    let v = |x: f64, y: f64, z: f64| [x * s, y * s, z * s];
    let quads = [
        // -z
        [v(0., 0., 0.), v(0., 1., 0.), v(1., 1., 0.), v(1., 0., 0.)],
        // +z
        [v(0., 0., 1.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 1.)],
        // -y
        [v(0., 0., 0.), v(1., 0., 0.), v(1., 0., 1.), v(0., 0., 1.)],
        // +y
        [v(0., 1., 0.), v(0., 1., 1.), v(1., 1., 1.), v(1., 1., 0.)],
        // -x
        [v(0., 0., 0.), v(0., 0., 1.), v(0., 1., 1.), v(0., 1., 0.)],
        // +x
        [v(1., 0., 0.), v(1., 1., 0.), v(1., 1., 1.), v(1., 0., 1.)],
    ];
    let triangles = quads
        .iter()
        .flat_map(|q| [[q[0], q[1], q[2]], [q[0], q[2], q[3]]])
        .collect();
    TestModel { triangles }
}

pub fn unit_cube() -> TestModel {
    cube(1.0)
}

/// A regular-ish tetrahedron with outward winding.
pub fn tetrahedron() -> TestModel {
    let a = [0.0, 0.0, 0.0];
    let b = [1.0, 0.0, 0.0];
    let c = [0.0, 1.0, 0.0];
    let d = [0.0, 0.0, 1.0];
    TestModel {
        triangles: vec![[a, c, b], [a, b, d], [a, d, c], [b, c, d]],
    }
}

/// A flat `n` x `n` grid of unit squares in the z = 0 plane.
pub fn grid(n: usize) -> TestModel {
    let mut triangles = Vec::with_capacity(2 * n * n);
    for i in 0..n {
        for j in 0..n {
            let (x, y) = (i as f64, j as f64);
            let p00 = [x, y, 0.0];
            let p10 = [x + 1.0, y, 0.0];
            let p11 = [x + 1.0, y + 1.0, 0.0];
            let p01 = [x, y + 1.0, 0.0];
            triangles.push([p00, p10, p11]);
            triangles.push([p00, p11, p01]);
        }
    }
    TestModel { triangles }
}

/// A model with no triangles at all.
pub fn empty() -> TestModel {
    TestModel {
        triangles: Vec::new(),
    }
}
