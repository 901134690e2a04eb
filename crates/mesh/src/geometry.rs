use cgmath::{InnerSpace, Zero};

pub type Vector3 = cgmath::Vector3<f64>;

// We rely on Vector3 being repr(c) so point buffers can be viewed as [f64; 3]
// slices by the spatial index.
static_assertions::assert_eq_size!(Vector3, [f64; 3]);
static_assertions::assert_eq_align!(Vector3, f64);

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Triangle {
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

impl Triangle {
    pub fn new(p0: Vector3, p1: Vector3, p2: Vector3) -> Self {
        Self { p0, p1, p2 }
    }

    /// Cross product of the two edges leaving `p0`.
    ///
    /// Its length is twice the triangle area and it points along the face
    /// normal for counter-clockwise winding.
    pub fn scaled_normal(&self) -> Vector3 {
        (self.p1 - self.p0).cross(self.p2 - self.p0)
    }

    /// Returns the unit normal of the triangle.
    ///
    /// Degenerate triangles (zero area) have no defined normal and return the
    /// zero vector.
    pub fn normal(&self) -> Vector3 {
        let n = self.scaled_normal();
        let len = n.magnitude();
        if len > 0.0 {
            n / len
        } else {
            Vector3::zero()
        }
    }

    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().magnitude()
    }

    /// Evaluates the point with barycentric weights `(1 - u - v, u, v)`.
    pub fn point_at(&self, u: f64, v: f64) -> Vector3 {
        self.p0 + (self.p1 - self.p0) * u + (self.p2 - self.p0) * v
    }

    pub fn is_finite(&self) -> bool {
        [self.p0, self.p1, self.p2]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }
}

impl std::default::Default for Triangle {
    fn default() -> Self {
        Self {
            p0: Vector3::zero(),
            p1: Vector3::zero(),
            p2: Vector3::zero(),
        }
    }
}

impl From<[[f64; 3]; 3]> for Triangle {
    fn from(t: [[f64; 3]; 3]) -> Self {
        Self {
            p0: t[0].into(),
            p1: t[1].into(),
            p2: t[2].into(),
        }
    }
}
