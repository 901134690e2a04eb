use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("facet {facet} references vertex {index} but the mesh only has {vertices} vertices")]
    IndexOutOfRange {
        facet: usize,
        index: u32,
        vertices: usize,
    },
}
