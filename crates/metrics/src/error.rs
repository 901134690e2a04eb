use thiserror::Error;

pub type MetricResult<T> = Result<T, MetricError>;

/// Errors raised while sampling meshes or querying point sets.
///
/// None of these are transient: they describe inputs that no metric can be
/// computed for, and every metric propagates them unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// The mesh has no faces, no vertices or no surface area.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// A nearest-neighbor query was handed an empty point set.
    #[error("empty point set: {0}")]
    EmptyInput(String),

    /// A sample count or sampler parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl MetricError {
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        Self::InvalidMesh(details.into())
    }

    pub fn empty_input(details: impl Into<String>) -> Self {
        Self::EmptyInput(details.into())
    }

    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }
}
