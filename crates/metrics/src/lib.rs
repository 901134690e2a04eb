//! Surface distance metrics between triangle meshes.
//!
//! Three ways of measuring how far a mesh has moved away from a reference:
//!
//! * [`chamfer`]: mean nearest-neighbor distance between surface samples.
//! * [`hausdorff`]: worst-case nearest-neighbor distance between surface samples.
//! * [`rms_vertex_distance`]: RMS distance from one mesh's vertices to the
//!   other mesh's surface.
//!
//! All of them are pure functions of their inputs and the random source;
//! loading meshes and printing results is left to the caller.

mod chamfer;
mod config;
mod error;
mod hausdorff;
mod nearest;
mod poisson;
mod rms;
mod sample;

pub use chamfer::*;
pub use config::*;
pub use error::*;
pub use hausdorff::*;
pub use nearest::{nearest_distances, PointIndex};
pub use poisson::*;
pub use rms::*;
pub use sample::*;
