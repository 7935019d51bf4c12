//! Fixed-topology grid meshes and the per-node mesh set.

mod error;
mod grid;
mod segment;

pub use error::MeshError;
pub use grid::{Bounds, GridMesh};
pub use segment::{create_or_update, SegmentMeshes};
