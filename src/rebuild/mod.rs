//! Incremental regeneration of segment meshes after node edits.

mod config;
mod rebuilder;

pub use config::{MeshResolution, RebuildConfig};
pub use rebuilder::{TickStats, TrackRebuilder};
