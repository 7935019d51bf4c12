//! Track topology, node data and surface sampling.
//!
//! The track owns its nodes; nodes refer back to the track only through a
//! [`NodeLink`] holding ids.

mod editing;
mod node;
mod surface;
mod topology;

pub use editing::{DEFAULT_RESET_NODES, NEW_NODE_DISTANCE};
pub use node::{NodeId, NodeLink, TrackId, TrackNode, DEFAULT_WALL_HEIGHT};
pub use surface::{
    sample_cross_section_local_position, sample_cross_section_local_tangent,
    sample_cross_section_world_position, sample_cross_section_world_tangent,
    sample_segment_local_position, sample_segment_local_rotation, sample_segment_wall_local_positions,
    sample_segment_wall_world_positions, sample_segment_world_position,
    sample_segment_world_rotation, SegmentSampler, WallPositions, WALL_NORMAL_EPSILON,
};
pub use topology::Track;
