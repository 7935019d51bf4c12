//! Sampling of node cross-sections and of the segment surface between nodes.
//!
//! Segment queries follow a sentinel policy: asking for a node that is not in
//! the track, or for an end node, yields `Float3::ZERO`,
//! `Quaternion::IDENTITY` or an all-zero [`WallPositions`].

use crate::math::{catmull_rom, Float3, Quaternion};

use super::node::{NodeId, TrackNode};
use super::topology::Track;

/// Finite-difference step used for the wall normal.
pub const WALL_NORMAL_EPSILON: f32 = 0.05;

/// Base and top points of both side walls at one position along a segment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct WallPositions {
    pub left_base: Float3,
    pub left_top: Float3,
    pub right_base: Float3,
    pub right_top: Float3,
}

// --- Node cross-section ---

pub fn sample_cross_section_local_position(node: &TrackNode, u: f32) -> Float3 {
    node.cross_section.sample_local_position(u)
}

pub fn sample_cross_section_world_position(node: &TrackNode, u: f32) -> Float3 {
    node.pose
        .transform_point(node.cross_section.sample_local_position(u))
}

pub fn sample_cross_section_local_tangent(node: &TrackNode, u: f32, epsilon: f32) -> Float3 {
    node.cross_section.sample_local_tangent(u, epsilon)
}

pub fn sample_cross_section_world_tangent(node: &TrackNode, u: f32, epsilon: f32) -> Float3 {
    node.pose
        .transform_direction(node.cross_section.sample_local_tangent(u, epsilon))
}

// --- Segment ---

/// Surface of the segment owned by one node, bound to its four control nodes.
///
/// `t` runs along the track from the owner (0) to its successor (1), `u` across
/// the cross-section from left (0) to right (1). Local results are expressed in
/// the owner's frame.
#[derive(Debug, Clone, Copy)]
pub struct SegmentSampler<'a> {
    controls: [&'a TrackNode; 4],
}

impl<'a> SegmentSampler<'a> {
    /// `None` if `id` is not in the track or is an end node.
    pub fn new(track: &'a Track, id: NodeId) -> Option<Self> {
        track.segment_controls(id).map(|controls| Self { controls })
    }

    pub fn owner(&self) -> &'a TrackNode {
        self.controls[1]
    }

    pub fn world_position(&self, t: f32, u: f32) -> Float3 {
        let [p0, p1, p2, p3] = self
            .controls
            .map(|node| sample_cross_section_world_position(node, u));
        catmull_rom(t, p0, p1, p2, p3)
    }

    pub fn local_position(&self, t: f32, u: f32) -> Float3 {
        self.owner()
            .pose
            .inverse_transform_point(self.world_position(t, u))
    }

    /// Forward (along `t`) and right (along `u`) finite differences in world space.
    fn world_axes(&self, t: f32, u: f32, epsilon: f32) -> (Float3, Float3) {
        let forward = self.world_position(t + epsilon, u) - self.world_position(t - epsilon, u);
        let right = self.world_position(t, u + epsilon) - self.world_position(t, u - epsilon);
        (forward, right)
    }

    /// Orientation of the surface: forward along the track, up out of the
    /// surface (`forward x right`).
    pub fn world_rotation(&self, t: f32, u: f32, epsilon: f32) -> Quaternion {
        let (forward, right) = self.world_axes(t, u, epsilon);
        Quaternion::look_rotation(forward, forward.cross(right))
    }

    pub fn local_rotation(&self, t: f32, u: f32, epsilon: f32) -> Quaternion {
        let (forward, right) = self.world_axes(t, u, epsilon);
        let pose = &self.owner().pose;
        let forward = pose.inverse_transform_direction(forward);
        let right = pose.inverse_transform_direction(right);
        Quaternion::look_rotation(forward, forward.cross(right))
    }

    pub fn wall_world_positions(&self, t: f32) -> WallPositions {
        let [n0, n1, n2, n3] = self.controls;

        let left_base = self.world_position(t, 0.0);
        let left_normal = self
            .world_rotation(t, 0.0, WALL_NORMAL_EPSILON)
            .mul_vec(Float3::UP);
        let left_height = catmull_rom(
            t,
            n0.left_wall_height,
            n1.left_wall_height,
            n2.left_wall_height,
            n3.left_wall_height,
        );

        let right_base = self.world_position(t, 1.0);
        let right_normal = self
            .world_rotation(t, 1.0, WALL_NORMAL_EPSILON)
            .mul_vec(Float3::UP);
        let right_height = catmull_rom(
            t,
            n0.right_wall_height,
            n1.right_wall_height,
            n2.right_wall_height,
            n3.right_wall_height,
        );

        WallPositions {
            left_base,
            left_top: left_base + left_normal * left_height,
            right_base,
            right_top: right_base + right_normal * right_height,
        }
    }

    pub fn wall_local_positions(&self, t: f32) -> WallPositions {
        let world = self.wall_world_positions(t);
        let pose = &self.owner().pose;
        WallPositions {
            left_base: pose.inverse_transform_point(world.left_base),
            left_top: pose.inverse_transform_point(world.left_top),
            right_base: pose.inverse_transform_point(world.right_base),
            right_top: pose.inverse_transform_point(world.right_top),
        }
    }
}

pub fn sample_segment_world_position(track: &Track, id: NodeId, t: f32, u: f32) -> Float3 {
    SegmentSampler::new(track, id).map_or(Float3::ZERO, |s| s.world_position(t, u))
}

pub fn sample_segment_local_position(track: &Track, id: NodeId, t: f32, u: f32) -> Float3 {
    SegmentSampler::new(track, id).map_or(Float3::ZERO, |s| s.local_position(t, u))
}

pub fn sample_segment_world_rotation(
    track: &Track,
    id: NodeId,
    t: f32,
    u: f32,
    epsilon: f32,
) -> Quaternion {
    SegmentSampler::new(track, id).map_or(Quaternion::IDENTITY, |s| {
        s.world_rotation(t, u, epsilon)
    })
}

pub fn sample_segment_local_rotation(
    track: &Track,
    id: NodeId,
    t: f32,
    u: f32,
    epsilon: f32,
) -> Quaternion {
    SegmentSampler::new(track, id).map_or(Quaternion::IDENTITY, |s| {
        s.local_rotation(t, u, epsilon)
    })
}

pub fn sample_segment_wall_world_positions(track: &Track, id: NodeId, t: f32) -> WallPositions {
    SegmentSampler::new(track, id).map_or_else(WallPositions::default, |s| {
        s.wall_world_positions(t)
    })
}

pub fn sample_segment_wall_local_positions(track: &Track, id: NodeId, t: f32) -> WallPositions {
    SegmentSampler::new(track, id).map_or_else(WallPositions::default, |s| {
        s.wall_local_positions(t)
    })
}
