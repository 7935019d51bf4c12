use crate::math::{Float3, Pose, Quaternion};
use crate::mesh::SegmentMeshes;
use crate::section::CrossSection;

/// Identity of a node within its track. Never reused by the same track.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Identity of a track instance.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(pub u32);

/// Non-owning back-reference from a node to the track that holds it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeLink {
    pub track: TrackId,
    pub id: NodeId,
}

pub const DEFAULT_WALL_HEIGHT: f32 = 0.5;

/// Control point of a track.
///
/// Geometry fields are public so hosts can edit them freely; any edit must be
/// followed by `TrackRebuilder::mark_dirty` for the meshes to catch up.
#[derive(Debug, Clone)]
pub struct TrackNode {
    pub pose: Pose,
    pub cross_section: CrossSection,
    pub left_wall_height: f32,
    pub right_wall_height: f32,
    /// Set by hosts when the pose was moved interactively; consumed by
    /// `TrackRebuilder::process_selection`.
    pub changed: bool,
    pub(crate) meshes: SegmentMeshes,
    pub(crate) link: Option<NodeLink>,
}

impl TrackNode {
    /// Creates a detached node. It becomes part of a track through
    /// `Track::push` or `Track::insert`.
    pub fn new(pose: Pose, cross_section: CrossSection) -> Self {
        Self {
            pose,
            cross_section,
            left_wall_height: DEFAULT_WALL_HEIGHT,
            right_wall_height: DEFAULT_WALL_HEIGHT,
            changed: false,
            meshes: SegmentMeshes::default(),
            link: None,
        }
    }

    pub fn at(position: Float3) -> Self {
        Self::new(Pose::at(position), CrossSection::default())
    }

    pub fn with_rotation(mut self, rotation: Quaternion) -> Self {
        self.pose.rotation = rotation;
        self
    }

    pub fn with_cross_section(mut self, cross_section: impl Into<CrossSection>) -> Self {
        self.cross_section = cross_section.into();
        self
    }

    pub fn with_wall_heights(mut self, left: f32, right: f32) -> Self {
        self.left_wall_height = left;
        self.right_wall_height = right;
        self
    }

    /// A detached copy of this node's editable fields, without meshes.
    pub fn template(&self) -> Self {
        Self {
            pose: self.pose,
            cross_section: self.cross_section,
            left_wall_height: self.left_wall_height,
            right_wall_height: self.right_wall_height,
            changed: false,
            meshes: SegmentMeshes::default(),
            link: None,
        }
    }

    pub fn link(&self) -> Option<NodeLink> {
        self.link
    }

    /// The node's id, or `None` while detached.
    pub fn id(&self) -> Option<NodeId> {
        self.link.map(|link| link.id)
    }

    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }

    pub fn meshes(&self) -> &SegmentMeshes {
        &self.meshes
    }
}

impl Default for TrackNode {
    fn default() -> Self {
        Self::new(Pose::DEFAULT, CrossSection::default())
    }
}
