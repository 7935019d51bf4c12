use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use super::node::{NodeId, NodeLink, TrackId, TrackNode};

static NEXT_TRACK_ID: AtomicU32 = AtomicU32::new(1);

/// Ordered list of nodes; list order is spatial order along the path.
///
/// A segment belongs to node `i` and spans control nodes `i-1..=i+2`, so it only
/// exists for `i` in `1..=len-3`. Every other node is an end node.
#[derive(Debug)]
pub struct Track {
    id: TrackId,
    // Node SoA: ids[i] is the id of nodes[i]
    pub(super) nodes: Vec<TrackNode>,
    pub(super) ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    next_node_id: u32,
}

impl Track {
    pub fn new() -> Self {
        Self {
            id: TrackId(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed)),
            nodes: Vec::new(),
            ids: Vec::new(),
            index: HashMap::new(),
            next_node_id: 0,
        }
    }

    /// Builds a track from detached nodes, in order.
    pub fn from_nodes(nodes: impl IntoIterator<Item = TrackNode>) -> Self {
        let mut track = Self::new();
        for node in nodes {
            track.push(node);
        }
        track
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TrackNode] {
        &self.nodes
    }

    /// Node ids in track order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&TrackNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TrackNode> {
        let i = self.index_of(id)?;
        Some(&mut self.nodes[i])
    }

    pub fn node_at(&self, index: usize) -> Option<&TrackNode> {
        self.nodes.get(index)
    }

    pub fn node_at_mut(&mut self, index: usize) -> Option<&mut TrackNode> {
        self.nodes.get_mut(index)
    }

    pub fn id_at(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.ids.last().copied()
    }

    /// True for index 0 and the last two indices; with fewer than three nodes
    /// every index is an end node.
    pub fn is_end_index(&self, index: usize) -> bool {
        index == 0 || index >= self.nodes.len().saturating_sub(2)
    }

    /// Identity form of [`is_end_index`](Self::is_end_index).
    ///
    /// Only compares against the first, second-last and last ids, which is
    /// sufficient for members. A non-member is reported as an end node only
    /// when the track has fewer than three nodes.
    pub fn is_end_node(&self, id: NodeId) -> bool {
        let n = self.ids.len();
        if n < 3 {
            return true;
        }
        id == self.ids[0] || id == self.ids[n - 2] || id == self.ids[n - 1]
    }

    pub fn segment_count(&self) -> usize {
        self.nodes.len().saturating_sub(3)
    }

    /// The four control nodes of the segment owned by `id`, or `None` for
    /// non-members and end nodes.
    pub fn segment_controls(&self, id: NodeId) -> Option<[&TrackNode; 4]> {
        let i = self.index_of(id)?;
        if self.is_end_index(i) {
            return None;
        }
        let n = &self.nodes;
        Some([&n[i - 1], &n[i], &n[i + 1], &n[i + 2]])
    }

    pub(super) fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    pub(super) fn attach(&self, node: &mut TrackNode, id: NodeId) {
        node.link = Some(NodeLink {
            track: self.id,
            id,
        });
    }

    /// Rebuilds the id -> index map from `ids[from..]`.
    pub(super) fn reindex_from(&mut self, from: usize) {
        if from == 0 {
            self.index.clear();
        }
        for (i, &id) in self.ids.iter().enumerate().skip(from) {
            self.index.insert(id, i);
        }
    }

    pub(super) fn unindex(&mut self, id: NodeId) {
        self.index.remove(&id);
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Float3;

    fn track_of(n: usize) -> Track {
        Track::from_nodes((0..n).map(|i| TrackNode::at(Float3::new(i as f32 * 10.0, 0.0, 0.0))))
    }

    #[test]
    fn test_end_index_boundaries() {
        let track = track_of(6);
        assert!(track.is_end_index(0));
        assert!(!track.is_end_index(1));
        assert!(!track.is_end_index(3));
        assert!(track.is_end_index(4));
        assert!(track.is_end_index(5));
        assert_eq!(track.segment_count(), 3);
    }

    #[test]
    fn test_end_index_far_past_the_end() {
        assert!(Track::new().is_end_index(usize::MAX));
        assert!(track_of(6).is_end_index(usize::MAX));
        assert!(track_of(6).is_end_index(100));
    }

    #[test]
    fn test_small_tracks_are_all_ends() {
        for n in 0..3 {
            let track = track_of(n);
            for i in 0..n {
                assert!(track.is_end_index(i));
                assert!(track.is_end_node(track.ids()[i]));
            }
            assert_eq!(track.segment_count(), 0);
        }
    }

    #[test]
    fn test_index_and_identity_predicates_agree() {
        for n in 0..9 {
            let track = track_of(n);
            for (i, &id) in track.ids().iter().enumerate() {
                assert_eq!(
                    track.is_end_index(i),
                    track.is_end_node(id),
                    "track of {n}, index {i}"
                );
            }
        }
    }

    #[test]
    fn test_ids_are_linked_and_indexed() {
        let track = track_of(4);
        for (i, &id) in track.ids().iter().enumerate() {
            assert_eq!(track.index_of(id), Some(i));
            let node = track.node(id).unwrap();
            assert_eq!(node.id(), Some(id));
            assert_eq!(node.link().unwrap().track, track.id());
        }
        assert_eq!(track.index_of(NodeId(99)), None);
    }

    #[test]
    fn test_segment_controls() {
        let track = track_of(5);
        let id = track.ids()[2];
        let controls = track.segment_controls(id).unwrap();
        assert_eq!(controls[0].pose.position.x, 10.0);
        assert_eq!(controls[3].pose.position.x, 40.0);

        assert!(track.segment_controls(track.ids()[0]).is_none());
        assert!(track.segment_controls(track.ids()[3]).is_none());
        assert!(track.segment_controls(NodeId(1234)).is_none());
    }

    #[test]
    fn test_track_ids_are_unique() {
        assert_ne!(Track::new().id(), Track::new().id());
    }
}
