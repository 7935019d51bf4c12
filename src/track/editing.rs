//! Structural edits requested by the host editor.
//!
//! None of these touch meshes of other nodes; callers are expected to route the
//! affected ids through `TrackRebuilder`, which has wrappers for the common cases.

use crate::math::{Pose, Quaternion};

use super::node::{NodeId, TrackNode};
use super::topology::Track;

/// Distance ahead of the last node at which `add_node_at_end` places a new node.
pub const NEW_NODE_DISTANCE: f32 = 10.0;

/// Node count used by an editor "reset".
pub const DEFAULT_RESET_NODES: usize = 4;

/// Neighbour spacing (squared) below which `constrain_rotation` leaves a node alone.
const MIN_CONSTRAINT_DELTA_SQR: f32 = 0.001;

impl Track {
    /// Appends a node and returns its id.
    pub fn push(&mut self, node: TrackNode) -> NodeId {
        self.insert(self.len(), node)
    }

    /// Inserts a node at `index` (clamped to the end) and returns its id.
    pub fn insert(&mut self, index: usize, mut node: TrackNode) -> NodeId {
        let index = index.min(self.nodes.len());
        let id = self.allocate_id();
        self.attach(&mut node, id);
        node.meshes.clear();

        self.nodes.insert(index, node);
        self.ids.insert(index, id);
        self.reindex_from(index);
        id
    }

    /// Removes a node and hands it back detached, with its meshes dropped.
    pub fn remove(&mut self, id: NodeId) -> Option<TrackNode> {
        let index = self.index_of(id)?;
        let mut node = self.nodes.remove(index);
        self.ids.remove(index);
        self.unindex(id);
        self.reindex_from(index);

        node.link = None;
        node.meshes.clear();
        Some(node)
    }

    /// Removes every node. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ids.clear();
        self.reindex_from(0);
    }

    /// Appends a copy of the last node, moved `NEW_NODE_DISTANCE` along its
    /// forward axis. An empty track gets a default node at the origin.
    pub fn add_node_at_end(&mut self) -> NodeId {
        let node = match self.nodes.last() {
            Some(last) => {
                let mut node = last.template();
                node.pose.position = last.pose.position + last.pose.forward() * NEW_NODE_DISTANCE;
                node
            }
            None => TrackNode::default(),
        };
        self.push(node)
    }

    /// Inserts a copy of `prev` halfway to its successor.
    ///
    /// Appends instead when `prev` is the last node. Returns `None` if `prev` is
    /// not in this track.
    pub fn insert_after(&mut self, prev: NodeId) -> Option<NodeId> {
        let prev_index = self.index_of(prev)?;
        let next_index = prev_index + 1;
        if next_index >= self.len() {
            return Some(self.add_node_at_end());
        }

        let (a, b) = (&self.nodes[prev_index], &self.nodes[next_index]);
        let mut node = a.template();
        node.pose = Pose::new(
            a.pose.position.slerp(b.pose.position, 0.5),
            a.pose.rotation.slerp(b.pose.rotation, 0.5),
        );
        Some(self.insert(next_index, node))
    }

    /// Replaces every node with `count` fresh nodes laid out in a line.
    pub fn reset(&mut self, count: usize) -> Vec<NodeId> {
        self.clear();
        (0..count).map(|_| self.add_node_at_end()).collect()
    }

    /// Turns a node to face along the chord between its neighbours, keeping its
    /// current up vector as the roll reference.
    ///
    /// Returns `false` when the node is unknown, has no distinct neighbours, or
    /// the neighbours nearly coincide.
    pub fn constrain_rotation(&mut self, id: NodeId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let prev = index.saturating_sub(1);
        let next = (index + 1).min(self.len() - 1);
        if prev == next {
            return false;
        }

        let forward = self.nodes[next].pose.position - self.nodes[prev].pose.position;
        if forward.sqr_magnitude() < MIN_CONSTRAINT_DELTA_SQR {
            return false;
        }

        let pose = &mut self.nodes[index].pose;
        pose.rotation = Quaternion::look_rotation(forward.normalize(), pose.up());
        true
    }
}
