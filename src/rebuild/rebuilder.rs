//! Dirty-region mesh rebuilding.
//!
//! Moving a node reshapes every segment whose four control nodes include it, so
//! a dirty node at index `i` expands to the window `[i-2, i+2)`. Windows are
//! rebuilt on the next [`TrackRebuilder::process_tick`].

use std::collections::{BTreeSet, HashSet};
use std::mem;
use std::ops::Range;

use log::{debug, trace, warn};

use crate::math::Float3;
use crate::mesh::{create_or_update, MeshError};
use crate::track::{NodeId, NodeLink, SegmentSampler, Track, TrackNode};

use super::config::RebuildConfig;

/// Summary of one [`TrackRebuilder::process_tick`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TickStats {
    /// Dirty nodes whose window was rebuilt.
    pub processed: usize,
    /// Dirty nodes no longer in the track.
    pub skipped: usize,
    /// Distinct node slots rebuilt.
    pub segments: usize,
}

/// Tracks which nodes need their neighbourhood regenerated and regenerates it.
///
/// A tick works on a snapshot of the queue taken when it starts. Nodes marked
/// after that are picked up by the next tick.
#[derive(Debug)]
pub struct TrackRebuilder {
    config: RebuildConfig,
    dirty: HashSet<NodeLink>,
}

impl TrackRebuilder {
    pub fn new(config: RebuildConfig) -> Result<Self, MeshError> {
        config.validate()?;
        Ok(Self {
            config,
            dirty: HashSet::new(),
        })
    }

    pub fn config(&self) -> &RebuildConfig {
        &self.config
    }

    /// Queues `node` for rebuilding. Detached nodes are ignored and return `false`.
    pub fn mark_dirty(&mut self, node: &TrackNode) -> bool {
        match node.link() {
            Some(link) => {
                self.dirty.insert(link);
                true
            }
            None => false,
        }
    }

    /// Queues the node with `id` in `track`. Returns `false` for non-members.
    pub fn mark_dirty_id(&mut self, track: &Track, id: NodeId) -> bool {
        track.node(id).is_some_and(|node| self.mark_dirty(node))
    }

    pub fn is_dirty(&self, node: &TrackNode) -> bool {
        node.link().is_some_and(|link| self.dirty.contains(&link))
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Rebuilds every segment influenced by the node `id` and returns the index
    /// range that was touched. Unknown ids touch nothing.
    ///
    /// End nodes in the window lose their meshes; segment nodes get theirs
    /// created on first touch and refreshed in place afterwards.
    pub fn rebuild_affected(
        &self,
        track: &mut Track,
        id: NodeId,
    ) -> Result<Range<usize>, MeshError> {
        let Some(index) = track.index_of(id) else {
            return Ok(0..0);
        };
        let window = affected_window(index, track.len());
        for i in window.clone() {
            self.rebuild_segment(track, i)?;
        }
        debug!("rebuilt window {window:?} around node {}", id.0);
        Ok(window)
    }

    /// Rebuilds the union of the windows of every queued node, each segment
    /// once, then empties the queue.
    ///
    /// The queue is emptied even when a rebuild fails. Marks made after this
    /// returns stay queued for the next call.
    pub fn process_tick(&mut self, track: &mut Track) -> Result<TickStats, MeshError> {
        let mut stats = TickStats::default();
        if self.dirty.is_empty() {
            return Ok(stats);
        }

        let mut indices = BTreeSet::new();
        for link in mem::take(&mut self.dirty) {
            let index = if link.track == track.id() {
                track.index_of(link.id)
            } else {
                None
            };
            let Some(index) = index else {
                warn!("dirty node {} is no longer in track {}", link.id.0, track.id().0);
                stats.skipped += 1;
                continue;
            };
            let window = affected_window(index, track.len());
            debug!("node {} at {index} dirties {window:?}", link.id.0);
            indices.extend(window);
            stats.processed += 1;
        }

        for &index in &indices {
            self.rebuild_segment(track, index)?;
        }
        stats.segments = indices.len();

        debug!(
            "tick: {} processed, {} skipped, {} segments",
            stats.processed, stats.skipped, stats.segments
        );
        Ok(stats)
    }

    /// Picks up nodes the host moved interactively.
    ///
    /// Every selected node with its `changed` flag set is optionally re-aimed
    /// along its neighbour chord, queued and has the flag cleared. The queue is
    /// then processed.
    pub fn process_selection(
        &mut self,
        track: &mut Track,
        selection: &[NodeId],
    ) -> Result<TickStats, MeshError> {
        for &id in selection {
            if !track.node(id).is_some_and(|node| node.changed) {
                continue;
            }
            if self.config.constrain_selected_rotation {
                track.constrain_rotation(id);
            }
            if let Some(node) = track.node_mut(id) {
                node.changed = false;
                self.mark_dirty(node);
            }
        }
        self.process_tick(track)
    }

    // --- Structural edits ---

    /// Appends a node via [`Track::add_node_at_end`] and queues it.
    pub fn add_node_at_end(&mut self, track: &mut Track) -> NodeId {
        let id = track.add_node_at_end();
        self.mark_dirty_id(track, id);
        id
    }

    /// Inserts a node via [`Track::insert_after`] and queues it.
    pub fn insert_after(&mut self, track: &mut Track, prev: NodeId) -> Option<NodeId> {
        let id = track.insert_after(prev)?;
        self.mark_dirty_id(track, id);
        Some(id)
    }

    /// Removes a node and immediately rebuilds around the node that now holds
    /// its index (clamped to the new end). Returns the removed node.
    pub fn remove_node(
        &mut self,
        track: &mut Track,
        id: NodeId,
    ) -> Result<Option<TrackNode>, MeshError> {
        let Some(index) = track.index_of(id) else {
            return Ok(None);
        };
        let removed = track.remove(id);
        self.dirty.remove(&NodeLink {
            track: track.id(),
            id,
        });

        if let Some(occupant) = track.id_at(index.min(track.len().saturating_sub(1))) {
            self.rebuild_affected(track, occupant)?;
        }
        Ok(removed)
    }

    /// Queues the predecessor of each index a host removed from the track
    /// behind the rebuilder's back. `removed` holds indices as they were before
    /// removal.
    pub fn on_nodes_removed(&mut self, track: &Track, removed: &[usize]) {
        for &index in removed {
            let prev = index.saturating_sub(1);
            if let Some(node) = track.node_at(prev) {
                self.mark_dirty(node);
            }
        }
    }

    /// Replaces the track with `count` fresh nodes and queues all of them.
    pub fn reset(&mut self, track: &mut Track, count: usize) -> Vec<NodeId> {
        self.dirty.clear();
        let ids = track.reset(count);
        for &id in &ids {
            self.mark_dirty_id(track, id);
        }
        ids
    }

    // --- Mesh generation ---

    fn rebuild_segment(&self, track: &mut Track, index: usize) -> Result<(), MeshError> {
        if track.is_end_index(index) {
            if let Some(node) = track.node_at_mut(index) {
                let destroyed = node.meshes.clear();
                if destroyed > 0 {
                    trace!("destroyed {destroyed} meshes on end node at {index}");
                }
            }
            return Ok(());
        }

        let Some(id) = track.id_at(index) else {
            return Ok(());
        };
        let (surface, left, right) = match SegmentSampler::new(track, id) {
            Some(sampler) => {
                let (left, right) = self.sample_walls(&sampler);
                (self.sample_surface(&sampler), left, right)
            }
            None => return Ok(()),
        };

        let resolution = self.config.resolution;
        let (rows, columns) = resolution.surface();
        let (_, wall_columns) = resolution.wall();
        if let Some(node) = track.node_at_mut(index) {
            let meshes = &mut node.meshes;
            create_or_update(&mut meshes.surface, rows, columns, &surface)?;
            create_or_update(&mut meshes.left_wall, rows, wall_columns, &left)?;
            create_or_update(&mut meshes.right_wall, rows, wall_columns, &right)?;
        }
        Ok(())
    }

    /// Row-major surface vertices in the owner's local frame.
    fn sample_surface(&self, sampler: &SegmentSampler<'_>) -> Vec<Float3> {
        let (rows, columns) = self.config.resolution.surface();
        let mut positions = Vec::with_capacity(rows * columns);
        for n in 0..rows {
            let t = n as f32 / (rows - 1) as f32;
            for m in 0..columns {
                let u = m as f32 / (columns - 1) as f32;
                positions.push(sampler.local_position(t, u));
            }
        }
        positions
    }

    /// Left wall rows run top to base, right wall rows base to top, so both
    /// walls face the track surface.
    fn sample_walls(&self, sampler: &SegmentSampler<'_>) -> (Vec<Float3>, Vec<Float3>) {
        let (rows, columns) = self.config.resolution.wall();
        let mut left = Vec::with_capacity(rows * columns);
        let mut right = Vec::with_capacity(rows * columns);
        for n in 0..rows {
            let t = n as f32 / (rows - 1) as f32;
            let walls = sampler.wall_local_positions(t);
            for j in 0..columns {
                let s = j as f32 / (columns - 1) as f32;
                left.push(walls.left_top.lerp(walls.left_base, s));
                right.push(walls.right_base.lerp(walls.right_top, s));
            }
        }
        (left, right)
    }
}

/// Indices of nodes whose segment uses the node at `index` as a control point.
fn affected_window(index: usize, len: usize) -> Range<usize> {
    index.saturating_sub(2)..(index + 2).min(len)
}
