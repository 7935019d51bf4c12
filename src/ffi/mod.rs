//! Handle-based FFI for hosting a track editor from C/C#.
//!
//! A handle owns one `Track` and its `TrackRebuilder`. Node ids are the `u32`
//! inside `NodeId`. Flags named `world` select world space when non-zero and
//! the owning node's local frame otherwise.
//!
//! Segment samples follow the library's sentinel policy: end nodes and
//! unknown ids write `ZERO`/`IDENTITY` and still return `0`.
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Unknown node
//! - `-3`: Buffer overflow (resize and retry)
//! - `-5`: Invalid argument
//! - `-7`: Mesh precondition failed

use log::warn;

use crate::math::{Float2, Float3, Pose, Quaternion};
use crate::mesh::{Bounds, GridMesh, MeshError};
use crate::rebuild::{MeshResolution, RebuildConfig, TickStats, TrackRebuilder};
use crate::section::{CircularSection, CrossSection, LinearSection};
use crate::track::{self, NodeId, Track, TrackNode, WallPositions};

const OK: i32 = 0;
const ERR_NULL: i32 = -1;
const ERR_UNKNOWN_NODE: i32 = -2;
const ERR_BUFFER: i32 = -3;
const ERR_INVALID: i32 = -5;
const ERR_MESH: i32 = -7;

/// Opaque handle to a track editor.
pub type TrkHandle = *mut std::ffi::c_void;

struct TrackEditor {
    track: Track,
    rebuilder: TrackRebuilder,
}

/// Mesh selector for `trk_mesh_info` / `trk_copy_mesh`.
pub const TRK_MESH_SURFACE: u32 = 0;
pub const TRK_MESH_LEFT_WALL: u32 = 1;
pub const TRK_MESH_RIGHT_WALL: u32 = 2;

/// Mesh dimensions returned by `trk_mesh_info`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct TrkMeshInfo {
    /// `0` when the node currently has no such mesh; other fields are then zero.
    pub exists: i32,
    pub rows: u32,
    pub columns: u32,
    pub vertex_count: u32,
    pub index_count: u32,
    pub revision: u32,
    pub bounds: Bounds,
}

/// Create an empty track editor.
///
/// `resolution` may be null for the default 60x20x2 grids.
///
/// # Returns
/// - Valid handle on success (non-null)
/// - Null if the resolution cannot form a grid
///
/// # Safety
/// - `resolution` must be null or point to a valid `MeshResolution`
#[no_mangle]
pub unsafe extern "C" fn trk_create(resolution: *const MeshResolution) -> TrkHandle {
    let mut config = RebuildConfig::default();
    if !resolution.is_null() {
        config.resolution = *resolution;
    }
    match TrackRebuilder::new(config) {
        Ok(rebuilder) => Box::into_raw(Box::new(TrackEditor {
            track: Track::new(),
            rebuilder,
        })) as TrkHandle,
        Err(err) => {
            warn!("trk_create: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Free a track editor handle.
///
/// # Safety
/// - `handle` must be a valid handle returned by `trk_create`, or null
#[no_mangle]
pub unsafe extern "C" fn trk_free(handle: TrkHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut TrackEditor));
    }
}

/// Number of nodes, or `-1` for a null handle.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`, or null
#[no_mangle]
pub unsafe extern "C" fn trk_node_count(handle: TrkHandle) -> i64 {
    match editor(handle) {
        Some(editor) => editor.track.len() as i64,
        None => -1,
    }
}

// ============================================================================
// Structural edits
// ============================================================================

/// Append a node ahead of the last one. The new id is written to `out_id`.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out_id` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_add_node(handle: TrkHandle, out_id: *mut u32) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if out_id.is_null() {
        return ERR_NULL;
    }
    *out_id = editor.rebuilder.add_node_at_end(&mut editor.track).0;
    OK
}

/// Insert a node halfway between `prev` and its successor.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out_id` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_insert_after(handle: TrkHandle, prev: u32, out_id: *mut u32) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if out_id.is_null() {
        return ERR_NULL;
    }
    match editor
        .rebuilder
        .insert_after(&mut editor.track, NodeId(prev))
    {
        Some(id) => {
            *out_id = id.0;
            OK
        }
        None => ERR_UNKNOWN_NODE,
    }
}

/// Remove a node. Meshes around the gap are rebuilt before returning.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_remove_node(handle: TrkHandle, id: u32) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    match editor.rebuilder.remove_node(&mut editor.track, NodeId(id)) {
        Ok(Some(_)) => OK,
        Ok(None) => ERR_UNKNOWN_NODE,
        Err(err) => mesh_failure("trk_remove_node", err),
    }
}

/// Replace every node with `count` nodes in a straight line.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_reset(handle: TrkHandle, count: u32) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    editor.rebuilder.reset(&mut editor.track, count as usize);
    OK
}

/// Copy node ids in track order.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-3` if buffer too small (`count_written` contains required count)
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `buffer` must point to at least `capacity` `u32`s
/// - `count_written` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_node_ids(
    handle: TrkHandle,
    buffer: *mut u32,
    capacity: usize,
    count_written: *mut usize,
) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if count_written.is_null() {
        return ERR_NULL;
    }
    let ids = editor.track.ids();
    *count_written = ids.len();
    if ids.len() > capacity {
        return ERR_BUFFER;
    }
    if !ids.is_empty() && buffer.is_null() {
        return ERR_NULL;
    }
    for (i, id) in ids.iter().enumerate() {
        *buffer.add(i) = id.0;
    }
    OK
}

// ============================================================================
// Node properties
// ============================================================================
//
// Every setter queues the node for the next `trk_process_tick`.

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_set_node_pose(handle: TrkHandle, id: u32, pose: Pose) -> i32 {
    edit_node(handle, id, |node| {
        node.pose = Pose::new(pose.position, pose.rotation.normalize());
        OK
    })
}

/// Width is clamped to the editor range.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_set_linear_section(
    handle: TrkHandle,
    id: u32,
    offset: Float2,
    width: f32,
) -> i32 {
    if !(width.is_finite() && offset.x.is_finite() && offset.y.is_finite()) {
        return ERR_INVALID;
    }
    edit_node(handle, id, |node| {
        let mut section = LinearSection::new(offset, LinearSection::DEFAULT.width);
        section.set_width(width);
        node.cross_section = CrossSection::Linear(section);
        OK
    })
}

/// Radius is clamped; arc ends are clamped to `[0, 360]` and taken as given.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_set_circular_section(
    handle: TrkHandle,
    id: u32,
    offset: Float2,
    radius: f32,
    arc_min: f32,
    arc_max: f32,
) -> i32 {
    if ![offset.x, offset.y, radius, arc_min, arc_max]
        .iter()
        .all(|v| v.is_finite())
    {
        return ERR_INVALID;
    }
    edit_node(handle, id, |node| {
        let mut section = CircularSection::new(offset, CircularSection::DEFAULT.radius, 0.0, 360.0);
        section.set_radius(radius);
        section.set_arc(arc_min, arc_max);
        node.cross_section = CrossSection::Circular(section);
        OK
    })
}

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_set_wall_heights(
    handle: TrkHandle,
    id: u32,
    left: f32,
    right: f32,
) -> i32 {
    if !(left.is_finite() && right.is_finite()) {
        return ERR_INVALID;
    }
    edit_node(handle, id, |node| {
        node.left_wall_height = left;
        node.right_wall_height = right;
        OK
    })
}

// ============================================================================
// Rebuilding
// ============================================================================

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_mark_dirty(handle: TrkHandle, id: u32) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if editor.rebuilder.mark_dirty_id(&editor.track, NodeId(id)) {
        OK
    } else {
        ERR_UNKNOWN_NODE
    }
}

/// Rebuild every queued window.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `stats` must be null or a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_process_tick(handle: TrkHandle, stats: *mut TickStats) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    match editor.rebuilder.process_tick(&mut editor.track) {
        Ok(result) => {
            if !stats.is_null() {
                *stats = result;
            }
            OK
        }
        Err(err) => mesh_failure("trk_process_tick", err),
    }
}

/// `1` for end nodes, `0` otherwise, `-1` for a null handle.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_is_end_node(handle: TrkHandle, id: u32) -> i32 {
    match editor(handle) {
        Some(editor) => editor.track.is_end_node(NodeId(id)) as i32,
        None => ERR_NULL,
    }
}

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
#[no_mangle]
pub unsafe extern "C" fn trk_is_end_index(handle: TrkHandle, index: u32) -> i32 {
    match editor(handle) {
        Some(editor) => editor.track.is_end_index(index as usize) as i32,
        None => ERR_NULL,
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// Point on a node's cross-section.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_sample_cross_section_position(
    handle: TrkHandle,
    id: u32,
    u: f32,
    world: i32,
    out: *mut Float3,
) -> i32 {
    read_node(handle, id, out, |node| {
        if world != 0 {
            track::sample_cross_section_world_position(node, u)
        } else {
            track::sample_cross_section_local_position(node, u)
        }
    })
}

/// Unit tangent of a node's cross-section; zero when degenerate.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_sample_cross_section_tangent(
    handle: TrkHandle,
    id: u32,
    u: f32,
    epsilon: f32,
    world: i32,
    out: *mut Float3,
) -> i32 {
    read_node(handle, id, out, |node| {
        if world != 0 {
            track::sample_cross_section_world_tangent(node, u, epsilon)
        } else {
            track::sample_cross_section_local_tangent(node, u, epsilon)
        }
    })
}

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_sample_segment_position(
    handle: TrkHandle,
    id: u32,
    t: f32,
    u: f32,
    world: i32,
    out: *mut Float3,
) -> i32 {
    read_track(handle, out, |track| {
        if world != 0 {
            track::sample_segment_world_position(track, NodeId(id), t, u)
        } else {
            track::sample_segment_local_position(track, NodeId(id), t, u)
        }
    })
}

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_sample_segment_rotation(
    handle: TrkHandle,
    id: u32,
    t: f32,
    u: f32,
    epsilon: f32,
    world: i32,
    out: *mut Quaternion,
) -> i32 {
    read_track(handle, out, |track| {
        if world != 0 {
            track::sample_segment_world_rotation(track, NodeId(id), t, u, epsilon)
        } else {
            track::sample_segment_local_rotation(track, NodeId(id), t, u, epsilon)
        }
    })
}

/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_sample_segment_wall_positions(
    handle: TrkHandle,
    id: u32,
    t: f32,
    world: i32,
    out: *mut WallPositions,
) -> i32 {
    read_track(handle, out, |track| {
        if world != 0 {
            track::sample_segment_wall_world_positions(track, NodeId(id), t)
        } else {
            track::sample_segment_wall_local_positions(track, NodeId(id), t)
        }
    })
}

// ============================================================================
// Mesh readback
// ============================================================================

/// Describe one of a node's meshes so the caller can size its buffers.
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_mesh_info(
    handle: TrkHandle,
    id: u32,
    kind: u32,
    out: *mut TrkMeshInfo,
) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if out.is_null() {
        return ERR_NULL;
    }
    let Some(node) = editor.track.node(NodeId(id)) else {
        return ERR_UNKNOWN_NODE;
    };
    let Some(slot) = select_mesh(node, kind) else {
        return ERR_INVALID;
    };

    *out = match slot {
        Some(mesh) => TrkMeshInfo {
            exists: 1,
            rows: mesh.rows() as u32,
            columns: mesh.columns() as u32,
            vertex_count: mesh.vertex_count() as u32,
            index_count: mesh.indices().len() as u32,
            revision: mesh.revision(),
            bounds: mesh.bounds(),
        },
        None => TrkMeshInfo::default(),
    };
    OK
}

/// Copy a mesh's buffers. `normals` and `uvs` may be null to skip them.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-2` unknown node
/// - `-3` if a buffer is too small
/// - `-5` bad `kind`, or the node has no such mesh
///
/// # Safety
/// - `handle` must be a valid handle from `trk_create`
/// - `positions`, and `normals`/`uvs` when non-null, must hold `vertex_capacity` elements
/// - `indices` must hold `index_capacity` elements
#[no_mangle]
pub unsafe extern "C" fn trk_copy_mesh(
    handle: TrkHandle,
    id: u32,
    kind: u32,
    positions: *mut Float3,
    normals: *mut Float3,
    uvs: *mut Float2,
    vertex_capacity: usize,
    indices: *mut u32,
    index_capacity: usize,
) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if positions.is_null() || indices.is_null() {
        return ERR_NULL;
    }
    let Some(node) = editor.track.node(NodeId(id)) else {
        return ERR_UNKNOWN_NODE;
    };
    let Some(Some(mesh)) = select_mesh(node, kind) else {
        return ERR_INVALID;
    };
    if mesh.vertex_count() > vertex_capacity || mesh.indices().len() > index_capacity {
        return ERR_BUFFER;
    }

    copy_into(mesh.positions(), positions);
    copy_into(mesh.indices(), indices);
    if !normals.is_null() {
        copy_into(mesh.normals(), normals);
    }
    if !uvs.is_null() {
        copy_into(mesh.uvs(), uvs);
    }
    OK
}

// --- Helpers ---

unsafe fn editor<'a>(handle: TrkHandle) -> Option<&'a mut TrackEditor> {
    (handle as *mut TrackEditor).as_mut()
}

/// Applies `edit` to a node and queues it for rebuilding.
unsafe fn edit_node(handle: TrkHandle, id: u32, edit: impl FnOnce(&mut TrackNode) -> i32) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    let Some(node) = editor.track.node_mut(NodeId(id)) else {
        return ERR_UNKNOWN_NODE;
    };
    let code = edit(&mut *node);
    if code == OK {
        editor.rebuilder.mark_dirty(node);
    }
    code
}

unsafe fn read_node<T>(
    handle: TrkHandle,
    id: u32,
    out: *mut T,
    sample: impl FnOnce(&TrackNode) -> T,
) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if out.is_null() {
        return ERR_NULL;
    }
    match editor.track.node(NodeId(id)) {
        Some(node) => {
            *out = sample(node);
            OK
        }
        None => ERR_UNKNOWN_NODE,
    }
}

unsafe fn read_track<T>(handle: TrkHandle, out: *mut T, sample: impl FnOnce(&Track) -> T) -> i32 {
    let Some(editor) = editor(handle) else {
        return ERR_NULL;
    };
    if out.is_null() {
        return ERR_NULL;
    }
    *out = sample(&editor.track);
    OK
}

/// Outer `None` for an unknown `kind`, inner `None` when the mesh does not exist.
fn select_mesh(node: &TrackNode, kind: u32) -> Option<Option<&GridMesh>> {
    let meshes = node.meshes();
    let slot = match kind {
        TRK_MESH_SURFACE => &meshes.surface,
        TRK_MESH_LEFT_WALL => &meshes.left_wall,
        TRK_MESH_RIGHT_WALL => &meshes.right_wall,
        _ => return None,
    };
    Some(slot.as_ref())
}

unsafe fn copy_into<T: Copy>(src: &[T], dst: *mut T) {
    std::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
}

fn mesh_failure(call: &str, err: MeshError) -> i32 {
    warn!("{call}: {err}");
    ERR_MESH
}
