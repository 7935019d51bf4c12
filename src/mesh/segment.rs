use crate::math::Float3;

use super::error::MeshError;
use super::grid::GridMesh;

/// The three meshes generated for a node's segment.
///
/// `None` means the mesh does not exist; end nodes always have all three empty
/// once they have been rebuilt.
#[derive(Debug, Clone, Default)]
pub struct SegmentMeshes {
    pub surface: Option<GridMesh>,
    pub left_wall: Option<GridMesh>,
    pub right_wall: Option<GridMesh>,
}

impl SegmentMeshes {
    pub fn is_empty(&self) -> bool {
        self.surface.is_none() && self.left_wall.is_none() && self.right_wall.is_none()
    }

    /// Drops every mesh. Returns how many existed.
    pub fn clear(&mut self) -> usize {
        [&mut self.surface, &mut self.left_wall, &mut self.right_wall]
            .into_iter()
            .filter_map(Option::take)
            .count()
    }
}

/// Writes `positions` into the mesh in `slot`, creating it first when the slot is
/// empty or holds a grid of different dimensions. Bounds and normals are
/// recalculated afterwards.
///
/// Returns `true` if a new mesh was allocated.
pub fn create_or_update(
    slot: &mut Option<GridMesh>,
    rows: usize,
    columns: usize,
    positions: &[Float3],
) -> Result<bool, MeshError> {
    let reusable = matches!(slot, Some(mesh) if mesh.rows() == rows && mesh.columns() == columns);
    if !reusable {
        *slot = Some(GridMesh::new(rows, columns)?);
        log::trace!("allocated {rows}x{columns} grid mesh");
    }

    if let Some(mesh) = slot.as_mut() {
        mesh.update_positions(positions)?;
        mesh.recalculate_bounds();
        mesh.recalculate_normals();
    }
    Ok(!reusable)
}
