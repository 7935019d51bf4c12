use crate::mesh::MeshError;

/// Vertex counts of the generated grids.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MeshResolution {
    /// Rows along the segment, shared by the surface and both walls.
    pub segment_length_verts: usize,
    /// Columns across the surface.
    pub segment_width_verts: usize,
    /// Columns up each wall.
    pub wall_height_verts: usize,
}

impl MeshResolution {
    pub const DEFAULT: Self = Self {
        segment_length_verts: 60,
        segment_width_verts: 20,
        wall_height_verts: 2,
    };

    pub const fn surface(&self) -> (usize, usize) {
        (self.segment_length_verts, self.segment_width_verts)
    }

    pub const fn wall(&self) -> (usize, usize) {
        (self.segment_length_verts, self.wall_height_verts)
    }
}

impl Default for MeshResolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RebuildConfig {
    pub resolution: MeshResolution,
    /// Whether `process_selection` re-aims moved nodes along their neighbour chord.
    pub constrain_selected_rotation: bool,
}

impl RebuildConfig {
    pub const DEFAULT: Self = Self {
        resolution: MeshResolution::DEFAULT,
        constrain_selected_rotation: true,
    };

    /// Rejects resolutions that cannot form a grid.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (rows, columns) in [self.resolution.surface(), self.resolution.wall()] {
            if rows < 2 || columns < 2 {
                return Err(MeshError::GridTooSmall { rows, columns });
            }
        }
        Ok(())
    }
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
