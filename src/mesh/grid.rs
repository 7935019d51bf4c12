use crate::math::{Float2, Float3};

use super::error::MeshError;

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Bounds {
    pub min: Float3,
    pub max: Float3,
}

impl Bounds {
    pub fn from_points(points: &[Float3]) -> Self {
        let Some((&first, rest)) = points.split_first() else {
            return Self::default();
        };
        rest.iter().fold(Self { min: first, max: first }, |b, &p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        })
    }

    pub fn center(&self) -> Float3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Float3 {
        (self.max - self.min) * 0.5
    }
}

/// Rows x columns vertex grid with a static triangulation.
///
/// Row `i` runs along the track and column `j` across it; vertex `(i, j)` lives
/// at index `i * columns + j`. Only positions change after construction, and
/// normals and bounds are derived from them on request.
#[derive(Debug, Clone)]
pub struct GridMesh {
    rows: usize,
    columns: usize,
    positions: Vec<Float3>,
    normals: Vec<Float3>,
    uvs: Vec<Float2>,
    indices: Vec<u32>,
    bounds: Bounds,
    revision: u32,
}

impl GridMesh {
    /// Allocates a grid with every vertex at the origin.
    ///
    /// UVs span [0, 1] in both directions, so `rows` and `columns` must each be
    /// at least 2.
    pub fn new(rows: usize, columns: usize) -> Result<Self, MeshError> {
        if rows < 2 || columns < 2 {
            return Err(MeshError::GridTooSmall { rows, columns });
        }

        let vertex_count = rows * columns;
        let mut uvs = Vec::with_capacity(vertex_count);
        for i in 0..rows {
            for j in 0..columns {
                uvs.push(Float2::new(
                    i as f32 / (rows - 1) as f32,
                    j as f32 / (columns - 1) as f32,
                ));
            }
        }

        let mut indices = Vec::with_capacity((rows - 1) * (columns - 1) * 6);
        for i in 0..rows - 1 {
            for j in 0..columns - 1 {
                let a = (i * columns + j) as u32;
                let b = ((i + 1) * columns + j) as u32;
                let c = (i * columns + j + 1) as u32;
                let d = ((i + 1) * columns + j + 1) as u32;
                indices.extend_from_slice(&[a, b, c, c, b, d]);
            }
        }

        Ok(Self {
            rows,
            columns,
            positions: vec![Float3::ZERO; vertex_count],
            normals: vec![Float3::ZERO; vertex_count],
            uvs,
            indices,
            bounds: Bounds::default(),
            revision: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    pub fn positions(&self) -> &[Float3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Float3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Float2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of times positions have been rewritten.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Overwrites every vertex position in place.
    ///
    /// Follow with [`recalculate_bounds`](Self::recalculate_bounds) and
    /// [`recalculate_normals`](Self::recalculate_normals); neither is implied.
    pub fn update_positions(&mut self, positions: &[Float3]) -> Result<(), MeshError> {
        if positions.len() != self.positions.len() {
            return Err(MeshError::VertexCountMismatch {
                expected: self.positions.len(),
                found: positions.len(),
            });
        }
        self.positions.copy_from_slice(positions);
        self.revision = self.revision.wrapping_add(1);
        Ok(())
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Bounds::from_points(&self.positions);
    }

    /// Smooth vertex normals: area-weighted face normals summed per vertex.
    pub fn recalculate_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = Float3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = self.positions[a];
            let face = (self.positions[b] - pa).cross(self.positions[c] - pa);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        self.normals.iter_mut().for_each(|n| *n = n.normalize());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_grid(rows: usize, columns: usize) -> GridMesh {
        let mut mesh = GridMesh::new(rows, columns).unwrap();
        let positions: Vec<Float3> = (0..rows)
            .flat_map(|i| (0..columns).map(move |j| Float3::new(j as f32, 0.0, i as f32)))
            .collect();
        mesh.update_positions(&positions).unwrap();
        mesh
    }

    #[test]
    fn test_segment_grid_counts() {
        let mesh = GridMesh::new(60, 20).unwrap();
        assert_eq!(mesh.vertex_count(), 1200);
        assert_eq!(mesh.triangle_count(), 2 * 59 * 19);
        assert_eq!(mesh.indices().len(), 6 * 59 * 19);
        assert_eq!(mesh.uvs().len(), 1200);
        assert!(mesh.positions().iter().all(|&p| p == Float3::ZERO));
    }

    #[test]
    fn test_uv_corners() {
        let mesh = GridMesh::new(60, 20).unwrap();
        assert_eq!(mesh.uvs()[0], Float2::new(0.0, 0.0));
        assert_eq!(mesh.uvs()[mesh.index_of(59, 19)], Float2::new(1.0, 1.0));
        assert_eq!(mesh.uvs()[mesh.index_of(59, 0)], Float2::new(1.0, 0.0));
    }

    #[test]
    fn test_first_quad_winding() {
        let mesh = GridMesh::new(3, 4).unwrap();
        assert_eq!(&mesh.indices()[..6], &[0, 4, 1, 1, 4, 5]);

        // Last quad: (1, 2) -> (2, 3)
        let n = mesh.indices().len();
        assert_eq!(&mesh.indices()[n - 6..], &[6, 10, 7, 7, 10, 11]);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = GridMesh::new(7, 5).unwrap();
        assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        assert_eq!(
            GridMesh::new(1, 20).unwrap_err(),
            MeshError::GridTooSmall {
                rows: 1,
                columns: 20
            }
        );
        assert!(GridMesh::new(60, 1).is_err());
        assert!(GridMesh::new(0, 0).is_err());
    }

    #[test]
    fn test_update_rejects_size_mismatch() {
        let mut mesh = GridMesh::new(2, 2).unwrap();
        let err = mesh.update_positions(&[Float3::UP; 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::VertexCountMismatch {
                expected: 4,
                found: 3
            }
        );
        assert_eq!(mesh.revision(), 0);
        assert!(mesh.positions().iter().all(|&p| p == Float3::ZERO));
    }

    #[test]
    fn test_update_keeps_topology() {
        let mut mesh = GridMesh::new(4, 3).unwrap();
        let indices = mesh.indices().to_vec();
        let uvs = mesh.uvs().to_vec();

        mesh.update_positions(&[Float3::new(1.0, 2.0, 3.0); 12]).unwrap();

        assert_eq!(mesh.indices(), indices.as_slice());
        assert_eq!(mesh.uvs(), uvs.as_slice());
        assert_eq!(mesh.revision(), 1);
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        let mut mesh = flat_grid(5, 4);
        mesh.recalculate_normals();
        for n in mesh.normals() {
            assert_relative_eq!(n.x, 0.0, epsilon = 1e-6);
            assert_relative_eq!(n.y, 1.0, epsilon = 1e-6);
            assert_relative_eq!(n.z, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_bounds() {
        let mut mesh = flat_grid(5, 4);
        mesh.recalculate_bounds();
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Float3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Float3::new(3.0, 0.0, 4.0));
        assert_eq!(bounds.center(), Float3::new(1.5, 0.0, 2.0));
        assert_eq!(bounds.extents(), Float3::new(1.5, 0.0, 2.0));
    }
}
