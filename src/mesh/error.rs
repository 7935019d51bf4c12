/// Precondition failures when creating or writing a grid mesh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("grid mesh needs at least 2x2 vertices, got {rows}x{columns}")]
    GridTooSmall { rows: usize, columns: usize },
    #[error("vertex count mismatch: expected {expected}, found {found}")]
    VertexCountMismatch { expected: usize, found: usize },
}
