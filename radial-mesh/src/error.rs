//! Error types for mesh generation

use thiserror::Error;

/// Errors returned when regenerating geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Generated vertex count does not fit in 16-bit indices
    #[error("mesh has {vertex_count} vertices, exceeds maximum {max} for u16 indices")]
    IndexOverflow { vertex_count: usize, max: usize },
}
