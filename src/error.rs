//! Engine error types.
//!
//! Every variant here is a caller contract violation (a bug in the
//! host, not user input); malformed user input is absorbed by the
//! engine without an error, and degenerate geometry yields defined
//! zero/`None` results instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    #[error("shape is already closed; no more vertices can be added")]
    ShapeClosed,

    #[error("shape is not closed; walls do not exist yet")]
    ShapeOpen,

    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexOutOfRange { index: usize, count: usize },

    #[error("wall index {index} out of range ({count} walls)")]
    WallOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, MeasureError>;
