//! Errors raised by the drawing core.

use thiserror::Error;

/// Errors that can occur while dispatching gestures or rasterizing shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("unsupported shape kind: {0}")]
    UnsupportedShapeKind(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("a gesture is already in progress")]
    GestureInProgress,

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}
