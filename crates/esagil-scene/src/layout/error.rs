use thiserror::Error;

use super::Axis;

/// Rejected layout input. Solvers never return partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("cell {cell}: {axis} span is zero")]
    EmptySpan { cell: usize, axis: Axis },

    #[error("cell {cell}: {axis} tracks {start}..{end} exceed the {declared} declared")]
    SpanOutOfBounds { cell: usize, axis: Axis, start: usize, end: usize, declared: usize },

    #[error("invalid {what}: {reason}")]
    InvalidConstraint { what: String, reason: &'static str },

    #[error("path has no control points")]
    EmptyPath,
}
