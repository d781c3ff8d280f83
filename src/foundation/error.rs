/// Convenience result type used across polypaint.
pub type PaintResult<T> = Result<T, PaintError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Lookup misses (stale surface ids, out-of-range brush indices) are not errors; those
/// APIs return `None`/`false` instead.
#[derive(thiserror::Error, Debug)]
pub enum PaintError {
    /// Malformed hex color string.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Tool name outside `paint`, `spray`, `pen`, `fill`, `eraser`.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Pixel coordinate outside a buffer.
    #[error("out of bounds: ({x}, {y}) outside {width}x{height}")]
    OutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },

    /// Invalid configuration, script or buffer shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaintError {
    /// Build a [`PaintError::InvalidColor`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Build a [`PaintError::UnknownTool`] value.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Build a [`PaintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
