//! Error types for mask tracing.

/// Convenience result type used across the tracer.
pub type TraceResult<T> = Result<T, TraceError>;

/// Problems with the mask or run-length input itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The flat mask does not hold `height * width` values.
    #[error("mask has {actual} values, expected {expected} ({height}x{width})")]
    MaskSize {
        expected: usize,
        actual: usize,
        height: usize,
        width: usize,
    },

    /// `height * width` does not fit the run-length counter.
    #[error("mask dimensions {height}x{width} are too large")]
    DimensionOverflow { height: usize, width: usize },

    /// Run lengths do not cover the mask exactly.
    #[error("run lengths sum to {actual}, expected {expected}")]
    RunSum { expected: u64, actual: u64 },

    /// A background run after the first entry is empty, so two foreground
    /// runs would touch.
    #[error("zero-length background run at index {index}")]
    EmptyRun { index: usize },
}

/// Top-level error for the tracing pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// Malformed dimensions or run lengths.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The boundary graph did not decompose into closed walks.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Display scale must be finite and positive.
    #[error("invalid scale {0}: must be finite and positive")]
    InvalidScale(f64),

    /// A path string could not be parsed.
    #[error("malformed path data: {0}")]
    PathSyntax(String),
}

impl TraceError {
    /// Build a [`TraceError::InvariantViolation`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Build a [`TraceError::PathSyntax`] value.
    pub fn path_syntax(msg: impl Into<String>) -> Self {
        Self::PathSyntax(msg.into())
    }
}
