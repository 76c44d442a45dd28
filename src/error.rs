use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Shapes of the operands (or of a supplied grid) disagree.
    #[error("dimension mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    Dimension {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("sample count mismatch: {inputs} inputs vs {targets} targets")]
    SampleCount { inputs: usize, targets: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn dimension(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        Error::Dimension { op, left, right }
    }

    /// True for shape violations raised by matrix operations.
    pub fn is_dimension(&self) -> bool {
        matches!(self, Error::Dimension { .. })
    }
}
