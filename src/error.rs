/// Usage errors raised by the engine.
///
/// These are caller mistakes, not game conditions; the engine has no I/O to fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("invalid board size {size}: must be within {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },
    #[error("invalid tile value {value}: must be 0 or a power of two >= 2")]
    InvalidTileValue { value: u32 },
    #[error("expected {expected} tile values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

