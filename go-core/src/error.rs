use thiserror::Error;

/// A point in "A1" notation could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid point: {0}")]
pub struct InvalidPoint(pub String);

/// A time specification such as `"30+5/25"` could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTime {
    #[error("Invalid time specification: {0}")]
    Malformed(String),
    #[error("Pre byoyomi time must be positive")]
    PreByoyomiNotPositive,
    #[error("Byoyomi time must be positive")]
    ByoyomiNotPositive,
    #[error("Moves for byoyomi time must be positive")]
    MovesNotPositive,
}
