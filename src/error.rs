use std::fmt::{self, Display};

/// Error type when validation or a checked conversion fails.
///
/// bsonpot errors contain no information about what went wrong, the
/// validator only answers pass or fail. Enable `tracing` at trace level
/// to see which rule rejected the input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Error;

/// Result type returned by the checked entry points.
#[cfg(not(feature = "error"))]
pub type Result<T> = std::result::Result<T, Error>;

/// Result type returned by the checked entry points.
#[cfg(feature = "error")]
pub type Result<T> = anyhow::Result<T>;

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("bsonpot error")
    }
}

impl std::error::Error for Error {}
