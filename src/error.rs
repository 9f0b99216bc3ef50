use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A shape with zero rows or zero columns (or one that overflows `usize`).
    InvalidShape(String),
    /// Two shapes are incompatible for the requested operation.
    DimensionMismatch(String),
    /// A row, column, or cell index lies outside the matrix.
    IndexOutOfRange(String),
    /// Raw input that cannot describe a matrix (jagged grid, bad buffer length, ...).
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidShape(msg) => write!(f, "invalid shape: {msg}"),
            Error::DimensionMismatch(msg) => write!(f, "dimension mismatch: {msg}"),
            Error::IndexOutOfRange(msg) => write!(f, "index out of range: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
