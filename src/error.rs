//! Defines [`GeoCodecError`], representing all errors returned by this crate.

use std::io::ErrorKind;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoCodecError {
    /// Malformed structural data: unsupported version byte, truncated buffer, inconsistent
    /// counts or indices.
    #[error("Invalid serialized geometry: {0}")]
    Format(String),

    /// A recognized shape kind that cannot be represented on one side of the codec.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// Geography-only structural rule violated by a polygon-like shape.
    #[error("{0}")]
    Topology(String),

    /// The injected geometry factory refused to build a value.
    #[error("Geometry factory error: {0}")]
    Factory(String),

    /// [std::io::Error] raised by a caller supplied writer
    #[error(transparent)]
    IOError(std::io::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoCodecError>;

impl From<std::io::Error> for GeoCodecError {
    /// Reading past the end of an in-memory buffer means the payload is truncated, which is a
    /// format problem rather than an I/O failure.
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof => {
                GeoCodecError::Format(format!("unexpected end of buffer: {err}"))
            }
            _ => GeoCodecError::IOError(err),
        }
    }
}
