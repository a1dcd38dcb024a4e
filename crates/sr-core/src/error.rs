use thiserror::Error;

use crate::format::PixelFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("out of bounds")]
    OutOfBounds,
    #[error("invalid stride")]
    InvalidStride,
    #[error("pixel format mismatch: expected {expected}, got {actual}")]
    FormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },
    #[error("filter kind {filter} cannot be applied to {format} rasters")]
    FilterMismatch {
        filter: &'static str,
        format: PixelFormat,
    },
    #[error("filter length must be non-zero")]
    ZeroFilterLength,
    #[error("coefficient table has {actual} entries, expected {expected}")]
    TableLength { expected: usize, actual: usize },
    #[error("filter table covers {actual} destination rows, need {required}")]
    TableTooShort { required: usize, actual: usize },
    #[error("coefficient row {row} has no contributing tap")]
    ZeroWeightRow { row: usize },
    #[error("source has {actual} rows, destination needs {required}")]
    SourceTooShort { required: usize, actual: usize },
    #[error("source raster has an empty filtered axis")]
    EmptySource,
}
