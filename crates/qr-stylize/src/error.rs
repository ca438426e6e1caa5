//! Unified error type for the qr-stylize public API.
//!
//! Precondition violations (divisibility, size mismatch, buffer length) are
//! reported immediately rather than silently producing mismatched output.
//! A failure at any pipeline stage aborts the whole run — no stage is
//! retried, no partial result is returned.

use crate::color::ParseColorError;
use thiserror::Error;

/// Errors surfaced by buffer constructors, geometric/mask operators, and the
/// pipeline orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StylizeError {
    /// A geometric precondition failed, e.g. thinning a buffer whose
    /// dimensions are not a multiple of the block size.
    #[error("dimensions {width}x{height} are not divisible by {divisor}")]
    Dimension { width: u32, height: u32, divisor: u32 },

    /// Two buffers that must share dimensions do not.
    #[error("size mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    SizeMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// Raw channel data does not match `width * height * 4`.
    #[error("pixel data length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The external module-matrix generator failed. Propagated verbatim;
    /// the pipeline aborts with no partial output.
    #[error("matrix generation failed: {0}")]
    MatrixGeneration(String),

    /// A color parameter was not a well-formed `#rrggbb` string.
    #[error(transparent)]
    ParseColor(#[from] ParseColorError),
}
