//! Error Types
//!
//! The per-frame reflection core is pure computation over already-valid
//! inputs and has no recoverable-error taxonomy: a back-facing camera is a
//! defined skip, degenerate geometry produces undefined visual output, and
//! neither is reported here. [`ReflectorError`] only covers construction,
//! where the offscreen target is validated and acquired.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, ReflectorError>`.

use thiserror::Error;

/// The main error type for the reflector crate.
#[derive(Error, Debug)]
pub enum ReflectorError {
    /// The configured offscreen buffer resolution is unusable.
    #[error("Invalid reflection target size: {width}x{height}")]
    InvalidTargetSize {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// The host renderer failed to allocate the offscreen target.
    #[error("Reflection target allocation failed: {0}")]
    TargetAllocation(String),
}

/// Alias for `Result<T, ReflectorError>`.
pub type Result<T> = std::result::Result<T, ReflectorError>;
