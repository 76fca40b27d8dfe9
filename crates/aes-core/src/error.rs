//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

use crate::key::KeyPadding;
use crate::matrix::Shape;

/// Errors raised by matrix operations, round transforms, key expansion and the cipher driver.
///
/// Every operation validates its operands before touching any state, so an `Err` always means
/// the inputs were left unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AesError {
    /// Matrix shapes are incompatible for the requested operation.
    #[error("{context}: dimension mismatch (expected {expected}, got {actual})")]
    Dimension {
        /// Operation that rejected the operand.
        context: &'static str,
        /// Shape the operation required.
        expected: Shape,
        /// Shape that was supplied.
        actual: Shape,
    },

    /// A row or column index lies outside the matrix.
    #[error("{context}: index {index} out of range (len {len})")]
    OutOfRange {
        /// Operation that rejected the index.
        context: &'static str,
        /// Requested row or column index.
        index: usize,
        /// Number of rows or columns available.
        len: usize,
    },

    /// The requested shape has more elements than fit in memory addressing.
    #[error("{context}: {shape} matrix is too large")]
    TooLarge {
        /// Operation that rejected the shape.
        context: &'static str,
        /// Shape that was requested.
        shape: Shape,
    },

    /// A flat byte buffer has the wrong length.
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    Length {
        /// Operation that rejected the buffer.
        context: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },

    /// The key length is not accepted under the active padding policy.
    #[error("unsupported key length: {actual} bytes ({padding:?} padding)")]
    KeyLength {
        /// Supplied key length in bytes.
        actual: usize,
        /// Padding policy that rejected it.
        padding: KeyPadding,
    },

    /// A round-key list does not describe a 10, 12 or 14 round schedule.
    #[error("invalid round key count: {0} (expected 11, 13 or 15)")]
    RoundKeyCount(usize),
}

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, AesError>;
