//! Error types for rust_ean

use thiserror::Error;

/// Rejected encoder input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Wrong number of characters
    #[error("invalid length: expected {expected} digits, got {actual}")]
    InvalidLength {
        /// Required number of digits
        expected: usize,
        /// Characters supplied
        actual: usize,
    },

    /// A character that isn't an ASCII digit
    #[error("invalid digit {found:?} at position {position}")]
    InvalidDigit {
        /// Zero-based character index
        position: usize,
        /// The offending character
        found: char,
    },
}

/// Why a run sequence did not decode. These are expected outcomes of fuzzy
/// input, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// The slice does not group into the symbology's run count
    #[error("run count mismatch: expected {expected}, got {actual}")]
    RunCountMismatch {
        /// Runs in a whole symbol
        expected: usize,
        /// Runs between the bounds
        actual: usize,
    },

    /// Left-block parity in both orientations reads as a reversed scan
    #[error("orientation could not be resolved")]
    OrientationUnresolved,

    /// The left-block parity string matches no first digit
    #[error("no first digit for parity {parity}")]
    ParityLookupFailed {
        /// Left-block parity, one `0`/`1` per position
        parity: String,
    },

    /// Every digit read, but the check digit disagrees
    #[error("checksum mismatch in {digits}: expected check digit {expected}")]
    ChecksumMismatch {
        /// All 13 digits as read
        digits: String,
        /// Check digit computed from the first 12
        expected: u8,
    },
}

/// Errors from the image tooling layer
#[derive(Debug, Error)]
pub enum ToolError {
    /// Image could not be opened, decoded or written
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding failed before rendering
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Rendering parameters that would produce an empty image
    #[error("invalid render size: bar width {bar_width}, bar height {bar_height}")]
    InvalidRenderSize {
        /// Pixels per module
        bar_width: u32,
        /// Image height in pixels
        bar_height: u32,
    },
}

/// Result type for tooling operations
pub type ToolResult<T> = Result<T, ToolError>;
