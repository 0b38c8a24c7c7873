//! Symbol location on a binarized scanline
//!
//! This module finds where a symbol sits on a scanline:
//! - Guard sequence detection (fuzzy run-ratio matching, single pass)
//! - Bounds resolution (pairing begin/end guards and ranking the spans)

/// Pairing of begin/end guard candidates into ranked symbol bounds
pub mod bounds;
/// Single-pass multi-candidate search for a run pattern
pub mod sequence;

pub use bounds::BoundsResolver;
pub use sequence::SequenceDetector;
