//! Utility functions for scanline processing
//!
//! This module provides helper functions for EAN-13 scanning:
//! - Luminosity conversion (RGB/RGBA to gray)
//! - Binarization (histogram, Otsu's method and fixed thresholds)
//! - Ratio comparisons used by fuzzy pattern matching
//! - Memory pools (buffer reuse across frames)

/// Histogram, Otsu threshold and row preprocessing
pub mod binarization;
/// Luminosity conversion
pub mod grayscale;
/// Reusable row buffers
pub mod memory_pool;
/// Percentage difference between widths
pub mod ratio;
