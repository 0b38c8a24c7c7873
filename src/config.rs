//! Scan configuration with process-wide environment overrides
//!
//! Environment variables are read once per process:
//! - `EAN_FIXED_THRESHOLD` (0-255): bypass Otsu with a fixed luminosity cut
//! - `EAN_SEQUENCE_TOLERANCE` (percent, default 120): guard ratio tolerance
//! - `EAN_BOUNDS_CUTOFF` (percent, default 75): bounds acceptance cutoff
//! - `EAN_SCAN_ROWS` (default 1): image rows tried by `Scanner::scan_image`

use std::sync::OnceLock;

/// Default percentage difference allowed between pattern and run width ratios
pub const DEFAULT_SEQUENCE_TOLERANCE: f32 = 120.0;
/// Default percentage difference allowed between predicted and actual symbol width
pub const DEFAULT_BOUNDS_CUTOFF: f32 = 75.0;

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static FIXED_THRESHOLD: OnceLock<Option<u8>> = OnceLock::new();

fn fixed_threshold_override() -> Option<u8> {
    *FIXED_THRESHOLD.get_or_init(|| {
        std::env::var("EAN_FIXED_THRESHOLD")
            .ok()
            .and_then(|v| v.trim().parse::<u8>().ok())
    })
}

static SEQUENCE_TOLERANCE: OnceLock<f32> = OnceLock::new();

fn sequence_tolerance() -> f32 {
    *SEQUENCE_TOLERANCE
        .get_or_init(|| parse_env_f32("EAN_SEQUENCE_TOLERANCE", DEFAULT_SEQUENCE_TOLERANCE))
}

static BOUNDS_CUTOFF: OnceLock<f32> = OnceLock::new();

fn bounds_cutoff() -> f32 {
    *BOUNDS_CUTOFF.get_or_init(|| parse_env_f32("EAN_BOUNDS_CUTOFF", DEFAULT_BOUNDS_CUTOFF))
}

static SCAN_ROWS: OnceLock<usize> = OnceLock::new();

fn scan_rows() -> usize {
    *SCAN_ROWS.get_or_init(|| parse_env_usize("EAN_SCAN_ROWS", 1).clamp(1, 64))
}

/// Tunables for one scanner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Fixed binarization threshold; `None` computes Otsu per row
    pub fixed_threshold: Option<u8>,
    /// Guard ratio tolerance, in percent
    pub sequence_tolerance: f32,
    /// Bounds acceptance cutoff, in percent
    pub bounds_cutoff: f32,
    /// Image rows to try, middle row first
    pub scan_rows: usize,
}

impl ScanConfig {
    /// Built-in defaults, ignoring the environment
    pub fn builtin() -> Self {
        Self {
            fixed_threshold: None,
            sequence_tolerance: DEFAULT_SEQUENCE_TOLERANCE,
            bounds_cutoff: DEFAULT_BOUNDS_CUTOFF,
            scan_rows: 1,
        }
    }

    /// Use a fixed threshold instead of Otsu
    pub fn with_fixed_threshold(mut self, threshold: u8) -> Self {
        self.fixed_threshold = Some(threshold);
        self
    }

    /// Set the guard ratio tolerance (percent)
    pub fn with_sequence_tolerance(mut self, tolerance: f32) -> Self {
        self.sequence_tolerance = tolerance;
        self
    }

    /// Set the bounds cutoff (percent)
    pub fn with_bounds_cutoff(mut self, cutoff: f32) -> Self {
        self.bounds_cutoff = cutoff;
        self
    }

    /// Set how many image rows `scan_image` tries
    pub fn with_scan_rows(mut self, rows: usize) -> Self {
        self.scan_rows = rows.max(1);
        self
    }
}

impl Default for ScanConfig {
    /// Built-in defaults with environment overrides applied
    fn default() -> Self {
        Self {
            fixed_threshold: fixed_threshold_override(),
            sequence_tolerance: sequence_tolerance(),
            bounds_cutoff: bounds_cutoff(),
            scan_rows: scan_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = ScanConfig::builtin()
            .with_fixed_threshold(90)
            .with_sequence_tolerance(45.0)
            .with_bounds_cutoff(20.0)
            .with_scan_rows(0);
        assert_eq!(config.fixed_threshold, Some(90));
        assert_eq!(config.sequence_tolerance, 45.0);
        assert_eq!(config.bounds_cutoff, 20.0);
        assert_eq!(config.scan_rows, 1);
    }

    #[test]
    fn test_builtin_defaults() {
        let config = ScanConfig::builtin();
        assert_eq!(config.fixed_threshold, None);
        assert_eq!(config.sequence_tolerance, DEFAULT_SEQUENCE_TOLERANCE);
        assert_eq!(config.bounds_cutoff, DEFAULT_BOUNDS_CUTOFF);
    }
}
