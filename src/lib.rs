//! rust_ean - EAN-13 barcode reading and writing for raw pixel rows
//!
//! Decoding works on one row of pixels at a time: the row is binarized, guard
//! patterns are located by run-width ratios, candidate spans are ranked, and
//! the best span that decodes with a valid check digit wins. Encoding produces
//! the 95 module bits of a symbol for any 12-digit payload.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Scan configuration and environment overrides
pub mod config;
/// Bar-width normalization
pub mod decoder;
/// Guard sequence detection and bounds resolution
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (Scanline, Run, Pattern, Bounds, DecodedBarcode)
pub mod models;
/// Scanline to decoded barcode driver
pub mod pipeline;
/// Supported symbologies
pub mod symbology;
/// Image loading, rendering and statistics helpers
pub mod tools;
/// Utility functions (luminosity, binarization, ratios, buffer pools)
pub mod utils;

pub use config::ScanConfig;
pub use error::{DecodeFailure, EncodeError, ToolError};
pub use models::{BarcodeFormat, Bounds, DecodedBarcode, Scanline};
pub use pipeline::{ScanOutcome, ScanTelemetry};
pub use symbology::{Ean13, Symbology};
pub use utils::binarization::Preprocessor;
pub use utils::grayscale::PixelFormat;

use log::debug;
use rayon::prelude::*;

use utils::grayscale::image_row;
use utils::memory_pool::BufferPool;

/// Decode the first EAN-13 symbol on one row of interleaved pixels
///
/// Uses [`ScanConfig::default`], so environment overrides apply.
pub fn decode_row(row: &[u8], format: PixelFormat) -> Option<DecodedBarcode> {
    Scanner::new().scan_row(row, format)
}

/// Decode an EAN-13 symbol crossing the middle row of an image
///
/// More rows are tried when the configuration asks for them.
pub fn decode_image(
    pixels: &[u8],
    width: usize,
    height: usize,
    format: PixelFormat,
) -> Option<DecodedBarcode> {
    Scanner::new().scan_image(pixels, width, height, format)
}

/// Encode a 12-digit payload as 95 EAN-13 module bits (1 = bar)
pub fn encode(data: &str) -> Result<Vec<u8>, EncodeError> {
    Ean13.encode(data)
}

/// Scanner with configuration, an optional buffer pool and the telemetry of
/// its last attempt
pub struct Scanner<S: Symbology = Ean13> {
    symbology: S,
    config: ScanConfig,
    /// Optional buffer pool for memory reuse
    pool: Option<BufferPool>,
    last_telemetry: Option<ScanTelemetry>,
}

impl Scanner<Ean13> {
    /// EAN-13 scanner with default settings
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// EAN-13 scanner with explicit settings
    pub fn with_config(config: ScanConfig) -> Self {
        Self::with_symbology(Ean13, config)
    }

    /// EAN-13 scanner reusing its row buffers between calls
    pub fn with_pool() -> Self {
        Self::new().pooled(BufferPool::new())
    }

    /// Same as [`Scanner::with_pool`] with a specific row capacity
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self::new().pooled(BufferPool::with_capacity(capacity))
    }
}

impl<S: Symbology> Scanner<S> {
    /// Scanner for any symbology
    pub fn with_symbology(symbology: S, config: ScanConfig) -> Self {
        Self {
            symbology,
            config,
            pool: None,
            last_telemetry: None,
        }
    }

    fn pooled(mut self, pool: BufferPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Current settings
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Replace the settings
    pub fn set_config(&mut self, config: ScanConfig) {
        self.config = config;
    }

    /// Telemetry of the most recent scan
    pub fn last_telemetry(&self) -> Option<&ScanTelemetry> {
        self.last_telemetry.as_ref()
    }

    fn preprocessor(&self) -> Preprocessor {
        Preprocessor::with_fixed_threshold(self.config.fixed_threshold)
    }

    /// Decode one row of interleaved pixels
    pub fn scan_row(&mut self, row: &[u8], format: PixelFormat) -> Option<DecodedBarcode> {
        let preprocessor = self.preprocessor();
        let (found, tel) = match &mut self.pool {
            Some(pool) => {
                let (threshold, scanline) = preprocessor.process_into(row, format, pool);
                with_threshold(
                    pipeline::scan_scanline(scanline, &self.symbology, &self.config),
                    threshold,
                )
            }
            None => {
                let gray = utils::grayscale::to_luminosity(row, format);
                let threshold = preprocessor.threshold(&gray);
                let scanline = utils::binarization::threshold_binarize(&gray, threshold);
                with_threshold(
                    pipeline::scan_scanline(&scanline, &self.symbology, &self.config),
                    threshold,
                )
            }
        };
        self.last_telemetry = Some(tel);
        found
    }

    /// Decode an already binarized scanline
    pub fn scan_scanline(&mut self, scanline: &Scanline) -> Option<DecodedBarcode> {
        let (found, tel) = pipeline::scan_scanline(scanline, &self.symbology, &self.config);
        self.last_telemetry = Some(tel);
        found
    }

    /// Decode a symbol crossing an image, starting with the middle row.
    ///
    /// With `scan_rows > 1`, evenly spaced rows are scanned in parallel and the
    /// decoded row closest to the middle wins.
    pub fn scan_image(
        &mut self,
        pixels: &[u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Option<DecodedBarcode> {
        let rows = row_order(height, self.config.scan_rows);
        if rows.len() <= 1 {
            let y = *rows.first()?;
            let row = image_row(pixels, width, y, format)?;
            return self.scan_row(row, format).map(|b| DecodedBarcode { row: y, ..b });
        }

        let preprocessor = self.preprocessor();
        let symbology = &self.symbology;
        let config = &self.config;
        let attempts: Vec<(usize, Option<DecodedBarcode>, ScanTelemetry)> = rows
            .par_iter()
            .filter_map(|&y| {
                let row = image_row(pixels, width, y, format)?;
                let analysis = preprocessor.analyze(row, format);
                let (found, tel) = with_threshold(
                    pipeline::scan_scanline(&analysis.scanline, symbology, config),
                    analysis.threshold,
                );
                Some((y, found, tel))
            })
            .collect();
        debug!("scanned {} of {} requested rows", attempts.len(), rows.len());

        let winner = attempts
            .iter()
            .position(|(_, found, _)| found.is_some())
            .unwrap_or(0);
        let (y, found, tel) = attempts.into_iter().nth(winner)?;
        self.last_telemetry = Some(tel);
        found.map(|b| DecodedBarcode { row: y, ..b })
    }

    /// Clear the internal buffer pool (keeps capacity)
    pub fn clear_pool(&mut self) {
        if let Some(pool) = &mut self.pool {
            pool.clear();
        }
    }
}

impl Default for Scanner<Ean13> {
    fn default() -> Self {
        Self::new()
    }
}

fn with_threshold(
    (found, mut tel): (Option<DecodedBarcode>, ScanTelemetry),
    threshold: f32,
) -> (Option<DecodedBarcode>, ScanTelemetry) {
    tel.threshold = Some(threshold);
    (found, tel)
}

/// Rows to scan: the middle row, then rows stepping outwards above and below
fn row_order(height: usize, scan_rows: usize) -> Vec<usize> {
    if height == 0 {
        return Vec::new();
    }
    let middle = height / 2;
    let count = scan_rows.clamp(1, height);
    let step = (height / count).max(1);

    let mut rows = vec![middle];
    let mut k = 1;
    while rows.len() < count {
        let before = rows.len();
        if let Some(y) = middle.checked_sub(k * step) {
            rows.push(y);
        }
        if rows.len() < count && middle + k * step < height {
            rows.push(middle + k * step);
        }
        if rows.len() == before {
            break;
        }
        k += 1;
    }
    rows
}
