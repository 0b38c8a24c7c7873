//! Symbologies the pipeline can read and write

pub mod ean13;

pub use ean13::Ean13;

use crate::error::{DecodeFailure, EncodeError};
use crate::models::{BarcodeFormat, Pattern, Run};

/// A 1D symbology: guard patterns, module count and the two table-driven
/// directions. Implementations hold no mutable state and are shared freely
/// across scanning threads.
pub trait Symbology: Send + Sync {
    /// Format reported on decoded barcodes
    fn format(&self) -> BarcodeFormat;

    /// Guard pattern opening a symbol
    fn begin_pattern(&self) -> Pattern;

    /// Guard pattern closing a symbol
    fn end_pattern(&self) -> Pattern;

    /// Modules across the whole symbol, guards included
    fn total_bits(&self) -> usize;

    /// Payload to module bits (1 = bar)
    fn encode(&self, data: &str) -> Result<Vec<u8>, EncodeError>;

    /// Runs spanning one symbol, begin guard through end guard, to its digits
    fn decode(&self, runs: &[Run]) -> Result<String, DecodeFailure>;
}
