//! EAN-13: 12 payload digits plus a check digit. The first digit is carried by
//! the parity pattern of the left block rather than by its own bars.

mod decode;
mod encode;
pub mod tables;

pub use decode::decode;
pub use encode::encode;
pub use tables::checksum;

use super::Symbology;
use crate::error::{DecodeFailure, EncodeError};
use crate::models::{BarcodeFormat, Pattern, Run};

/// EAN-13 symbology
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ean13;

impl Symbology for Ean13 {
    fn format(&self) -> BarcodeFormat {
        BarcodeFormat::Ean13
    }

    fn begin_pattern(&self) -> Pattern {
        Pattern::from_bits(&tables::BEGIN_GUARD)
    }

    fn end_pattern(&self) -> Pattern {
        Pattern::from_bits(&tables::END_GUARD)
    }

    fn total_bits(&self) -> usize {
        tables::TOTAL_MODULES
    }

    fn encode(&self, data: &str) -> Result<Vec<u8>, EncodeError> {
        encode(data)
    }

    fn decode(&self, runs: &[Run]) -> Result<String, DecodeFailure> {
        decode(runs)
    }
}
