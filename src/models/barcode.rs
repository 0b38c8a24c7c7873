use super::Bounds;

/// Barcode symbology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarcodeFormat {
    /// EAN-13 (12 payload digits + check digit)
    Ean13,
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarcodeFormat::Ean13 => write!(f, "EAN-13"),
        }
    }
}

/// A decoded barcode and where it was found on the scanline
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBarcode {
    /// Symbology of the decoded symbol
    pub format: BarcodeFormat,
    /// Decoded digits, check digit included
    pub digits: String,
    /// Pixel span of the symbol on the scanline
    pub bounds: Bounds,
    /// Image row the scanline was taken from (0 for bare scanlines)
    pub row: usize,
}

impl DecodedBarcode {
    /// The payload without its trailing check digit
    pub fn payload(&self) -> &str {
        &self.digits[..self.digits.len().saturating_sub(1)]
    }

    /// The trailing check digit
    pub fn check_digit(&self) -> Option<u8> {
        self.digits.bytes().last().map(|b| b - b'0')
    }
}
