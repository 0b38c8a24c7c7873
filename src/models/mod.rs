/// Decoded barcode and its format
pub mod barcode;
/// Symbol pixel span
pub mod bounds;
/// Run-length bit templates
pub mod pattern;
/// Pixel runs, normalized bars and guard candidates
pub mod run;
/// Binarized pixel rows
pub mod scanline;

pub use barcode::{BarcodeFormat, DecodedBarcode};
pub use bounds::Bounds;
pub use pattern::{Pattern, PatternElement};
pub use run::{Bar, CandidateMatch, Run};
pub use scanline::{Scanline, group_runs};
