//! Bar-width normalization shared by symbology decoders

/// Rescaling of pixel runs onto the bit grid
pub mod normalize;

pub use normalize::normalize;
