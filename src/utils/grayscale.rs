//! Convert interleaved color pixels to luminosity
//! L = 0.2126*R + 0.7152*G + 0.0722*B (Rec. 709), truncated to an integer.
//!
//! Any alpha channel is ignored.

/// Rec. 709 luma coefficients
const COEF_R: f32 = 0.2126;
const COEF_G: f32 = 0.7152;
const COEF_B: f32 = 0.0722;

/// Channel layout of interleaved pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 3 bytes per pixel
    #[default]
    Rgb,
    /// 4 bytes per pixel, alpha last
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// Number of whole pixels in a buffer of this format
    pub fn pixel_count(self, data: &[u8]) -> usize {
        data.len() / self.channels()
    }
}

/// Luminosity of one pixel
#[inline]
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    let lum = COEF_R * r as f32 + COEF_G * g as f32 + COEF_B * b as f32;
    lum.clamp(0.0, 255.0) as u8
}

/// Convert RGB pixels to luminosity
pub fn rgb_to_luminosity(rgb: &[u8]) -> Vec<u8> {
    to_luminosity(rgb, PixelFormat::Rgb)
}

/// Convert RGBA pixels to luminosity (ignores alpha channel)
pub fn rgba_to_luminosity(rgba: &[u8]) -> Vec<u8> {
    to_luminosity(rgba, PixelFormat::Rgba)
}

/// Convert interleaved pixels of the given format to luminosity
pub fn to_luminosity(pixels: &[u8], format: PixelFormat) -> Vec<u8> {
    let mut gray = Vec::with_capacity(format.pixel_count(pixels));
    to_luminosity_into(pixels, format, &mut gray);
    gray
}

/// Convert into a reusable buffer. The buffer is cleared first.
pub fn to_luminosity_into(pixels: &[u8], format: PixelFormat, output: &mut Vec<u8>) {
    output.clear();
    output.extend(
        pixels
            .chunks_exact(format.channels())
            .map(|px| luminosity(px[0], px[1], px[2])),
    );
}

/// Borrow row `y` of an interleaved image, or `None` if the buffer is too short
pub fn image_row(
    pixels: &[u8],
    width: usize,
    y: usize,
    format: PixelFormat,
) -> Option<&[u8]> {
    let stride = width.checked_mul(format.channels())?;
    let start = y.checked_mul(stride)?;
    let stop = start.checked_add(stride)?;
    pixels.get(start..stop)
}
