use crate::error::{ToolError, ToolResult};
use crate::models::Scanline;
use crate::symbology::Symbology;
use crate::utils::grayscale::PixelFormat;
use image::{Rgb, RgbImage};
use std::env;
use std::path::Path;

const MARK: Rgb<u8> = Rgb([0, 0, 0]);
const SPACE: Rgb<u8> = Rgb([255, 255, 255]);

fn max_dim_from_env() -> Option<u32> {
    match env::var("EAN_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as RGB bytes along with its dimensions.
///
/// Images larger than `EAN_MAX_DIM` on either side are downscaled first.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> ToolResult<(Vec<u8>, usize, usize)> {
    let img = image::open(path)?;
    let rgb = match max_dim_from_env() {
        Some(max_dim) if img.width().max(img.height()) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgb8(),
        _ => img.to_rgb8(),
    };
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width as usize, height as usize))
}

/// Render module bits as black bars on white.
///
/// Each bit becomes `bar_width` pixels, every row is identical, and
/// `quiet_zone` blank modules pad both sides.
pub fn render_bits(
    bits: &[u8],
    bar_width: u32,
    bar_height: u32,
    quiet_zone: u32,
) -> ToolResult<RgbImage> {
    if bar_width == 0 || bar_height == 0 {
        return Err(ToolError::InvalidRenderSize {
            bar_width,
            bar_height,
        });
    }

    let modules = bits.len() as u32 + 2 * quiet_zone;
    let img = RgbImage::from_fn(modules * bar_width, bar_height, |x, _| {
        let module = (x / bar_width) as usize;
        let bit = module
            .checked_sub(quiet_zone as usize)
            .and_then(|i| bits.get(i))
            .copied()
            .unwrap_or(0);
        if bit != 0 { MARK } else { SPACE }
    });
    Ok(img)
}

/// Encode a payload and render it
pub fn render_payload<S: Symbology + ?Sized>(
    symbology: &S,
    data: &str,
    bar_width: u32,
    bar_height: u32,
    quiet_zone: u32,
) -> ToolResult<RgbImage> {
    let bits = symbology.encode(data)?;
    render_bits(&bits, bar_width, bar_height, quiet_zone)
}

/// One rendered row as interleaved pixels of the given format
pub fn render_row(bits: &[u8], bar_width: usize, quiet_zone: usize, format: PixelFormat) -> Vec<u8> {
    let channels = format.channels();
    let mut row = Vec::with_capacity((bits.len() + 2 * quiet_zone) * bar_width * channels);
    let padded = std::iter::repeat_n(&0u8, quiet_zone)
        .chain(bits)
        .chain(std::iter::repeat_n(&0u8, quiet_zone));
    for &bit in padded {
        let level = if bit != 0 { 0 } else { 255 };
        for _ in 0..bar_width {
            row.extend_from_slice(&[level, level, level]);
            if channels == 4 {
                row.push(255);
            }
        }
    }
    row
}

/// Save an image as PNG.
pub fn save_png<P: AsRef<Path>>(img: &RgbImage, path: P) -> ToolResult<()> {
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Summary statistics for luminosity data.
#[derive(Debug, Clone, Copy)]
pub struct LuminosityStats {
    /// Minimum luminosity value.
    pub min: u8,
    /// Maximum luminosity value.
    pub max: u8,
    /// Average luminosity value.
    pub avg: u8,
}

/// Summary statistics for a scanline.
#[derive(Debug, Clone, Copy)]
pub struct ScanlineStats {
    /// Count of mark pixels.
    pub mark_pixels: usize,
    /// Total pixels in the scanline.
    pub total_pixels: usize,
    /// Ratio of mark pixels to total pixels.
    pub mark_ratio: f64,
    /// Number of runs.
    pub runs: usize,
}

/// Compute min/max/avg for luminosity values.
pub fn luminosity_stats(gray: &[u8]) -> LuminosityStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    LuminosityStats { min, max, avg }
}

/// Compute mark pixel stats for a scanline.
pub fn scanline_stats(scanline: &Scanline) -> ScanlineStats {
    let marks = scanline.mark_count();
    let total = scanline.width();
    let ratio = if total == 0 {
        0.0
    } else {
        marks as f64 / total as f64
    };
    ScanlineStats {
        mark_pixels: marks,
        total_pixels: total,
        mark_ratio: ratio,
        runs: scanline.runs().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::Ean13;

    #[test]
    fn test_render_bits() {
        let img = render_bits(&[1, 0, 1], 2, 3, 1).unwrap();
        assert_eq!(img.dimensions(), (10, 3));
        assert_eq!(*img.get_pixel(0, 0), SPACE);
        assert_eq!(*img.get_pixel(2, 2), MARK);
        assert_eq!(*img.get_pixel(3, 0), MARK);
        assert_eq!(*img.get_pixel(4, 1), SPACE);
        assert_eq!(*img.get_pixel(7, 0), MARK);
        assert_eq!(*img.get_pixel(9, 0), SPACE);
    }

    #[test]
    fn test_render_rejects_zero_size() {
        assert!(matches!(
            render_bits(&[1], 0, 10, 0),
            Err(ToolError::InvalidRenderSize { .. })
        ));
    }

    #[test]
    fn test_render_payload() {
        let img = render_payload(&Ean13, "590123412345", 1, 1, 0).unwrap();
        assert_eq!(img.width(), 95);
        assert!(matches!(
            render_payload(&Ean13, "abc", 1, 1, 0),
            Err(ToolError::Encode(_))
        ));
    }

    #[test]
    fn test_render_row_matches_image() {
        let bits = [1, 1, 0, 1];
        let img = render_bits(&bits, 3, 1, 2).unwrap();
        assert_eq!(render_row(&bits, 3, 2, PixelFormat::Rgb), img.into_raw());

        let rgba = render_row(&bits, 1, 0, PixelFormat::Rgba);
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[8..12], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_stats() {
        let stats = luminosity_stats(&[0, 10, 20]);
        assert_eq!((stats.min, stats.max, stats.avg), (0, 20, 10));

        let line = Scanline::from_bits(&[1, 1, 0, 1]);
        let stats = scanline_stats(&line);
        assert_eq!(stats.mark_pixels, 3);
        assert_eq!(stats.runs, 3);
        assert!((stats.mark_ratio - 0.75).abs() < 1e-9);
    }
}
