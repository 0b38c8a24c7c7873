use super::grayscale::{to_luminosity, to_luminosity_into, PixelFormat};
use super::memory_pool::BufferPool;
use crate::models::Scanline;

/// 256-bucket luminosity histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; 256],
    total: u32,
}

impl Histogram {
    /// Count luminosity occurrences
    pub fn from_luminosity(gray: &[u8]) -> Self {
        let mut counts = [0u32; 256];
        for &pixel in gray {
            counts[pixel as usize] += 1;
        }
        Self {
            counts,
            total: gray.len() as u32,
        }
    }

    /// Build directly from bucket counts
    pub fn from_counts(counts: [u32; 256]) -> Self {
        let total = counts.iter().sum();
        Self { counts, total }
    }

    /// Per-luminosity counts
    pub fn counts(&self) -> &[u32; 256] {
        &self.counts
    }

    /// Number of pixels counted
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Tallest bucket, for scaling a plot
    pub fn peak(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Calculate Otsu's threshold from a histogram
///
/// Maximizes the between-class variance `wB * wF * (mB - mF)^2` where a split
/// at `t` puts luminosities `<= t` in the background class. When several
/// thresholds share the maximum, the result is the midpoint of the first
/// threshold reaching it and the last one that ties it, which lands in the
/// middle of an empty gap between two clusters.
///
/// Returns 0.0 for empty or single-valued histograms, which binarizes
/// everything to background.
pub fn otsu_threshold(histogram: &Histogram) -> f32 {
    let counts = histogram.counts();
    let total = histogram.total() as f64;
    if total == 0.0 {
        return 0.0;
    }

    let sum: f64 = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut sum_b = 0.0f64;
    let mut count_b = 0.0f64;
    let mut max_between = 0.0f64;
    let mut first_max = 0usize;
    let mut last_max = 0usize;

    for (t, &count) in counts.iter().enumerate() {
        count_b += count as f64;
        if count_b == 0.0 {
            continue;
        }
        let count_f = total - count_b;
        if count_f == 0.0 {
            break;
        }

        sum_b += t as f64 * count as f64;
        let mean_b = sum_b / count_b;
        let mean_f = (sum - sum_b) / count_f;
        let weight_b = count_b / total;
        let weight_f = count_f / total;

        let between = weight_b * weight_f * (mean_b - mean_f).powi(2);
        if between >= max_between {
            last_max = t;
            if between > max_between {
                first_max = t;
            }
            max_between = between;
        }
    }

    (first_max + last_max) as f32 / 2.0
}

/// Otsu threshold straight from luminosity values
pub fn calculate_otsu_threshold(gray: &[u8]) -> f32 {
    otsu_threshold(&Histogram::from_luminosity(gray))
}

/// Global threshold binarization: mark where luminosity < threshold
pub fn threshold_binarize(gray: &[u8], threshold: f32) -> Scanline {
    let mut scanline = Scanline::new(gray.len());
    threshold_binarize_into(gray, threshold, &mut scanline);
    scanline
}

/// Binarize into a reusable scanline
pub fn threshold_binarize_into(gray: &[u8], threshold: f32, output: &mut Scanline) {
    output.reset(gray.len());
    for (x, &pixel) in gray.iter().enumerate() {
        output.set(x, (pixel as f32) < threshold);
    }
}

/// Binarize using Otsu's method
pub fn otsu_binarize(gray: &[u8]) -> Scanline {
    threshold_binarize(gray, calculate_otsu_threshold(gray))
}

/// Turns one row of interleaved pixels into a scanline of marks
///
/// Luminosity is computed per pixel, then thresholded either at a fixed value
/// or at the row's Otsu threshold. A pixel is a mark when its luminosity is
/// strictly below the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preprocessor {
    fixed_threshold: Option<u8>,
}

/// Intermediate results of preprocessing one row, for overlays and diagnostics
#[derive(Debug, Clone)]
pub struct RowAnalysis {
    /// Per-pixel luminosity
    pub luminosity: Vec<u8>,
    /// Histogram of `luminosity`
    pub histogram: Histogram,
    /// Threshold that was applied
    pub threshold: f32,
    /// Binarized row
    pub scanline: Scanline,
}

impl Preprocessor {
    /// Otsu per row
    pub fn new() -> Self {
        Self::default()
    }

    /// Optionally bypass Otsu with a fixed threshold
    pub fn with_fixed_threshold(fixed_threshold: Option<u8>) -> Self {
        Self { fixed_threshold }
    }

    /// The fixed threshold, if any
    pub fn fixed_threshold(&self) -> Option<u8> {
        self.fixed_threshold
    }

    /// Threshold this preprocessor applies to a luminosity row
    pub fn threshold(&self, gray: &[u8]) -> f32 {
        match self.fixed_threshold {
            Some(t) => t as f32,
            None => calculate_otsu_threshold(gray),
        }
    }

    /// Binarize a row of pixels
    pub fn process(&self, row: &[u8], format: PixelFormat) -> Scanline {
        let gray = to_luminosity(row, format);
        threshold_binarize(&gray, self.threshold(&gray))
    }

    /// Binarize using the pool's buffers. Returns the threshold and the scanline.
    pub fn process_into<'a>(
        &self,
        row: &[u8],
        format: PixelFormat,
        pool: &'a mut BufferPool,
    ) -> (f32, &'a Scanline) {
        let (gray, scanline) = pool.buffers();
        to_luminosity_into(row, format, gray);
        let threshold = self.threshold(gray);
        threshold_binarize_into(gray, threshold, scanline);
        (threshold, scanline)
    }

    /// Binarize and keep every intermediate
    pub fn analyze(&self, row: &[u8], format: PixelFormat) -> RowAnalysis {
        let luminosity = to_luminosity(row, format);
        let histogram = Histogram::from_luminosity(&luminosity);
        let threshold = match self.fixed_threshold {
            Some(t) => t as f32,
            None => otsu_threshold(&histogram),
        };
        let scanline = threshold_binarize(&luminosity, threshold);
        RowAnalysis {
            luminosity,
            histogram,
            threshold,
            scanline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50];
        let binary = threshold_binarize(&gray, 128.0);

        // Pixels < 128 should be marks (true)
        assert!(binary.get(0)); // 100 < 128
        assert!(!binary.get(1)); // 150 >= 128
        assert!(!binary.get(2)); // 200 >= 128
        assert!(binary.get(3)); // 50 < 128

        // Equal to the threshold is background
        assert!(!threshold_binarize(&[128], 128.0).get(0));
    }

    #[test]
    fn test_otsu_two_levels() {
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let threshold = calculate_otsu_threshold(&gray);
        // Plateau runs from 50 to 199, midpoint 124.5
        assert_eq!(threshold, 124.5);

        let binary = otsu_binarize(&gray);
        assert!(binary.get(0));
        assert!(!binary.get(99));
    }

    #[test]
    fn test_otsu_between_cluster_means() {
        let mut counts = [0u32; 256];
        for (v, c) in [(38, 5), (39, 20), (40, 50), (41, 20), (42, 5)] {
            counts[v] = c;
        }
        for (v, c) in [(178, 10), (179, 40), (180, 60), (181, 40), (182, 10)] {
            counts[v] = c;
        }
        let threshold = otsu_threshold(&Histogram::from_counts(counts));
        assert!(threshold > 40.0 && threshold < 180.0, "got {threshold}");
    }

    #[test]
    fn test_otsu_degenerate_inputs() {
        assert_eq!(calculate_otsu_threshold(&[]), 0.0);
        // Single-valued rows never produce marks
        let blank = vec![255u8; 64];
        assert_eq!(otsu_binarize(&blank).mark_count(), 0);
        let dark = vec![0u8; 64];
        assert_eq!(otsu_binarize(&dark).mark_count(), 0);
    }

    #[test]
    fn test_histogram() {
        let hist = Histogram::from_luminosity(&[0, 0, 7, 255]);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.counts()[0], 2);
        assert_eq!(hist.counts()[255], 1);
        assert_eq!(hist.peak(), 2);
    }

    fn rgb_row(levels: &[u8]) -> Vec<u8> {
        levels.iter().flat_map(|&l| [l, l, l]).collect()
    }

    #[test]
    fn test_preprocessor_otsu() {
        let row = rgb_row(&[255, 255, 0, 0, 255, 0, 255]);
        let scanline = Preprocessor::new().process(&row, PixelFormat::Rgb);
        let marks: Vec<bool> = (0..7).map(|x| scanline.get(x)).collect();
        assert_eq!(marks, vec![false, false, true, true, false, true, false]);
    }

    #[test]
    fn test_preprocessor_fixed_threshold() {
        let row = rgb_row(&[10, 90, 100, 250]);
        let pre = Preprocessor::with_fixed_threshold(Some(100));
        let scanline = pre.process(&row, PixelFormat::Rgb);
        assert!(scanline.get(0) && scanline.get(1));
        assert!(!scanline.get(2) && !scanline.get(3));
        assert_eq!(pre.threshold(&[0, 255]), 100.0);
    }

    #[test]
    fn test_preprocessor_ignores_alpha() {
        let row = [0, 0, 0, 255, 255, 255, 255, 0];
        let scanline = Preprocessor::new().process(&row, PixelFormat::Rgba);
        assert_eq!(scanline.width(), 2);
        assert!(scanline.get(0));
        assert!(!scanline.get(1));
    }

    #[test]
    fn test_process_into_matches_process() {
        let row = rgb_row(&[200, 20, 20, 200, 20, 200, 200, 20]);
        let pre = Preprocessor::new();
        let expected = pre.process(&row, PixelFormat::Rgb);

        let mut pool = BufferPool::with_capacity(4);
        for _ in 0..2 {
            let (threshold, scanline) = pre.process_into(&row, PixelFormat::Rgb, &mut pool);
            assert_eq!(threshold, 109.5);
            assert_eq!(scanline, &expected);
        }
    }

    #[test]
    fn test_analyze() {
        let row = rgb_row(&[50, 50, 200, 200]);
        let analysis = Preprocessor::new().analyze(&row, PixelFormat::Rgb);
        assert_eq!(analysis.luminosity, vec![50, 50, 200, 200]);
        assert_eq!(analysis.histogram.counts()[50], 2);
        assert_eq!(analysis.threshold, 124.5);
        assert_eq!(analysis.scanline.mark_count(), 2);
    }
}
