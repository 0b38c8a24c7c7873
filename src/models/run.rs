/// Maximal span of identical pixels in a scanline, `[start_pixel, stop_pixel)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// True for a mark (dark bar), false for background
    pub dark: bool,
    /// Width in pixels (always >= 1)
    pub width: usize,
    /// First pixel of the run
    pub start_pixel: usize,
    /// One past the last pixel of the run
    pub stop_pixel: usize,
}

impl Run {
    /// Create a run covering `[start_pixel, stop_pixel)`
    pub fn new(dark: bool, start_pixel: usize, stop_pixel: usize) -> Self {
        debug_assert!(stop_pixel > start_pixel, "runs are at least one pixel wide");
        Self {
            dark,
            width: stop_pixel - start_pixel,
            start_pixel,
            stop_pixel,
        }
    }

    /// Same run with every pixel coordinate multiplied by `k`
    pub fn scaled(&self, k: usize) -> Self {
        Self::new(self.dark, self.start_pixel * k, self.stop_pixel * k)
    }
}

/// Run rescaled to the symbology's bit grid. `width` is a fractional bit count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// True for a mark (dark bar), false for background
    pub dark: bool,
    /// Width in bits
    pub width: f32,
}

/// Guard-pattern hypothesis: consecutive scanline runs shaped like a target pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    runs: Vec<Run>,
}

impl CandidateMatch {
    pub(crate) fn new(runs: Vec<Run>) -> Self {
        debug_assert!(!runs.is_empty());
        Self { runs }
    }

    /// Matched runs, in scanline order
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of matched runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Always false for an accepted match
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// First pixel of the first run
    pub fn start_pixel(&self) -> usize {
        self.runs.first().map_or(0, |r| r.start_pixel)
    }

    /// One past the last pixel of the last run
    pub fn stop_pixel(&self) -> usize {
        self.runs.last().map_or(0, |r| r.stop_pixel)
    }

    /// Pixel span of the whole match
    pub fn width(&self) -> usize {
        self.stop_pixel() - self.start_pixel()
    }
}
