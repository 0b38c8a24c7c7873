/// Best-guess pixel span `[start_pixel, stop_pixel)` of one whole symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// First pixel of the begin guard
    pub start_pixel: usize,
    /// One past the last pixel of the end guard
    pub stop_pixel: usize,
    /// `stop_pixel - start_pixel`
    pub width: usize,
    /// Percentage difference between the span and the width predicted from the guards.
    /// Lower is better.
    pub score: f32,
}

impl Bounds {
    /// Create bounds; `stop_pixel` must be greater than `start_pixel`
    pub fn new(start_pixel: usize, stop_pixel: usize, score: f32) -> Self {
        assert!(stop_pixel > start_pixel, "bounds must span at least one pixel");
        Self {
            start_pixel,
            stop_pixel,
            width: stop_pixel - start_pixel,
            score,
        }
    }
}
