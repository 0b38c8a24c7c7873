use super::Run;

/// Binarized row of pixels (true = mark, false = background)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanline {
    bits: Vec<bool>,
}

impl Scanline {
    /// Create an all-background scanline of the given width
    pub fn new(width: usize) -> Self {
        Self {
            bits: vec![false; width],
        }
    }

    /// Build a scanline from 0/1 values (anything non-zero is a mark)
    pub fn from_bits(bits: &[u8]) -> Self {
        Self {
            bits: bits.iter().map(|&b| b != 0).collect(),
        }
    }

    /// Build a scanline from 0/1 values, repeating each one `scale` times
    pub fn from_bits_scaled(bits: &[u8], scale: usize) -> Self {
        let mut out = Vec::with_capacity(bits.len() * scale);
        for &b in bits {
            out.extend(std::iter::repeat_n(b != 0, scale));
        }
        Self { bits: out }
    }

    /// Number of pixels in the scanline
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Check if the scanline has no pixels
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get pixel at x (out of range reads as background)
    pub fn get(&self, x: usize) -> bool {
        self.bits.get(x).copied().unwrap_or(false)
    }

    /// Set pixel at x
    pub fn set(&mut self, x: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(x) {
            *bit = value;
        }
    }

    /// Raw pixel values
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Count of mark pixels
    pub fn mark_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Group the whole scanline into maximal runs
    pub fn runs(&self) -> Vec<Run> {
        group_runs(&self.bits, 0)
    }

    /// Group the pixels in `[start, stop)` into runs, keeping absolute pixel positions
    pub fn runs_in(&self, start: usize, stop: usize) -> Vec<Run> {
        let stop = stop.min(self.bits.len());
        if start >= stop {
            return Vec::new();
        }
        group_runs(&self.bits[start..stop], start)
    }

    /// Reuse the allocation for a new row of the given width
    pub(crate) fn reset(&mut self, width: usize) {
        self.bits.clear();
        self.bits.resize(width, false);
    }
}

/// Run-length group a row of pixels. `offset` is the absolute position of `bits[0]`.
///
/// The final run is closed at the end of the slice, so a mark touching the
/// right edge still produces a run.
pub fn group_runs(bits: &[bool], offset: usize) -> Vec<Run> {
    let Some(&first) = bits.first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut current = first;
    let mut run_start = 0usize;

    for (x, &bit) in bits.iter().enumerate().skip(1) {
        if bit != current {
            runs.push(Run::new(current, offset + run_start, offset + x));
            current = bit;
            run_start = x;
        }
    }
    runs.push(Run::new(current, offset + run_start, offset + bits.len()));

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_partition_scanline() {
        let line = Scanline::from_bits(&[0, 0, 1, 1, 1, 0, 1]);
        let runs = line.runs();

        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0], Run::new(false, 0, 2));
        assert_eq!(runs[1], Run::new(true, 2, 5));
        assert_eq!(runs[2], Run::new(false, 5, 6));
        // Mark touching the right edge is still closed out
        assert_eq!(runs[3], Run::new(true, 6, 7));

        let total: usize = runs.iter().map(|r| r.width).sum();
        assert_eq!(total, line.width());
        assert!(runs.windows(2).all(|w| w[0].dark != w[1].dark));
    }

    #[test]
    fn test_runs_in_keeps_absolute_positions() {
        let line = Scanline::from_bits(&[0, 1, 1, 0, 0, 1, 0]);
        let runs = line.runs_in(1, 6);

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], Run::new(true, 1, 3));
        assert_eq!(runs[2], Run::new(true, 5, 6));
        assert!(line.runs_in(4, 4).is_empty());
    }

    #[test]
    fn test_scaled_and_out_of_bounds() {
        let mut line = Scanline::from_bits_scaled(&[1, 0], 3);
        assert_eq!(line.width(), 6);
        assert_eq!(line.mark_count(), 3);

        line.set(10, true); // Should not panic
        assert!(!line.get(10));
        assert!(Scanline::new(0).runs().is_empty());
    }
}
