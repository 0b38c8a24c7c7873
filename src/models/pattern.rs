/// One element of a pattern template: a value and its width in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternElement {
    /// True for a mark (dark bar), false for background
    pub dark: bool,
    /// Relative width in bits
    pub width: usize,
}

/// Run-length grouped bit template, e.g. a guard `[1, 0, 1]` as three unit runs.
/// Carries no pixel positions; only value and relative width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    elements: Vec<PatternElement>,
}

impl Pattern {
    /// Group a 0/1 bit sequence into a pattern
    ///
    /// # Panics
    /// Panics on an empty sequence; a pattern must have at least one element.
    pub fn from_bits(bits: &[u8]) -> Self {
        assert!(!bits.is_empty(), "pattern must contain at least one bit");

        let mut elements: Vec<PatternElement> = Vec::new();
        for &bit in bits {
            let dark = bit != 0;
            match elements.last_mut() {
                Some(last) if last.dark == dark => last.width += 1,
                _ => elements.push(PatternElement { dark, width: 1 }),
            }
        }

        Self { elements }
    }

    /// Grouped elements
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    /// Number of grouped runs
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Never true for a constructed pattern
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total width in bits
    pub fn bit_len(&self) -> usize {
        self.elements.iter().map(|e| e.width).sum()
    }
}

impl std::ops::Index<usize> for Pattern {
    type Output = PatternElement;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_guard() {
        let p = Pattern::from_bits(&[1, 0, 1]);
        assert_eq!(p.len(), 3);
        assert_eq!(p.bit_len(), 3);
        assert!(p[0].dark && !p[1].dark && p[2].dark);
    }

    #[test]
    fn test_group_wide_runs() {
        let p = Pattern::from_bits(&[0, 0, 0, 1, 1, 0, 1]);
        let widths: Vec<usize> = p.elements().iter().map(|e| e.width).collect();
        assert_eq!(widths, vec![3, 2, 1, 1]);
        assert!(!p[0].dark);
    }

    #[test]
    #[should_panic]
    fn test_empty_pattern_panics() {
        let _ = Pattern::from_bits(&[]);
    }
}
