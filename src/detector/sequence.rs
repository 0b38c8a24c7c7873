//! Guard pattern search by run-width ratios, independent of pixel scale

use crate::models::{CandidateMatch, Pattern, Run, Scanline};
use crate::utils::ratio::percentage_difference;

/// Finds every span of a scanline shaped like a pattern at any scale
pub struct SequenceDetector;

impl SequenceDetector {
    /// Find all candidate matches of `pattern` in one left-to-right pass.
    ///
    /// `tolerance` is the largest percentage difference allowed between a
    /// pattern width ratio and the observed run width ratio. Candidates may
    /// overlap; ranking them is left to the bounds resolver.
    pub fn find_sequences(
        scanline: &Scanline,
        pattern: &Pattern,
        tolerance: f32,
    ) -> Vec<CandidateMatch> {
        Self::find_in_runs(&scanline.runs(), pattern, tolerance)
    }

    /// Same search over runs that were already grouped
    ///
    /// # Panics
    /// Panics if `pattern` is empty.
    pub fn find_in_runs(runs: &[Run], pattern: &Pattern, tolerance: f32) -> Vec<CandidateMatch> {
        assert!(!pattern.is_empty(), "cannot search for an empty pattern");

        let mut found = Vec::new();
        let mut in_progress: Vec<Vec<Run>> = Vec::new();

        // The last run is closed at the scanline edge by grouping, so a mark
        // ending on the final pixel is still offered to every candidate.
        for run in runs {
            // Newest candidates first. Any candidate this run doesn't extend is dropped.
            let mut survivors = Vec::with_capacity(in_progress.len());
            for mut candidate in std::mem::take(&mut in_progress).into_iter().rev() {
                if !Self::extends(&candidate, run, pattern, tolerance) {
                    continue;
                }
                candidate.push(*run);
                if candidate.len() == pattern.len() {
                    found.push(CandidateMatch::new(candidate));
                } else {
                    survivors.push(candidate);
                }
            }
            survivors.reverse();
            in_progress = survivors;

            if run.dark == pattern[0].dark {
                if pattern.len() == 1 {
                    found.push(CandidateMatch::new(vec![*run]));
                } else {
                    in_progress.push(vec![*run]);
                }
            }
        }

        found
    }

    /// Check whether `run` continues `candidate` at the next pattern position
    fn extends(candidate: &[Run], run: &Run, pattern: &Pattern, tolerance: f32) -> bool {
        let k = candidate.len();
        let expected = &pattern[k];
        if run.dark != expected.dark {
            return false;
        }

        let expected_ratio = pattern[k - 1].width as f32 / expected.width as f32;
        let actual_ratio = candidate[k - 1].width as f32 / run.width as f32;
        percentage_difference(expected_ratio, actual_ratio) <= tolerance
    }
}
