use log::trace;

use crate::config::DEFAULT_BOUNDS_CUTOFF;
use crate::models::{Bounds, CandidateMatch, Pattern};
use crate::utils::ratio::percentage_difference;

/// Pairs begin/end guard candidates into symbol bounds, best first
#[derive(Debug, Clone, Copy)]
pub struct BoundsResolver {
    begin_bits: usize,
    end_bits: usize,
    total_bits: usize,
    cutoff: f32,
}

impl BoundsResolver {
    /// Resolver for a symbol `total_bits` wide delimited by the given guards
    pub fn new(begin: &Pattern, end: &Pattern, total_bits: usize) -> Self {
        Self {
            begin_bits: begin.bit_len(),
            end_bits: end.bit_len(),
            total_bits,
            cutoff: DEFAULT_BOUNDS_CUTOFF,
        }
    }

    /// Set the acceptance cutoff (percent)
    pub fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Score every `(begin, end)` pair and return the accepted ones, best first.
    ///
    /// Scale is estimated from the two guards alone, which is imprecise, so the
    /// cutoff is generous and callers are expected to try bounds in order.
    pub fn resolve_bounds(
        &self,
        begin_candidates: &[CandidateMatch],
        end_candidates: &[CandidateMatch],
    ) -> Vec<Bounds> {
        let guard_bits = (self.begin_bits + self.end_bits) as f32;
        let mut accepted = Vec::new();

        for begin in begin_candidates {
            for end in end_candidates {
                if end.start_pixel() <= begin.start_pixel() {
                    continue;
                }

                let pixels_per_bit = (begin.width() + end.width()) as f32 / guard_bits;
                let expected_width = pixels_per_bit * self.total_bits as f32;
                let actual_width = (end.stop_pixel() - begin.start_pixel()) as f32;
                let difference = percentage_difference(expected_width, actual_width);

                if difference < self.cutoff {
                    accepted.push(Bounds::new(begin.start_pixel(), end.stop_pixel(), difference));
                }
            }
        }

        accepted.sort_by(|a, b| a.score.total_cmp(&b.score));
        trace!(
            "bounds: {} begin x {} end candidates -> {} accepted",
            begin_candidates.len(),
            end_candidates.len(),
            accepted.len()
        );
        accepted
    }
}
