use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::config::ScanConfig;
use crate::detector::{BoundsResolver, SequenceDetector};
use crate::error::DecodeFailure;
use crate::models::{DecodedBarcode, Scanline};
use crate::symbology::Symbology;

/// Stage that ended a scan attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOutcome {
    /// No begin or no end guard candidate on the scanline
    #[default]
    NoGuardFound,
    /// Guards were found but no pairing had a plausible width
    NoBoundsAccepted,
    /// Every accepted bounds failed to decode
    DecodeFailed,
    /// A symbol was decoded
    Decoded,
}

/// Stage-level counters for one scanline
#[derive(Debug, Clone, Default)]
pub struct ScanTelemetry {
    /// Threshold used to binarize the row, when the scanline came from pixels
    pub threshold: Option<f32>,
    /// Begin guard candidates
    pub begin_candidates: usize,
    /// End guard candidates
    pub end_candidates: usize,
    /// Bounds that passed the width cutoff
    pub bounds_accepted: usize,
    /// Bounds handed to the decoder before one succeeded or the list ran out
    pub bounds_tried: usize,
    /// Decodes rejected by the check digit
    pub checksum_rejections: usize,
    /// Where the attempt stopped
    pub outcome: ScanOutcome,
    /// Time spent from run grouping to the decode result
    pub elapsed: Duration,
}

/// Locate and decode one symbol on a binarized scanline.
///
/// Guard candidates are paired into bounds, and bounds are tried best first
/// until one decodes and passes its checksum.
pub fn scan_scanline<S: Symbology + ?Sized>(
    scanline: &Scanline,
    symbology: &S,
    config: &ScanConfig,
) -> (Option<DecodedBarcode>, ScanTelemetry) {
    let start = Instant::now();
    let mut tel = ScanTelemetry::default();
    let result = run_stages(scanline, symbology, config, &mut tel);
    tel.elapsed = start.elapsed();
    (result, tel)
}

fn run_stages<S: Symbology + ?Sized>(
    scanline: &Scanline,
    symbology: &S,
    config: &ScanConfig,
    tel: &mut ScanTelemetry,
) -> Option<DecodedBarcode> {
    let begin_pattern = symbology.begin_pattern();
    let end_pattern = symbology.end_pattern();

    let runs = scanline.runs();
    let begin = SequenceDetector::find_in_runs(&runs, &begin_pattern, config.sequence_tolerance);
    let end = SequenceDetector::find_in_runs(&runs, &end_pattern, config.sequence_tolerance);
    tel.begin_candidates = begin.len();
    tel.end_candidates = end.len();
    trace!(
        "{} runs, {} begin / {} end guard candidates",
        runs.len(),
        begin.len(),
        end.len()
    );

    if begin.is_empty() || end.is_empty() {
        tel.outcome = ScanOutcome::NoGuardFound;
        return None;
    }

    let resolver = BoundsResolver::new(&begin_pattern, &end_pattern, symbology.total_bits())
        .with_cutoff(config.bounds_cutoff);
    let bounds = resolver.resolve_bounds(&begin, &end);
    tel.bounds_accepted = bounds.len();
    if bounds.is_empty() {
        tel.outcome = ScanOutcome::NoBoundsAccepted;
        return None;
    }

    for candidate in bounds {
        tel.bounds_tried += 1;
        let symbol_runs = scanline.runs_in(candidate.start_pixel, candidate.stop_pixel);
        match symbology.decode(&symbol_runs) {
            Ok(digits) => {
                debug!(
                    "decoded {digits} at [{}, {}) after {} bounds",
                    candidate.start_pixel, candidate.stop_pixel, tel.bounds_tried
                );
                tel.outcome = ScanOutcome::Decoded;
                return Some(DecodedBarcode {
                    format: symbology.format(),
                    digits,
                    bounds: candidate,
                    row: 0,
                });
            }
            Err(err @ DecodeFailure::ChecksumMismatch { .. }) => {
                tel.checksum_rejections += 1;
                debug!("[{}, {}): {err}", candidate.start_pixel, candidate.stop_pixel);
            }
            Err(err) => {
                trace!("[{}, {}): {err}", candidate.start_pixel, candidate.stop_pixel);
            }
        }
    }

    tel.outcome = ScanOutcome::DecodeFailed;
    None
}
