use log::{debug, trace};

use super::tables::{
    checksum, first_digit_for_parity, BLOCK_DIGITS, BLOCK_RUNS, DATA_BITS, DIGIT_RUNS,
    LEFT_BLOCK_OFFSET, LEFT_WIDTHS, RIGHT_BLOCK_OFFSET, RIGHT_WIDTHS, SYMBOL_DIGITS, SYMBOL_RUNS,
};
use crate::decoder::normalize;
use crate::error::DecodeFailure;
use crate::models::{Bar, Run};

/// Decode the runs of one symbol, begin guard through end guard.
///
/// Only the 48 data runs are normalized; guard and middle runs sit at fixed
/// run offsets and are skipped. A left block whose parity reads all even is
/// taken as a reversed scan and decoded once more back to front.
pub fn decode(runs: &[Run]) -> Result<String, DecodeFailure> {
    if runs.len() != SYMBOL_RUNS {
        return Err(DecodeFailure::RunCountMismatch {
            expected: SYMBOL_RUNS,
            actual: runs.len(),
        });
    }

    let data: Vec<Run> = runs[LEFT_BLOCK_OFFSET..LEFT_BLOCK_OFFSET + BLOCK_RUNS]
        .iter()
        .chain(&runs[RIGHT_BLOCK_OFFSET..RIGHT_BLOCK_OFFSET + BLOCK_RUNS])
        .copied()
        .collect();
    let mut bars = normalize(&data, DATA_BITS);

    for attempt in 0..2 {
        let (left, parity) = decode_left(&bars[..BLOCK_RUNS]);
        if parity.iter().all(|&p| p == 1) {
            if attempt == 0 {
                trace!("left parity all even, retrying reversed");
                bars.reverse();
                continue;
            }
            break;
        }

        let right = decode_right(&bars[BLOCK_RUNS..]);
        let first = first_digit_for_parity(&parity).ok_or_else(|| {
            DecodeFailure::ParityLookupFailed {
                parity: parity.iter().map(|p| char::from(b'0' + p)).collect(),
            }
        })?;

        let mut digits = [0u8; SYMBOL_DIGITS];
        digits[0] = first;
        digits[1..=BLOCK_DIGITS].copy_from_slice(&left);
        digits[BLOCK_DIGITS + 1..].copy_from_slice(&right);
        let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();

        let expected = checksum(&digits);
        if expected != digits[SYMBOL_DIGITS - 1] {
            debug!("checksum rejected {text}, expected check digit {expected}");
            return Err(DecodeFailure::ChecksumMismatch {
                digits: text,
                expected,
            });
        }
        return Ok(text);
    }

    Err(DecodeFailure::OrientationUnresolved)
}

/// Digits and parity (0 odd, 1 even) of the six left-block positions
fn decode_left(bars: &[Bar]) -> ([u8; BLOCK_DIGITS], [u8; BLOCK_DIGITS]) {
    let mut digits = [0u8; BLOCK_DIGITS];
    let mut parity = [0u8; BLOCK_DIGITS];
    for (i, chunk) in bars.chunks_exact(DIGIT_RUNS).enumerate() {
        let (odd, odd_err) = best_digit(chunk, &LEFT_WIDTHS[0]);
        let (even, even_err) = best_digit(chunk, &LEFT_WIDTHS[1]);
        // Ties go to the even table
        if odd_err < even_err {
            digits[i] = odd;
        } else {
            digits[i] = even;
            parity[i] = 1;
        }
    }
    (digits, parity)
}

fn decode_right(bars: &[Bar]) -> [u8; BLOCK_DIGITS] {
    let mut digits = [0u8; BLOCK_DIGITS];
    for (i, chunk) in bars.chunks_exact(DIGIT_RUNS).enumerate() {
        digits[i] = best_digit(chunk, &RIGHT_WIDTHS).0;
    }
    digits
}

/// Digit whose run widths are closest to `bars`, lowest digit on ties
fn best_digit(bars: &[Bar], table: &[[u8; DIGIT_RUNS]; 10]) -> (u8, f32) {
    let mut best = (0u8, f32::INFINITY);
    for (digit, widths) in table.iter().enumerate() {
        let err: f32 = bars
            .iter()
            .zip(widths)
            .map(|(bar, &w)| (bar.width - w as f32).abs())
            .sum();
        if err < best.1 {
            best = (digit as u8, err);
        }
    }
    best
}
