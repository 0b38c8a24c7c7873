//! EAN-13 symbology tables
//!
//! Bit patterns use 1 for a bar and 0 for a space. Run offsets used by the
//! decoder are derived from these tables rather than written out by hand.

/// Start guard
pub const BEGIN_GUARD: [u8; 3] = [1, 0, 1];
/// Center guard between the left and right blocks
pub const MIDDLE_GUARD: [u8; 5] = [0, 1, 0, 1, 0];
/// End guard
pub const END_GUARD: [u8; 3] = [1, 0, 1];

/// Bits per encoded digit
pub const DIGIT_BITS: usize = 7;
/// Digits per block (left and right)
pub const BLOCK_DIGITS: usize = 6;
/// Payload digits accepted by the encoder
pub const PAYLOAD_DIGITS: usize = 12;
/// Digits in a full symbol, check digit included
pub const SYMBOL_DIGITS: usize = 13;

/// Explicitly encoded data bits (12 digits x 7). The first digit is implied by parity.
pub const DATA_BITS: usize = 2 * BLOCK_DIGITS * DIGIT_BITS;
/// Modules across the whole symbol, guards included
pub const TOTAL_MODULES: usize =
    BEGIN_GUARD.len() + DATA_BITS + MIDDLE_GUARD.len() + END_GUARD.len();

/// Left-block parity per position, indexed by first digit (0 = odd/L, 1 = even/G)
pub const FIRST_DIGIT_PARITY: [[u8; BLOCK_DIGITS]; 10] = [
    [0, 0, 0, 0, 0, 0], // 0
    [0, 0, 1, 0, 1, 1], // 1
    [0, 0, 1, 1, 0, 1], // 2
    [0, 0, 1, 1, 1, 0], // 3
    [0, 1, 0, 0, 1, 1], // 4
    [0, 1, 1, 0, 0, 1], // 5
    [0, 1, 1, 1, 0, 0], // 6
    [0, 1, 0, 1, 0, 1], // 7
    [0, 1, 0, 1, 1, 0], // 8
    [0, 1, 1, 0, 1, 0], // 9
];

/// Left-block digit codes, indexed by parity then digit
pub const LEFT_CODES: [[[u8; DIGIT_BITS]; 10]; 2] = [
    [
        [0, 0, 0, 1, 1, 0, 1],
        [0, 0, 1, 1, 0, 0, 1],
        [0, 0, 1, 0, 0, 1, 1],
        [0, 1, 1, 1, 1, 0, 1],
        [0, 1, 0, 0, 0, 1, 1],
        [0, 1, 1, 0, 0, 0, 1],
        [0, 1, 0, 1, 1, 1, 1],
        [0, 1, 1, 1, 0, 1, 1],
        [0, 1, 1, 0, 1, 1, 1],
        [0, 0, 0, 1, 0, 1, 1],
    ],
    [
        [0, 1, 0, 0, 1, 1, 1],
        [0, 1, 1, 0, 0, 1, 1],
        [0, 0, 1, 1, 0, 1, 1],
        [0, 1, 0, 0, 0, 0, 1],
        [0, 0, 1, 1, 1, 0, 1],
        [0, 1, 1, 1, 0, 0, 1],
        [0, 0, 0, 0, 1, 0, 1],
        [0, 0, 1, 0, 0, 0, 1],
        [0, 0, 0, 1, 0, 0, 1],
        [0, 0, 1, 0, 1, 1, 1],
    ],
];

/// Right-block digit codes
pub const RIGHT_CODES: [[u8; DIGIT_BITS]; 10] = [
    [1, 1, 1, 0, 0, 1, 0],
    [1, 1, 0, 0, 1, 1, 0],
    [1, 1, 0, 1, 1, 0, 0],
    [1, 0, 0, 0, 0, 1, 0],
    [1, 0, 1, 1, 1, 0, 0],
    [1, 0, 0, 1, 1, 1, 0],
    [1, 0, 1, 0, 0, 0, 0],
    [1, 0, 0, 0, 1, 0, 0],
    [1, 0, 0, 1, 0, 0, 0],
    [1, 1, 1, 0, 1, 0, 0],
];

/// Number of runs a bit pattern groups into
pub const fn run_count(bits: &[u8]) -> usize {
    if bits.is_empty() {
        return 0;
    }
    let mut runs = 1;
    let mut i = 1;
    while i < bits.len() {
        if bits[i] != bits[i - 1] {
            runs += 1;
        }
        i += 1;
    }
    runs
}

/// Runs per encoded digit
pub const DIGIT_RUNS: usize = run_count(&RIGHT_CODES[0]);

const fn codes_have_runs(codes: &[[u8; DIGIT_BITS]; 10], runs: usize) -> bool {
    let mut d = 0;
    while d < 10 {
        if run_count(&codes[d]) != runs {
            return false;
        }
        d += 1;
    }
    true
}

// Fixed offsets below are only valid if every digit groups into the same run
// count and each block boundary changes value.
const _: () = assert!(codes_have_runs(&LEFT_CODES[0], DIGIT_RUNS));
const _: () = assert!(codes_have_runs(&LEFT_CODES[1], DIGIT_RUNS));
const _: () = assert!(codes_have_runs(&RIGHT_CODES, DIGIT_RUNS));
const _: () = assert!(BEGIN_GUARD[BEGIN_GUARD.len() - 1] != LEFT_CODES[0][0][0]);
const _: () = assert!(LEFT_CODES[0][0][DIGIT_BITS - 1] != MIDDLE_GUARD[0]);
const _: () = assert!(MIDDLE_GUARD[MIDDLE_GUARD.len() - 1] != RIGHT_CODES[0][0]);
const _: () = assert!(RIGHT_CODES[0][DIGIT_BITS - 1] != END_GUARD[0]);

/// Runs in one block of six digits
pub const BLOCK_RUNS: usize = BLOCK_DIGITS * DIGIT_RUNS;
/// Index of the first left-block run in a symbol's run sequence
pub const LEFT_BLOCK_OFFSET: usize = run_count(&BEGIN_GUARD);
/// Index of the first right-block run in a symbol's run sequence
pub const RIGHT_BLOCK_OFFSET: usize = LEFT_BLOCK_OFFSET + BLOCK_RUNS + run_count(&MIDDLE_GUARD);
/// Runs in a whole symbol
pub const SYMBOL_RUNS: usize = RIGHT_BLOCK_OFFSET + BLOCK_RUNS + run_count(&END_GUARD);

const fn digit_widths(bits: &[u8; DIGIT_BITS]) -> [u8; DIGIT_RUNS] {
    let mut widths = [0u8; DIGIT_RUNS];
    let mut run = 0;
    let mut i = 0;
    while i < DIGIT_BITS {
        if i > 0 && bits[i] != bits[i - 1] {
            run += 1;
        }
        widths[run] += 1;
        i += 1;
    }
    widths
}

const fn table_widths(codes: &[[u8; DIGIT_BITS]; 10]) -> [[u8; DIGIT_RUNS]; 10] {
    let mut out = [[0u8; DIGIT_RUNS]; 10];
    let mut d = 0;
    while d < 10 {
        out[d] = digit_widths(&codes[d]);
        d += 1;
    }
    out
}

/// Grouped run widths of the left codes, indexed by parity then digit
pub static LEFT_WIDTHS: [[[u8; DIGIT_RUNS]; 10]; 2] =
    [table_widths(&LEFT_CODES[0]), table_widths(&LEFT_CODES[1])];
/// Grouped run widths of the right codes
pub static RIGHT_WIDTHS: [[u8; DIGIT_RUNS]; 10] = table_widths(&RIGHT_CODES);

/// Check digit for the first 12 digits (values 0-9)
///
/// Digits at even 0-based positions weigh 1, odd positions weigh 3; the check
/// digit rounds the weighted sum up to a multiple of ten. Digits past the
/// twelfth are ignored, so a full 13-digit symbol can be passed as is.
pub fn checksum(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .take(PAYLOAD_DIGITS)
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { d as u32 } else { d as u32 * 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// First digit implied by a left-block parity pattern
pub fn first_digit_for_parity(parity: &[u8; BLOCK_DIGITS]) -> Option<u8> {
    FIRST_DIGIT_PARITY
        .iter()
        .position(|p| p == parity)
        .map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_layout() {
        assert_eq!(DIGIT_RUNS, 4);
        assert_eq!(LEFT_BLOCK_OFFSET, 3);
        assert_eq!(RIGHT_BLOCK_OFFSET, 32);
        assert_eq!(SYMBOL_RUNS, 59);
        assert_eq!(DATA_BITS, 84);
        assert_eq!(TOTAL_MODULES, 95);
    }

    #[test]
    fn test_widths() {
        assert_eq!(LEFT_WIDTHS[0][0], [3, 2, 1, 1]);
        assert_eq!(LEFT_WIDTHS[1][0], [1, 1, 2, 3]);
        assert_eq!(RIGHT_WIDTHS[6], [1, 1, 1, 4]);
        // Even-parity codes are the odd codes' mirror image
        for d in 0..10 {
            let mut mirrored = RIGHT_WIDTHS[d];
            mirrored.reverse();
            assert_eq!(LEFT_WIDTHS[1][d], mirrored);
            assert_eq!(LEFT_WIDTHS[0][d], RIGHT_WIDTHS[d]);
        }
    }

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(&[5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5]), 7);
        assert_eq!(checksum(&[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]), 1);
        assert_eq!(checksum(&[0; 12]), 0);
        // Trailing check digit is ignored
        assert_eq!(checksum(&[5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5, 7]), 7);
        assert_eq!(checksum(&[5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5, 8]), 7);
    }

    #[test]
    fn test_checksum_rejects_wrong_check_digit() {
        let symbol = [5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5, 8];
        assert_ne!(checksum(&symbol), symbol[12]);
    }

    #[test]
    fn test_first_digit_for_parity() {
        assert_eq!(first_digit_for_parity(&[0, 1, 1, 0, 0, 1]), Some(5));
        assert_eq!(first_digit_for_parity(&[0; 6]), Some(0));
        assert_eq!(first_digit_for_parity(&[1; 6]), None);
    }
}
