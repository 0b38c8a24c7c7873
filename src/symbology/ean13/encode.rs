use super::tables::{
    checksum, BEGIN_GUARD, BLOCK_DIGITS, END_GUARD, FIRST_DIGIT_PARITY, LEFT_CODES, MIDDLE_GUARD,
    PAYLOAD_DIGITS, RIGHT_CODES, TOTAL_MODULES,
};
use crate::error::EncodeError;

/// Encode a 12-digit payload as the 95 module bits of an EAN-13 symbol.
///
/// The check digit is computed and appended. Input of any other length, or
/// with a non-digit character, is rejected rather than padded or truncated.
pub fn encode(data: &str) -> Result<Vec<u8>, EncodeError> {
    let digits = parse_payload(data)?;
    let check = checksum(&digits);

    let first = digits[0] as usize;
    let parity = &FIRST_DIGIT_PARITY[first];

    let mut bits = Vec::with_capacity(TOTAL_MODULES);
    bits.extend_from_slice(&BEGIN_GUARD);
    for (i, &d) in digits[1..=BLOCK_DIGITS].iter().enumerate() {
        bits.extend_from_slice(&LEFT_CODES[parity[i] as usize][d as usize]);
    }
    bits.extend_from_slice(&MIDDLE_GUARD);
    for &d in digits[BLOCK_DIGITS + 1..].iter().chain(std::iter::once(&check)) {
        bits.extend_from_slice(&RIGHT_CODES[d as usize]);
    }
    bits.extend_from_slice(&END_GUARD);

    debug_assert_eq!(bits.len(), TOTAL_MODULES);
    Ok(bits)
}

fn parse_payload(data: &str) -> Result<[u8; PAYLOAD_DIGITS], EncodeError> {
    let actual = data.chars().count();
    if actual != PAYLOAD_DIGITS {
        return Err(EncodeError::InvalidLength {
            expected: PAYLOAD_DIGITS,
            actual,
        });
    }

    let mut digits = [0u8; PAYLOAD_DIGITS];
    for (position, c) in data.chars().enumerate() {
        if !c.is_ascii_digit() {
            return Err(EncodeError::InvalidDigit { position, found: c });
        }
        digits[position] = c as u8 - b'0';
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let bits = encode("590123412345").unwrap();
        assert_eq!(bits.len(), 95);
        assert_eq!(&bits[..3], &[1, 0, 1]);
        assert_eq!(&bits[45..50], &[0, 1, 0, 1, 0]);
        assert_eq!(&bits[92..], &[1, 0, 1]);
        // First left digit is 9 with odd parity (first digit 5 -> 011001)
        assert_eq!(&bits[3..10], &LEFT_CODES[0][9]);
        assert_eq!(&bits[10..17], &LEFT_CODES[1][0]);
        // Check digit
        assert_eq!(&bits[85..92], &RIGHT_CODES[7]);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            encode("12345"),
            Err(EncodeError::InvalidLength {
                expected: 12,
                actual: 5
            })
        );
        assert!(matches!(
            encode("5901234123457"),
            Err(EncodeError::InvalidLength { actual: 13, .. })
        ));
        assert!(encode("").is_err());
    }

    #[test]
    fn test_rejects_non_digits() {
        assert_eq!(
            encode("59012341234x"),
            Err(EncodeError::InvalidDigit {
                position: 11,
                found: 'x'
            })
        );
        assert!(matches!(
            encode("５90123412345"),
            Err(EncodeError::InvalidDigit { position: 0, .. })
        ));
    }
}
