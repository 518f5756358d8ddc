//! # Duration Codec
//!
//! Converts the duration suffix of a note (`""`, `"/"`, `"/8"`, `"4"`, ...) to a
//! 4-bit length code, and a length code back to a fraction of the reference
//! unit.
//!
//! | Code | Notation | Fraction |
//! |------|----------|----------|
//! | 0    | `/32`    | 1/32     |
//! | 1    | `/16`    | 1/16     |
//! | 2    | `/8`     | 1/8      |
//! | 3    | `/4`     | 1/4      |
//! | 4    | `/2`, `/`| 1/2      |
//! | 5    | (none)   | 1        |
//! | 6    | `2`      | 2        |
//! | 7    | `4`      | 4        |
//! | 8    | `8`      | 8        |
//! | 9    | `16`     | 16       |
//!
//! `/1` and `1` are accepted as spellings of code 5. A run of `n` slashes is
//! shorthand for `/2^n`, so `//` is `/4` and `/////` is `/32`.
//!
//! All knowledge of the length table lives in this module; the rest of the
//! crate only passes codes around.

use crate::error::DurationError;

/// Code for one reference unit.
pub const UNIT: u8 = 5;

/// Highest valid length code.
pub const MAX_CODE: u8 = 9;

const FRACTIONS: [f64; 10] = [
    1.0 / 32.0,
    1.0 / 16.0,
    1.0 / 8.0,
    1.0 / 4.0,
    1.0 / 2.0,
    1.0,
    2.0,
    4.0,
    8.0,
    16.0,
];

const NOTATIONS: [&str; 10] = ["/32", "/16", "/8", "/4", "/2", "", "2", "4", "8", "16"];

/// Encode a duration string into a length code.
///
/// ```
/// use abcpack::duration::encode;
///
/// assert_eq!(encode(""), Ok(5));
/// assert_eq!(encode("/"), Ok(4));
/// assert_eq!(encode("/8"), Ok(2));
/// assert_eq!(encode("///"), Ok(2));
/// assert_eq!(encode("4"), Ok(7));
/// assert!(encode("/3").is_err());
/// ```
pub fn encode(duration: &str) -> Result<u8, DurationError> {
    if duration.is_empty() {
        return Ok(UNIT);
    }

    if let Some(divisor) = duration.strip_prefix('/') {
        // "/" is shorthand for "/2"
        if divisor.is_empty() {
            return Ok(4);
        }
        // each extra slash halves again: "//" is "/4", "///" is "/8"
        let divisor = if divisor.chars().all(|c| c == '/') {
            1u32.checked_shl(duration.len() as u32)
                .ok_or_else(|| DurationError::Malformed(duration.to_string()))?
        } else {
            parse_number(divisor, duration)?
        };
        return match divisor {
            32 => Ok(0),
            16 => Ok(1),
            8 => Ok(2),
            4 => Ok(3),
            2 => Ok(4),
            1 => Ok(5),
            other => Err(DurationError::InvalidDivisor(other)),
        };
    }

    let multiplier = parse_number(duration, duration)?;
    match multiplier {
        1 => Ok(5),
        2 => Ok(6),
        4 => Ok(7),
        8 => Ok(8),
        16 => Ok(9),
        other => Err(DurationError::InvalidMultiplier(other)),
    }
}

fn parse_number(digits: &str, whole: &str) -> Result<u32, DurationError> {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DurationError::Malformed(whole.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DurationError::Malformed(whole.to_string()))
}

/// Decode a length code into a fraction of the reference unit.
pub fn decode(code: u8) -> Result<f64, DurationError> {
    FRACTIONS
        .get(code as usize)
        .copied()
        .ok_or(DurationError::InvalidCode(code))
}

/// Canonical duration string for a length code.
pub fn notation(code: u8) -> Result<&'static str, DurationError> {
    NOTATIONS
        .get(code as usize)
        .copied()
        .ok_or(DurationError::InvalidCode(code))
}
