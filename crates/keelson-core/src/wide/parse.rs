// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::wide::signed::I128;
use crate::wide::unsigned::U128;
use std::error::Error;
use std::fmt;

/// Error type for parsing the wide integer types from strings.
///
/// Returned by the `FromStr` impls and the `from_str_radix` methods of
/// [`U128`] and [`I128`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseWideIntError {
    /// The input (or the part after the sign) contained no digits.
    Empty,
    /// A character was not a valid digit in the requested radix. The
    /// position is the byte offset of the character in the input.
    InvalidDigit { character: char, position: usize },
    /// The value does not fit in 128 bits.
    Overflow,
}

impl fmt::Display for ParseWideIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => {
                write!(f, "cannot parse an integer from an empty string")
            }
            Self::InvalidDigit {
                character,
                position,
            } => {
                write!(f, "invalid digit '{}' at position {}", character, position)
            }
            Self::Overflow => {
                write!(f, "number does not fit in 128 bits")
            }
        }
    }
}

impl Error for ParseWideIntError {}

/// The magnitude of `I128::MIN`, 2^127. Only representable unsigned.
const MIN_MAGNITUDE: U128 = U128::from_parts(1 << 63, 0);

pub(crate) fn parse_unsigned(src: &str, radix: u32) -> Result<U128, ParseWideIntError> {
    let (negative, digits, offset) = split_sign(src)?;
    if negative {
        // A sign is not part of an unsigned value.
        return Err(ParseWideIntError::InvalidDigit {
            character: '-',
            position: 0,
        });
    }
    accumulate(digits, offset, radix, U128::MAX)
}

pub(crate) fn parse_signed(src: &str, radix: u32) -> Result<I128, ParseWideIntError> {
    let (negative, digits, offset) = split_sign(src)?;
    let limit = if negative {
        MIN_MAGNITUDE
    } else {
        U128::from(I128::MAX)
    };
    let magnitude = accumulate(digits, offset, radix, limit)?;
    let value = I128::from(magnitude);
    Ok(if negative { value.wrapping_neg() } else { value })
}

fn split_sign(src: &str) -> Result<(bool, &str, usize), ParseWideIntError> {
    match src.as_bytes().first() {
        None => Err(ParseWideIntError::Empty),
        Some(b'+') => Ok((false, &src[1..], 1)),
        Some(b'-') => Ok((true, &src[1..], 1)),
        Some(_) => Ok((false, src, 0)),
    }
}

/// Folds digits most-significant first, rejecting any step that would
/// push the accumulator past `limit`. `offset` is the byte position of
/// `digits` within the original input, for error reporting.
fn accumulate(
    digits: &str,
    offset: usize,
    radix: u32,
    limit: U128,
) -> Result<U128, ParseWideIntError> {
    assert!(
        (2..=36).contains(&radix),
        "radix must be in 2..=36, got {}",
        radix
    );
    if digits.is_empty() {
        return Err(ParseWideIntError::Empty);
    }

    let radix_wide = U128::from(radix as u64);
    let mut acc = U128::ZERO;
    for (index, character) in digits.char_indices() {
        let digit = character
            .to_digit(radix)
            .ok_or(ParseWideIntError::InvalidDigit {
                character,
                position: offset + index,
            })?;
        let digit_wide = U128::from(digit as u64);
        // acc * radix + digit <= limit, checked without overflowing.
        if acc > (limit - digit_wide) / radix_wide {
            return Err(ParseWideIntError::Overflow);
        }
        acc = acc * radix_wide + digit_wide;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_unsigned("", 10), Err(ParseWideIntError::Empty));
        assert_eq!(parse_signed("-", 10), Err(ParseWideIntError::Empty));
        assert_eq!(parse_signed("+", 10), Err(ParseWideIntError::Empty));
    }

    #[test]
    fn test_invalid_digit_reports_position() {
        assert_eq!(
            parse_unsigned("12x4", 10),
            Err(ParseWideIntError::InvalidDigit {
                character: 'x',
                position: 2
            })
        );
        // Position counts the sign.
        assert_eq!(
            parse_signed("-1g", 10),
            Err(ParseWideIntError::InvalidDigit {
                character: 'g',
                position: 2
            })
        );
        // '8' exists but not in base 8.
        assert_eq!(
            parse_unsigned("78", 8),
            Err(ParseWideIntError::InvalidDigit {
                character: '8',
                position: 1
            })
        );
    }

    #[test]
    fn test_sign_handling() {
        assert_eq!(parse_unsigned("+42", 10), Ok(U128::from(42u64)));
        assert_eq!(
            parse_unsigned("-42", 10),
            Err(ParseWideIntError::InvalidDigit {
                character: '-',
                position: 0
            })
        );
        assert_eq!(parse_signed("-42", 10), Ok(I128::from(-42i64)));
        assert_eq!(parse_signed("+42", 10), Ok(I128::from(42i64)));
    }

    #[test]
    fn test_radix_extremes() {
        assert_eq!(parse_unsigned("1010", 2), Ok(U128::from(10u64)));
        assert_eq!(parse_unsigned("zz", 36), Ok(U128::from(1295u64)));
        assert_eq!(parse_unsigned("ZZ", 36), Ok(U128::from(1295u64)));
        assert_eq!(parse_unsigned("deadBEEF", 16), Ok(U128::from(0xdead_beefu64)));
    }

    #[test]
    fn test_unsigned_boundary() {
        let max = "340282366920938463463374607431768211455";
        assert_eq!(parse_unsigned(max, 10), Ok(U128::MAX));
        let over = "340282366920938463463374607431768211456";
        assert_eq!(parse_unsigned(over, 10), Err(ParseWideIntError::Overflow));
        let f32s = "f".repeat(32);
        assert_eq!(parse_unsigned(&f32s, 16), Ok(U128::MAX));
        assert_eq!(
            parse_unsigned("100000000000000000000000000000000", 16),
            Err(ParseWideIntError::Overflow)
        );
    }

    #[test]
    fn test_signed_boundaries_are_asymmetric() {
        let max = "170141183460469231731687303715884105727";
        assert_eq!(parse_signed(max, 10), Ok(I128::MAX));
        let min = "-170141183460469231731687303715884105728";
        assert_eq!(parse_signed(min, 10), Ok(I128::MIN));
        // MIN's magnitude is one past MAX.
        let over = "170141183460469231731687303715884105728";
        assert_eq!(parse_signed(over, 10), Err(ParseWideIntError::Overflow));
        let under = "-170141183460469231731687303715884105729";
        assert_eq!(parse_signed(under, 10), Err(ParseWideIntError::Overflow));
    }

    #[test]
    #[should_panic(expected = "radix must be in 2..=36")]
    fn test_radix_out_of_range_panics() {
        let _ = parse_unsigned("1", 37);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ParseWideIntError::Empty.to_string(),
            "cannot parse an integer from an empty string"
        );
        assert_eq!(
            ParseWideIntError::InvalidDigit {
                character: 'x',
                position: 3
            }
            .to_string(),
            "invalid digit 'x' at position 3"
        );
        assert_eq!(
            ParseWideIntError::Overflow.to_string(),
            "number does not fit in 128 bits"
        );
    }
}
