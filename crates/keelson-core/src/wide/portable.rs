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

//! Portable dual-64-bit-word arithmetic engine for the 128-bit integer
//! types.
//!
//! Every function operates on `(high, low)` word pairs with the invariant
//! `value == high * 2^64 + low`. Signedness is a property of the caller's
//! interpretation: addition, subtraction, multiplication, and the logical
//! shifts are sign-agnostic under two's complement, so the signed type
//! reuses them directly. Division, the arithmetic right shift, and the
//! signed comparison are the only operations with dedicated signed
//! handling, which lives in `signed.rs` on top of the unsigned primitives
//! here.
//!
//! This module is compiled regardless of the selected backend so that its
//! algorithms can always be checked against the native `u128`/`i128`
//! operations.

use std::cmp::Ordering;

/// A 128-bit value as a `(high, low)` pair of 64-bit words.
pub(crate) type Words = (u64, u64);

/// Wrapping addition. The carry out of the low word is detected by the
/// low result comparing less than the low operand.
#[inline]
pub(crate) const fn add(lhs: Words, rhs: Words) -> Words {
    let hi = lhs.0.wrapping_add(rhs.0);
    let lo = lhs.1.wrapping_add(rhs.1);
    if lo < lhs.1 {
        (hi.wrapping_add(1), lo)
    } else {
        (hi, lo)
    }
}

/// Wrapping subtraction. The borrow out of the low word is detected by
/// the low operand comparing less than the low subtrahend.
#[inline]
pub(crate) const fn sub(lhs: Words, rhs: Words) -> Words {
    let hi = lhs.0.wrapping_sub(rhs.0);
    let lo = lhs.1.wrapping_sub(rhs.1);
    if lhs.1 < rhs.1 {
        (hi.wrapping_sub(1), lo)
    } else {
        (hi, lo)
    }
}

/// Truncating 128x128 -> 128 schoolbook multiplication.
///
/// The low words are split into 32-bit halves; the `high * low` cross
/// terms contribute only their truncated low 64 bits because everything
/// above bit 127 is discarded, matching native wraparound multiply.
#[inline]
pub(crate) const fn mul(lhs: Words, rhs: Words) -> Words {
    let a32 = lhs.1 >> 32;
    let a00 = lhs.1 & 0xffff_ffff;
    let b32 = rhs.1 >> 32;
    let b00 = rhs.1 & 0xffff_ffff;

    let hi = lhs
        .0
        .wrapping_mul(rhs.1)
        .wrapping_add(lhs.1.wrapping_mul(rhs.0))
        .wrapping_add(a32.wrapping_mul(b32));

    let mut result = (hi, a00.wrapping_mul(b00));
    result = add(result, shl((0, a32.wrapping_mul(b00)), 32));
    result = add(result, shl((0, a00.wrapping_mul(b32)), 32));
    result
}

/// Unsigned binary long division. Division by zero returns zero by design.
///
/// The divisor is doubled while it still fits under the dividend and the
/// doubling cannot reach the top bit of the high word (the `< 1 << 63`
/// guard stops one step before that overflow), then a test-and-subtract
/// pass walks the recorded shifts from most significant down to zero.
pub(crate) fn div(lhs: Words, rhs: Words) -> Words {
    if is_zero(rhs) || cmp(lhs, rhs) == Ordering::Less {
        return (0, 0);
    }

    let mut quotient: Words = (0, 0);
    let mut remainder = lhs;

    let mut shift: u32 = 0;
    let mut temp = rhs;
    while cmp(temp, remainder) != Ordering::Greater && temp.0 < (1u64 << 63) {
        temp = shl(temp, 1);
        shift += 1;
    }

    let mut i = shift as i64;
    while i >= 0 {
        let shifted_divisor = shl(rhs, i as u32);
        if cmp(remainder, shifted_divisor) != Ordering::Less {
            remainder = sub(remainder, shifted_divisor);
            quotient = or(quotient, shl((0, 1), i as u32));
        }
        i -= 1;
    }

    quotient
}

/// Unsigned remainder, derived from [`div`]. Remainder by zero is zero.
pub(crate) fn rem(lhs: Words, rhs: Words) -> Words {
    if is_zero(rhs) {
        return (0, 0);
    }
    sub(lhs, mul(div(lhs, rhs), rhs))
}

/// Left shift. Amount 0 is the identity (a native shift by the full word
/// width would be undefined), amounts of 128 or more yield zero, and
/// amounts in `64..128` move the low word entirely into the high word.
#[inline]
pub(crate) const fn shl(v: Words, amount: u32) -> Words {
    if amount == 0 {
        return v;
    }
    if amount >= 128 {
        return (0, 0);
    }
    if amount >= 64 {
        return (v.1 << (amount - 64), 0);
    }
    ((v.0 << amount) | (v.1 >> (64 - amount)), v.1 << amount)
}

/// Logical right shift, mirroring [`shl`]'s amount handling.
#[inline]
pub(crate) const fn shr(v: Words, amount: u32) -> Words {
    if amount == 0 {
        return v;
    }
    if amount >= 128 {
        return (0, 0);
    }
    if amount >= 64 {
        return (0, v.0 >> (amount - 64));
    }
    (v.0 >> amount, (v.1 >> amount) | (v.0 << (64 - amount)))
}

/// Arithmetic (sign-extending) right shift with the high word read as
/// signed. Amounts of 128 or more saturate to 0 or -1 by sign.
#[inline]
pub(crate) const fn shr_arithmetic(v: Words, amount: u32) -> Words {
    let hi = v.0 as i64;
    if amount == 0 {
        return v;
    }
    if amount >= 128 {
        return if hi < 0 { (u64::MAX, u64::MAX) } else { (0, 0) };
    }
    if amount >= 64 {
        let fill = if hi < 0 { u64::MAX } else { 0 };
        return (fill, (hi >> (amount - 64)) as u64);
    }
    ((hi >> amount) as u64, (v.1 >> amount) | (v.0 << (64 - amount)))
}

/// Two's-complement negation.
#[inline]
pub(crate) const fn neg(v: Words) -> Words {
    let carry = if v.1 == 0 { 1 } else { 0 };
    ((!v.0).wrapping_add(carry), (!v.1).wrapping_add(1))
}

/// Bitwise or.
#[inline]
pub(crate) const fn or(lhs: Words, rhs: Words) -> Words {
    (lhs.0 | rhs.0, lhs.1 | rhs.1)
}

/// Unsigned comparison: high words first, low words as the tie-break.
#[inline]
pub(crate) fn cmp(lhs: Words, rhs: Words) -> Ordering {
    if lhs.0 == rhs.0 {
        lhs.1.cmp(&rhs.1)
    } else {
        lhs.0.cmp(&rhs.0)
    }
}

/// Signed comparison: high words as signed first, low words unsigned.
#[inline]
pub(crate) fn cmp_signed(lhs: Words, rhs: Words) -> Ordering {
    let lhs_hi = lhs.0 as i64;
    let rhs_hi = rhs.0 as i64;
    if lhs_hi == rhs_hi {
        lhs.1.cmp(&rhs.1)
    } else {
        lhs_hi.cmp(&rhs_hi)
    }
}

/// Returns `true` if both words are zero.
#[inline]
pub(crate) const fn is_zero(v: Words) -> bool {
    v.0 == 0 && v.1 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn words(v: u128) -> Words {
        ((v >> 64) as u64, v as u64)
    }

    fn value(w: Words) -> u128 {
        ((w.0 as u128) << 64) | w.1 as u128
    }

    /// Edge vectors that exercise carries, borrows, and word boundaries.
    const EDGES: [u128; 12] = [
        0,
        1,
        2,
        9,
        10,
        u64::MAX as u128,
        (u64::MAX as u128) + 1,
        1 << 64,
        (1 << 64) + 1,
        u128::MAX - 1,
        u128::MAX,
        1 << 127,
    ];

    #[test]
    fn test_add_matches_native_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                assert_eq!(value(add(words(a), words(b))), a.wrapping_add(b));
            }
        }
    }

    #[test]
    fn test_sub_matches_native_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                assert_eq!(value(sub(words(a), words(b))), a.wrapping_sub(b));
            }
        }
    }

    #[test]
    fn test_mul_matches_native_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                assert_eq!(value(mul(words(a), words(b))), a.wrapping_mul(b));
            }
        }
    }

    #[test]
    fn test_div_rem_match_native_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                if b == 0 {
                    assert_eq!(value(div(words(a), words(b))), 0);
                    assert_eq!(value(rem(words(a), words(b))), 0);
                } else {
                    assert_eq!(value(div(words(a), words(b))), a / b);
                    assert_eq!(value(rem(words(a), words(b))), a % b);
                }
            }
        }
    }

    #[test]
    fn test_shifts_match_native_for_all_amounts() {
        for &a in &EDGES {
            for amount in 0u32..=130 {
                let expected_shl = if amount >= 128 { 0 } else { a << amount };
                let expected_shr = if amount >= 128 { 0 } else { a >> amount };
                assert_eq!(value(shl(words(a), amount)), expected_shl);
                assert_eq!(value(shr(words(a), amount)), expected_shr);

                let signed = a as i128;
                let expected_sar = if amount >= 128 {
                    if signed < 0 { -1 } else { 0 }
                } else {
                    signed >> amount
                };
                assert_eq!(
                    value(shr_arithmetic(words(a), amount)) as i128,
                    expected_sar
                );
            }
        }
    }

    #[test]
    fn test_neg_matches_native_on_edges() {
        for &a in &EDGES {
            assert_eq!(value(neg(words(a))), a.wrapping_neg());
        }
    }

    #[test]
    fn test_cmp_matches_native_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                assert_eq!(cmp(words(a), words(b)), a.cmp(&b));
                assert_eq!(
                    cmp_signed(words(a), words(b)),
                    (a as i128).cmp(&(b as i128))
                );
            }
        }
    }

    #[test]
    fn test_division_identity_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                if b == 0 {
                    continue;
                }
                let q = div(words(a), words(b));
                let r = rem(words(a), words(b));
                assert_eq!(value(add(mul(q, words(b)), r)), a);
            }
        }
    }

    #[test]
    fn test_randomized_against_native() {
        let mut rng = StdRng::seed_from_u64(0x6b65_656c_736f_6e);
        for _ in 0..10_000 {
            let a: u128 = rng.gen();
            let b: u128 = rng.gen();

            assert_eq!(value(add(words(a), words(b))), a.wrapping_add(b));
            assert_eq!(value(sub(words(a), words(b))), a.wrapping_sub(b));
            assert_eq!(value(mul(words(a), words(b))), a.wrapping_mul(b));
            assert_eq!(cmp(words(a), words(b)), a.cmp(&b));

            let divisor = b >> (rng.gen_range(0..128));
            if divisor == 0 {
                assert_eq!(value(div(words(a), words(divisor))), 0);
                assert_eq!(value(rem(words(a), words(divisor))), 0);
            } else {
                assert_eq!(value(div(words(a), words(divisor))), a / divisor);
                assert_eq!(value(rem(words(a), words(divisor))), a % divisor);
            }

            let amount = rng.gen_range(0u32..=128);
            let expected_shl = if amount >= 128 { 0 } else { a << amount };
            let expected_shr = if amount >= 128 { 0 } else { a >> amount };
            assert_eq!(value(shl(words(a), amount)), expected_shl);
            assert_eq!(value(shr(words(a), amount)), expected_shr);
        }
    }

    #[test]
    fn test_shift_roundtrip_zeroes_top_bits() {
        for &a in &EDGES {
            for k in 0u32..128 {
                let roundtrip = value(shr(shl(words(a), k), k));
                let expected = if k == 0 { a } else { a & (u128::MAX >> k) };
                assert_eq!(roundtrip, expected);
            }
        }
    }
}
