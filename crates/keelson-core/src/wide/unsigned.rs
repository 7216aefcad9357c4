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

use crate::wide::parse::{self, ParseWideIntError};
use crate::wide::signed::I128;
#[cfg(feature = "portable-wide")]
use crate::wide::portable;
use num_traits::{Bounded, Num, One, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub, Zero};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An unsigned 128-bit integer value type.
///
/// All arithmetic wraps modulo 2^128, matching the native `u128`
/// semantics, with one deliberate exception: division and remainder by
/// zero return zero instead of panicking (a defined saturating-to-zero
/// policy chosen for branch-free callers).
///
/// On the default backend this is a transparent wrapper over `u128`.
/// With the `portable-wide` feature it is a pair of 64-bit words driven
/// by the portable arithmetic engine; behavior is identical.
///
/// # Examples
///
/// ```rust
/// use keelson_core::wide::U128;
///
/// let a = U128::from_parts(1, 0); // 2^64
/// assert_eq!(a.to_string(), "18446744073709551616");
/// assert_eq!(a / U128::ZERO, U128::ZERO);
/// ```
#[cfg(not(feature = "portable-wide"))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct U128(u128);

/// An unsigned 128-bit integer value type (portable backend).
///
/// See the default-backend documentation; the two representations are
/// behaviorally identical.
#[cfg(feature = "portable-wide")]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U128 {
    hi: u64,
    lo: u64,
}

macro_rules! impl_as_narrow {
    ($($method:ident => $t:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Truncates to `", stringify!($t), "` (two's-complement truncation of the low bits).")]
            #[inline(always)]
            pub const fn $method(self) -> $t {
                self.low() as $t
            }
        )+
    };
}

impl U128 {
    /// The value 0.
    pub const ZERO: Self = Self::from_parts(0, 0);

    /// The value 1.
    pub const ONE: Self = Self::from_parts(0, 1);

    /// The largest representable value, 2^128 - 1.
    pub const MAX: Self = Self::from_parts(u64::MAX, u64::MAX);

    /// The width of the type in bits.
    pub const BITS: u32 = 128;

    /// Assembles a value from its high and low 64-bit words, so that
    /// `value == high * 2^64 + low`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keelson_core::wide::U128;
    /// let v = U128::from_parts(0xdead, 0xbeef);
    /// assert_eq!(v.high(), 0xdead);
    /// assert_eq!(v.low(), 0xbeef);
    /// ```
    #[cfg(not(feature = "portable-wide"))]
    #[inline(always)]
    pub const fn from_parts(high: u64, low: u64) -> Self {
        Self(((high as u128) << 64) | low as u128)
    }

    /// Assembles a value from its high and low 64-bit words.
    #[cfg(feature = "portable-wide")]
    #[inline(always)]
    pub const fn from_parts(high: u64, low: u64) -> Self {
        Self { hi: high, lo: low }
    }

    /// Returns the low 64-bit word.
    #[cfg(not(feature = "portable-wide"))]
    #[inline(always)]
    pub const fn low(self) -> u64 {
        self.0 as u64
    }

    /// Returns the low 64-bit word.
    #[cfg(feature = "portable-wide")]
    #[inline(always)]
    pub const fn low(self) -> u64 {
        self.lo
    }

    /// Returns the high 64-bit word.
    #[cfg(not(feature = "portable-wide"))]
    #[inline(always)]
    pub const fn high(self) -> u64 {
        (self.0 >> 64) as u64
    }

    /// Returns the high 64-bit word.
    #[cfg(feature = "portable-wide")]
    #[inline(always)]
    pub const fn high(self) -> u64 {
        self.hi
    }

    /// Returns `true` if the value is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.low() == 0 && self.high() == 0
    }

    /// Two's-complement (modular) negation: `0 - self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keelson_core::wide::U128;
    /// assert_eq!(U128::ONE.wrapping_neg(), U128::MAX);
    /// assert_eq!(U128::ZERO.wrapping_neg(), U128::ZERO);
    /// ```
    #[inline]
    pub fn wrapping_neg(self) -> Self {
        Self::ZERO.sub_impl(self)
    }

    /// Parses a value from a string slice in the given radix (2 to 36
    /// inclusive). Unlike the arithmetic operators, parsing does not
    /// wrap: a value outside the 128-bit range is an
    /// [`ParseWideIntError::Overflow`].
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keelson_core::wide::U128;
    /// assert_eq!(U128::from_str_radix("ff", 16), Ok(U128::from(255u64)));
    /// assert!(U128::from_str_radix("", 10).is_err());
    /// ```
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseWideIntError> {
        parse::parse_unsigned(src, radix)
    }

    impl_as_narrow!(
        as_u8 => u8,
        as_u16 => u16,
        as_u32 => u32,
        as_u64 => u64,
        as_usize => usize,
        as_i8 => i8,
        as_i16 => i16,
        as_i32 => i32,
        as_i64 => i64,
        as_isize => isize,
    );

    /// Returns the full value as a native `u128`.
    #[inline(always)]
    pub const fn as_u128(self) -> u128 {
        ((self.high() as u128) << 64) | self.low() as u128
    }

    /// Reinterprets the bits as a native `i128` (two's complement).
    #[inline(always)]
    pub const fn as_i128(self) -> i128 {
        self.as_u128() as i128
    }
}

// Backend-specific operation bodies. The public operators below are
// written once against these.
#[cfg(not(feature = "portable-wide"))]
impl U128 {
    #[inline(always)]
    fn add_impl(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    #[inline(always)]
    fn sub_impl(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }

    #[inline(always)]
    fn mul_impl(self, rhs: Self) -> Self {
        Self(self.0.wrapping_mul(rhs.0))
    }

    // The zero-divisor branch preserves the defined-zero division policy
    // that the portable engine implements natively.
    #[inline(always)]
    fn div_impl(self, rhs: Self) -> Self {
        if rhs.0 == 0 { Self::ZERO } else { Self(self.0 / rhs.0) }
    }

    #[inline(always)]
    fn rem_impl(self, rhs: Self) -> Self {
        if rhs.0 == 0 { Self::ZERO } else { Self(self.0 % rhs.0) }
    }

    #[inline(always)]
    fn shl_impl(self, amount: u32) -> Self {
        if amount >= 128 { Self::ZERO } else { Self(self.0 << amount) }
    }

    #[inline(always)]
    fn shr_impl(self, amount: u32) -> Self {
        if amount >= 128 { Self::ZERO } else { Self(self.0 >> amount) }
    }

    #[inline(always)]
    fn cmp_impl(self, rhs: Self) -> Ordering {
        self.0.cmp(&rhs.0)
    }
}

#[cfg(feature = "portable-wide")]
impl U128 {
    #[inline(always)]
    fn words(self) -> portable::Words {
        (self.hi, self.lo)
    }

    #[inline(always)]
    fn from_words(words: portable::Words) -> Self {
        Self { hi: words.0, lo: words.1 }
    }

    #[inline(always)]
    fn add_impl(self, rhs: Self) -> Self {
        Self::from_words(portable::add(self.words(), rhs.words()))
    }

    #[inline(always)]
    fn sub_impl(self, rhs: Self) -> Self {
        Self::from_words(portable::sub(self.words(), rhs.words()))
    }

    #[inline(always)]
    fn mul_impl(self, rhs: Self) -> Self {
        Self::from_words(portable::mul(self.words(), rhs.words()))
    }

    #[inline(always)]
    fn div_impl(self, rhs: Self) -> Self {
        Self::from_words(portable::div(self.words(), rhs.words()))
    }

    #[inline(always)]
    fn rem_impl(self, rhs: Self) -> Self {
        Self::from_words(portable::rem(self.words(), rhs.words()))
    }

    #[inline(always)]
    fn shl_impl(self, amount: u32) -> Self {
        Self::from_words(portable::shl(self.words(), amount))
    }

    #[inline(always)]
    fn shr_impl(self, amount: u32) -> Self {
        Self::from_words(portable::shr(self.words(), amount))
    }

    #[inline(always)]
    fn cmp_impl(self, rhs: Self) -> Ordering {
        portable::cmp(self.words(), rhs.words())
    }
}

macro_rules! impl_binary_op {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $impl_fn:ident) => {
        impl std::ops::$trait_name for U128 {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                self.$impl_fn(rhs)
            }
        }
        impl std::ops::$assign_trait for U128 {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.$impl_fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, add_impl);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, sub_impl);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, mul_impl);
impl_binary_op!(Div, div, DivAssign, div_assign, div_impl);
impl_binary_op!(Rem, rem, RemAssign, rem_assign, rem_impl);

macro_rules! impl_bitwise_op {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl std::ops::$trait_name for U128 {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                Self::from_parts(self.high() $op rhs.high(), self.low() $op rhs.low())
            }
        }
        impl std::ops::$assign_trait for U128 {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = Self::from_parts(self.high() $op rhs.high(), self.low() $op rhs.low());
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl std::ops::Not for U128 {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self::from_parts(!self.high(), !self.low())
    }
}

macro_rules! impl_shift_op {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $impl_fn:ident) => {
        impl std::ops::$trait_name<u32> for U128 {
            type Output = Self;

            #[inline(always)]
            fn $method(self, amount: u32) -> Self::Output {
                self.$impl_fn(amount)
            }
        }
        impl std::ops::$assign_trait<u32> for U128 {
            #[inline(always)]
            fn $assign_method(&mut self, amount: u32) {
                *self = self.$impl_fn(amount);
            }
        }
    };
}

impl_shift_op!(Shl, shl, ShlAssign, shl_assign, shl_impl);
impl_shift_op!(Shr, shr, ShrAssign, shr_assign, shr_impl);

impl Ord for U128 {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_impl(*other)
    }
}

impl PartialOrd for U128 {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_zero_extend {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for U128 {
                #[inline(always)]
                fn from(v: $t) -> Self {
                    Self::from_parts(0, v as u64)
                }
            }
        )+
    };
}

macro_rules! impl_from_sign_extend {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for U128 {
                #[inline(always)]
                fn from(v: $t) -> Self {
                    let fill = if v < 0 { u64::MAX } else { 0 };
                    Self::from_parts(fill, v as i64 as u64)
                }
            }
        )+
    };
}

impl_from_zero_extend!(u8, u16, u32, u64, usize);
impl_from_sign_extend!(i8, i16, i32, i64, isize);

impl From<u128> for U128 {
    #[inline(always)]
    fn from(v: u128) -> Self {
        Self::from_parts((v >> 64) as u64, v as u64)
    }
}

impl From<i128> for U128 {
    #[inline(always)]
    fn from(v: i128) -> Self {
        Self::from(v as u128)
    }
}

impl From<I128> for U128 {
    /// Bit-for-bit reinterpretation of the signed value.
    #[inline(always)]
    fn from(v: I128) -> Self {
        Self::from_parts(v.high() as u64, v.low())
    }
}

impl From<U128> for u128 {
    #[inline(always)]
    fn from(v: U128) -> Self {
        v.as_u128()
    }
}

impl fmt::Display for U128 {
    /// Repeated divide-by-10 into a fixed digit buffer, emitted
    /// most-significant digit first. 128-bit values need at most 39
    /// decimal digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.pad("0");
        }

        let ten = Self::from_parts(0, 10);
        let mut digits: SmallVec<[u8; 64]> = SmallVec::new();
        let mut v = *self;
        while !U128::is_zero(v) {
            let quotient = v / ten;
            let remainder = v - quotient * ten;
            digits.push(b'0' + remainder.low() as u8);
            v = quotient;
        }
        digits.reverse();
        f.pad(std::str::from_utf8(&digits).expect("decimal digits are ASCII"))
    }
}

impl fmt::Debug for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.high() == 0 {
            write!(f, "{:x}", self.low())
        } else {
            write!(f, "{:x}{:016x}", self.high(), self.low())
        }
    }
}

impl fmt::UpperHex for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.high() == 0 {
            write!(f, "{:X}", self.low())
        } else {
            write!(f, "{:X}{:016X}", self.high(), self.low())
        }
    }
}

impl FromStr for U128 {
    type Err = ParseWideIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

impl Zero for U128 {
    #[inline(always)]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline(always)]
    fn is_zero(&self) -> bool {
        U128::is_zero(*self)
    }
}

impl One for U128 {
    #[inline(always)]
    fn one() -> Self {
        Self::ONE
    }
}

impl Bounded for U128 {
    #[inline(always)]
    fn min_value() -> Self {
        Self::ZERO
    }

    #[inline(always)]
    fn max_value() -> Self {
        Self::MAX
    }
}

impl Num for U128 {
    type FromStrRadixErr = ParseWideIntError;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        U128::from_str_radix(str, radix)
    }
}

impl WrappingAdd for U128 {
    #[inline(always)]
    fn wrapping_add(&self, v: &Self) -> Self {
        self.add_impl(*v)
    }
}

impl WrappingSub for U128 {
    #[inline(always)]
    fn wrapping_sub(&self, v: &Self) -> Self {
        self.sub_impl(*v)
    }
}

impl WrappingMul for U128 {
    #[inline(always)]
    fn wrapping_mul(&self, v: &Self) -> Self {
        self.mul_impl(*v)
    }
}

impl WrappingNeg for U128 {
    #[inline(always)]
    fn wrapping_neg(&self) -> Self {
        U128::wrapping_neg(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_roundtrip() {
        let pairs = [
            (0u64, 0u64),
            (0, 1),
            (1, 0),
            (u64::MAX, u64::MAX),
            (0xdead_beef, 0xcafe_babe),
        ];
        for (high, low) in pairs {
            let v = U128::from_parts(high, low);
            assert_eq!(v.high(), high);
            assert_eq!(v.low(), low);
        }
    }

    #[test]
    fn test_add_carries_across_words() {
        let a = U128::from_parts(0, u64::MAX);
        let b = U128::ONE;
        assert_eq!(a + b, U128::from_parts(1, 0));
        assert_eq!(U128::MAX + U128::ONE, U128::ZERO);
    }

    #[test]
    fn test_sub_borrows_across_words() {
        let a = U128::from_parts(1, 0);
        assert_eq!(a - U128::ONE, U128::from_parts(0, u64::MAX));
        assert_eq!(U128::ZERO - U128::ONE, U128::MAX);
    }

    #[test]
    fn test_mul_truncates_modulo_128_bits() {
        let a = U128::from_parts(0, u64::MAX);
        let expected = U128::from(u64::MAX as u128 * u64::MAX as u128);
        assert_eq!(a * a, expected);
        assert_eq!(U128::MAX * U128::MAX, U128::ONE);
    }

    #[test]
    fn test_division_identity() {
        let a = U128::from_parts(0x1234_5678, 0x9abc_def0_1122_3344);
        let b = U128::from(97u64);
        assert_eq!((a / b) * b + a % b, a);
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        let a = U128::from_parts(5, 42);
        assert_eq!(a / U128::ZERO, U128::ZERO);
        assert_eq!(a % U128::ZERO, U128::ZERO);
    }

    #[test]
    fn test_shift_roundtrip_masks_top_bits() {
        let v = U128::MAX;
        for k in 0u32..128 {
            let roundtrip = (v << k) >> k;
            let expected = U128::from(if k == 0 { u128::MAX } else { u128::MAX >> k });
            assert_eq!(roundtrip, expected);
        }
        assert_eq!(v << 128, U128::ZERO);
        assert_eq!(v >> 128, U128::ZERO);
    }

    #[test]
    fn test_ordering_is_lexicographic_on_words() {
        let small = U128::from_parts(0, u64::MAX);
        let big = U128::from_parts(1, 0);
        assert!(small < big);
        assert!(U128::ZERO < U128::ONE);
        assert!(U128::MAX > big);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(U128::ZERO.to_string(), "0");
        assert_eq!(U128::from_parts(1, 0).to_string(), "18446744073709551616");
        assert_eq!(
            U128::MAX.to_string(),
            "340282366920938463463374607431768211455"
        );
        assert_eq!(format!("{:x}", U128::from_parts(1, 2)), "10000000000000002");
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for v in [U128::ZERO, U128::ONE, U128::from_parts(7, 9), U128::MAX] {
            let parsed: U128 = v.to_string().parse().expect("display output parses");
            assert_eq!(parsed, v);
        }
    }

    #[test]
    fn test_parse_overflow_is_an_error() {
        // One past U128::MAX.
        let err = "340282366920938463463374607431768211456".parse::<U128>();
        assert_eq!(err, Err(ParseWideIntError::Overflow));
    }

    #[test]
    fn test_signed_sources_sign_extend() {
        assert_eq!(U128::from(-1i32), U128::MAX);
        assert_eq!(U128::from(-1i64), U128::MAX);
        assert_eq!(U128::from(1i8), U128::ONE);
    }

    #[test]
    fn test_narrowing_truncates() {
        let v = U128::from_parts(0xffff, 0x1_0000_0001);
        assert_eq!(v.as_u8(), 1);
        assert_eq!(v.as_u32(), 1);
        assert_eq!(v.as_u64(), 0x1_0000_0001);
        assert_eq!(U128::MAX.as_i64(), -1);
    }

    #[test]
    fn test_wrapping_neg() {
        assert_eq!(U128::ONE.wrapping_neg(), U128::MAX);
        assert_eq!(U128::ZERO.wrapping_neg(), U128::ZERO);
        assert_eq!(U128::MAX.wrapping_neg(), U128::ONE);
    }

    #[test]
    fn test_num_traits_integration() {
        use num_traits::{One, Zero};
        assert_eq!(U128::zero(), U128::ZERO);
        assert_eq!(U128::one(), U128::ONE);
        assert!(Zero::is_zero(&U128::ZERO));
        assert!(!Zero::is_zero(&U128::ONE));
        assert_eq!(
            <U128 as Num>::from_str_radix("2a", 16),
            Ok(U128::from(42u64))
        );
    }
}
