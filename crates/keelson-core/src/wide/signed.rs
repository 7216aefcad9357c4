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
#[cfg(feature = "portable-wide")]
use crate::wide::portable;
use crate::wide::unsigned::U128;
use num_traits::{
    Bounded, Num, One, Signed, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub, Zero,
};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A signed 128-bit integer value type (two's complement).
///
/// All arithmetic wraps modulo 2^128, matching the native `i128`
/// wrapping semantics: negating [`I128::MIN`] yields `I128::MIN`, and
/// `I128::MIN / -1` yields `I128::MIN`. Division and remainder by zero
/// return zero instead of panicking; the remainder takes the sign of
/// the dividend, division truncates toward zero.
///
/// On the default backend this is a transparent wrapper over `i128`.
/// With the `portable-wide` feature it is a signed-high/unsigned-low
/// pair of 64-bit words driven by the portable arithmetic engine;
/// behavior is identical.
///
/// # Examples
///
/// ```rust
/// use keelson_core::wide::I128;
///
/// let a = I128::from(-7i64);
/// let b = I128::from(3i64);
/// assert_eq!((a / b).to_string(), "-2");
/// assert_eq!((a % b).to_string(), "-1");
/// assert_eq!(-I128::MIN, I128::MIN);
/// ```
#[cfg(not(feature = "portable-wide"))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct I128(i128);

/// A signed 128-bit integer value type (portable backend).
///
/// See the default-backend documentation; the two representations are
/// behaviorally identical.
#[cfg(feature = "portable-wide")]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct I128 {
    hi: i64,
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

impl I128 {
    /// The value 0.
    pub const ZERO: Self = Self::from_parts(0, 0);

    /// The value 1.
    pub const ONE: Self = Self::from_parts(0, 1);

    /// The smallest representable value, -2^127.
    pub const MIN: Self = Self::from_parts(i64::MIN, 0);

    /// The largest representable value, 2^127 - 1.
    pub const MAX: Self = Self::from_parts(i64::MAX, u64::MAX);

    /// The width of the type in bits.
    pub const BITS: u32 = 128;

    /// Assembles a value from its signed high and unsigned low 64-bit
    /// words, so that `value == high * 2^64 + low`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keelson_core::wide::I128;
    /// assert_eq!(I128::from_parts(-1, u64::MAX), I128::from(-1i64));
    /// ```
    #[cfg(not(feature = "portable-wide"))]
    #[inline(always)]
    pub const fn from_parts(high: i64, low: u64) -> Self {
        Self(((high as i128) << 64) | low as i128)
    }

    /// Assembles a value from its signed high and unsigned low 64-bit
    /// words.
    #[cfg(feature = "portable-wide")]
    #[inline(always)]
    pub const fn from_parts(high: i64, low: u64) -> Self {
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

    /// Returns the high 64-bit word, which carries the sign.
    #[cfg(not(feature = "portable-wide"))]
    #[inline(always)]
    pub const fn high(self) -> i64 {
        (self.0 >> 64) as i64
    }

    /// Returns the high 64-bit word, which carries the sign.
    #[cfg(feature = "portable-wide")]
    #[inline(always)]
    pub const fn high(self) -> i64 {
        self.hi
    }

    /// Returns `true` if the value is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.low() == 0 && self.high() == 0
    }

    /// Returns `true` if the value is strictly negative.
    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.high() < 0
    }

    /// Two's-complement (modular) negation: `0 - self`. Negating
    /// [`I128::MIN`] wraps back to `I128::MIN`.
    #[inline]
    pub fn wrapping_neg(self) -> Self {
        Self::ZERO.sub_impl(self)
    }

    /// The absolute value reinterpreted as an unsigned 128-bit value.
    /// Well-defined for every input including [`I128::MIN`], whose
    /// magnitude (2^127) does not fit in `I128` itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keelson_core::wide::{I128, U128};
    /// assert_eq!(I128::from(-5i64).unsigned_abs(), U128::from(5u64));
    /// assert_eq!(I128::MIN.unsigned_abs(), U128::from_parts(1 << 63, 0));
    /// ```
    #[inline]
    pub fn unsigned_abs(self) -> U128 {
        if self.is_negative() {
            U128::from(self.wrapping_neg())
        } else {
            U128::from(self)
        }
    }

    /// Parses a value from a string slice in the given radix (2 to 36
    /// inclusive), with an optional leading `+` or `-` sign. Parsing
    /// does not wrap: a value outside the signed 128-bit range is an
    /// [`ParseWideIntError::Overflow`].
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseWideIntError> {
        parse::parse_signed(src, radix)
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

    /// Returns the full value as a native `i128`.
    #[inline(always)]
    pub const fn as_i128(self) -> i128 {
        ((self.high() as i128) << 64) | self.low() as i128
    }

    /// Reinterprets the bits as a native `u128` (two's complement).
    #[inline(always)]
    pub const fn as_u128(self) -> u128 {
        self.as_i128() as u128
    }
}

// Backend-specific operation bodies. The public operators below are
// written once against these.
#[cfg(not(feature = "portable-wide"))]
impl I128 {
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

    // Zero divisors map to zero; MIN / -1 wraps to MIN instead of
    // trapping, which `wrapping_div` already provides.
    #[inline(always)]
    fn div_impl(self, rhs: Self) -> Self {
        if rhs.0 == 0 {
            Self::ZERO
        } else {
            Self(self.0.wrapping_div(rhs.0))
        }
    }

    #[inline(always)]
    fn rem_impl(self, rhs: Self) -> Self {
        if rhs.0 == 0 {
            Self::ZERO
        } else {
            Self(self.0.wrapping_rem(rhs.0))
        }
    }

    #[inline(always)]
    fn shl_impl(self, amount: u32) -> Self {
        if amount >= 128 { Self::ZERO } else { Self(self.0 << amount) }
    }

    // Arithmetic shift: saturates to 0 or -1 once every bit is sign fill.
    #[inline(always)]
    fn shr_impl(self, amount: u32) -> Self {
        if amount >= 128 {
            if self.0 < 0 { Self(-1) } else { Self::ZERO }
        } else {
            Self(self.0 >> amount)
        }
    }

    #[inline(always)]
    fn cmp_impl(self, rhs: Self) -> Ordering {
        self.0.cmp(&rhs.0)
    }
}

#[cfg(feature = "portable-wide")]
impl I128 {
    #[inline(always)]
    fn words(self) -> portable::Words {
        (self.hi as u64, self.lo)
    }

    #[inline(always)]
    fn from_words(words: portable::Words) -> Self {
        Self { hi: words.0 as i64, lo: words.1 }
    }

    // Magnitude of the value as raw words. For MIN this is 2^127, which
    // only exists as an unsigned quantity.
    #[inline(always)]
    fn abs_words(self) -> portable::Words {
        if self.is_negative() {
            portable::neg(self.words())
        } else {
            self.words()
        }
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

    // Truncating division via unsigned magnitudes: the quotient is
    // negative exactly when the operand signs differ.
    #[inline(always)]
    fn div_impl(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return Self::ZERO;
        }
        let quotient = Self::from_words(portable::div(self.abs_words(), rhs.abs_words()));
        if self.is_negative() != rhs.is_negative() {
            quotient.wrapping_neg()
        } else {
            quotient
        }
    }

    // The remainder takes the sign of the dividend.
    #[inline(always)]
    fn rem_impl(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return Self::ZERO;
        }
        let remainder = Self::from_words(portable::rem(self.abs_words(), rhs.abs_words()));
        if self.is_negative() {
            remainder.wrapping_neg()
        } else {
            remainder
        }
    }

    #[inline(always)]
    fn shl_impl(self, amount: u32) -> Self {
        Self::from_words(portable::shl(self.words(), amount))
    }

    #[inline(always)]
    fn shr_impl(self, amount: u32) -> Self {
        Self::from_words(portable::shr_arithmetic(self.words(), amount))
    }

    #[inline(always)]
    fn cmp_impl(self, rhs: Self) -> Ordering {
        portable::cmp_signed(self.words(), rhs.words())
    }
}

macro_rules! impl_binary_op {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $impl_fn:ident) => {
        impl std::ops::$trait_name for I128 {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                self.$impl_fn(rhs)
            }
        }
        impl std::ops::$assign_trait for I128 {
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
        impl std::ops::$trait_name for I128 {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self::Output {
                Self::from_parts(self.high() $op rhs.high(), self.low() $op rhs.low())
            }
        }
        impl std::ops::$assign_trait for I128 {
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

impl std::ops::Not for I128 {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self::from_parts(!self.high(), !self.low())
    }
}

impl std::ops::Neg for I128 {
    type Output = Self;

    /// Wrapping negation; `-I128::MIN` is `I128::MIN`.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.wrapping_neg()
    }
}

macro_rules! impl_shift_op {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $impl_fn:ident) => {
        impl std::ops::$trait_name<u32> for I128 {
            type Output = Self;

            #[inline(always)]
            fn $method(self, amount: u32) -> Self::Output {
                self.$impl_fn(amount)
            }
        }
        impl std::ops::$assign_trait<u32> for I128 {
            #[inline(always)]
            fn $assign_method(&mut self, amount: u32) {
                *self = self.$impl_fn(amount);
            }
        }
    };
}

impl_shift_op!(Shl, shl, ShlAssign, shl_assign, shl_impl);
impl_shift_op!(Shr, shr, ShrAssign, shr_assign, shr_impl);

impl Ord for I128 {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_impl(*other)
    }
}

impl PartialOrd for I128 {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_zero_extend {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for I128 {
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
            impl From<$t> for I128 {
                #[inline(always)]
                fn from(v: $t) -> Self {
                    let fill = if v < 0 { -1i64 } else { 0 };
                    Self::from_parts(fill, v as i64 as u64)
                }
            }
        )+
    };
}

impl_from_zero_extend!(u8, u16, u32, u64, usize);
impl_from_sign_extend!(i8, i16, i32, i64, isize);

impl From<i128> for I128 {
    #[inline(always)]
    fn from(v: i128) -> Self {
        Self::from_parts((v >> 64) as i64, v as u64)
    }
}

impl From<u128> for I128 {
    #[inline(always)]
    fn from(v: u128) -> Self {
        Self::from(v as i128)
    }
}

impl From<U128> for I128 {
    /// Bit-for-bit reinterpretation of the unsigned value.
    #[inline(always)]
    fn from(v: U128) -> Self {
        Self::from_parts(v.high() as i64, v.low())
    }
}

impl From<I128> for i128 {
    #[inline(always)]
    fn from(v: I128) -> Self {
        v.as_i128()
    }
}

impl fmt::Display for I128 {
    /// Sign-magnitude rendering: an optional `-` followed by the decimal
    /// digits of the unsigned magnitude, which handles `MIN` without a
    /// special case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.pad("0");
        }

        let ten = U128::from(10u64);
        let mut digits: SmallVec<[u8; 64]> = SmallVec::new();
        let mut v = self.unsigned_abs();
        while !U128::is_zero(v) {
            let quotient = v / ten;
            let remainder = v - quotient * ten;
            digits.push(b'0' + remainder.low() as u8);
            v = quotient;
        }
        if self.is_negative() {
            digits.push(b'-');
        }
        digits.reverse();
        f.pad(std::str::from_utf8(&digits).expect("decimal digits are ASCII"))
    }
}

impl fmt::Debug for I128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for I128 {
    /// The two's-complement bit pattern in hex, never a sign.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&U128::from(*self), f)
    }
}

impl fmt::UpperHex for I128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&U128::from(*self), f)
    }
}

impl FromStr for I128 {
    type Err = ParseWideIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

impl Zero for I128 {
    #[inline(always)]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline(always)]
    fn is_zero(&self) -> bool {
        I128::is_zero(*self)
    }
}

impl One for I128 {
    #[inline(always)]
    fn one() -> Self {
        Self::ONE
    }
}

impl Bounded for I128 {
    #[inline(always)]
    fn min_value() -> Self {
        Self::MIN
    }

    #[inline(always)]
    fn max_value() -> Self {
        Self::MAX
    }
}

impl Num for I128 {
    type FromStrRadixErr = ParseWideIntError;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        I128::from_str_radix(str, radix)
    }
}

impl Signed for I128 {
    /// Wrapping absolute value; `I128::MIN.abs()` is `I128::MIN`.
    #[inline]
    fn abs(&self) -> Self {
        if self.is_negative() { self.wrapping_neg() } else { *self }
    }

    #[inline]
    fn abs_sub(&self, other: &Self) -> Self {
        if *self <= *other { Self::ZERO } else { *self - *other }
    }

    #[inline]
    fn signum(&self) -> Self {
        if I128::is_zero(*self) {
            Self::ZERO
        } else if self.is_negative() {
            Self::from(-1i64)
        } else {
            Self::ONE
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        !self.is_negative() && !I128::is_zero(*self)
    }

    #[inline]
    fn is_negative(&self) -> bool {
        I128::is_negative(*self)
    }
}

impl WrappingAdd for I128 {
    #[inline(always)]
    fn wrapping_add(&self, v: &Self) -> Self {
        self.add_impl(*v)
    }
}

impl WrappingSub for I128 {
    #[inline(always)]
    fn wrapping_sub(&self, v: &Self) -> Self {
        self.sub_impl(*v)
    }
}

impl WrappingMul for I128 {
    #[inline(always)]
    fn wrapping_mul(&self, v: &Self) -> Self {
        self.mul_impl(*v)
    }
}

impl WrappingNeg for I128 {
    #[inline(always)]
    fn wrapping_neg(&self) -> Self {
        I128::wrapping_neg(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_roundtrip() {
        let pairs = [(0i64, 0u64), (-1, u64::MAX), (i64::MIN, 0), (42, 7)];
        for (high, low) in pairs {
            let v = I128::from_parts(high, low);
            assert_eq!(v.high(), high);
            assert_eq!(v.low(), low);
        }
    }

    #[test]
    fn test_sign_extension_from_narrow_sources() {
        assert_eq!(I128::from(-1i8), I128::from_parts(-1, u64::MAX));
        assert_eq!(I128::from(-1i64).as_i128(), -1);
        assert_eq!(I128::from(255u8).as_i128(), 255);
    }

    #[test]
    fn test_arithmetic_matches_native() {
        let values = [0i128, 1, -1, 42, -42, i128::MIN, i128::MAX, 1 << 64];
        for &a in &values {
            for &b in &values {
                let wa = I128::from(a);
                let wb = I128::from(b);
                assert_eq!((wa + wb).as_i128(), a.wrapping_add(b));
                assert_eq!((wa - wb).as_i128(), a.wrapping_sub(b));
                assert_eq!((wa * wb).as_i128(), a.wrapping_mul(b));
            }
        }
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let cases = [(7i128, 2i128), (-7, 2), (7, -2), (-7, -2)];
        for (a, b) in cases {
            let q = I128::from(a) / I128::from(b);
            let r = I128::from(a) % I128::from(b);
            assert_eq!(q.as_i128(), a / b);
            assert_eq!(r.as_i128(), a % b);
        }
    }

    #[test]
    fn test_remainder_takes_dividend_sign() {
        assert_eq!((I128::from(-7i64) % I128::from(3i64)).as_i128(), -1);
        assert_eq!((I128::from(7i64) % I128::from(-3i64)).as_i128(), 1);
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        assert_eq!(I128::from(-5i64) / I128::ZERO, I128::ZERO);
        assert_eq!(I128::from(-5i64) % I128::ZERO, I128::ZERO);
    }

    #[test]
    fn test_min_edge_cases_wrap() {
        assert_eq!(-I128::MIN, I128::MIN);
        assert_eq!(I128::MIN / I128::from(-1i64), I128::MIN);
        assert_eq!(I128::MIN % I128::from(-1i64), I128::ZERO);
        assert_eq!(I128::MIN.unsigned_abs(), U128::from_parts(1 << 63, 0));
    }

    #[test]
    fn test_arithmetic_right_shift() {
        let v = I128::from(-256i64);
        assert_eq!((v >> 4).as_i128(), -16);
        assert_eq!((v >> 127).as_i128(), -1);
        assert_eq!((v >> 128).as_i128(), -1);
        assert_eq!((I128::from(256i64) >> 128), I128::ZERO);
    }

    #[test]
    fn test_ordering_is_signed() {
        assert!(I128::from(-1i64) < I128::ZERO);
        assert!(I128::MIN < I128::from(-1i64));
        assert!(I128::MAX > I128::ONE);
        assert!(I128::from(-2i64) < I128::from(1i64));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(I128::ZERO.to_string(), "0");
        assert_eq!(I128::from(-1i64).to_string(), "-1");
        assert_eq!(
            I128::MIN.to_string(),
            "-170141183460469231731687303715884105728"
        );
        assert_eq!(
            I128::MAX.to_string(),
            "170141183460469231731687303715884105727"
        );
        assert_eq!(format!("{:x}", I128::from(-1i64)), format!("{:x}", u128::MAX));
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for v in [I128::ZERO, I128::from(-42i64), I128::MIN, I128::MAX] {
            let parsed: I128 = v.to_string().parse().expect("display output parses");
            assert_eq!(parsed, v);
        }
    }

    #[test]
    fn test_parse_rejects_positive_overflow() {
        // One past I128::MAX; its magnitude is exactly I128::MIN's.
        let err = "170141183460469231731687303715884105728".parse::<I128>();
        assert_eq!(err, Err(ParseWideIntError::Overflow));
        let min: I128 = "-170141183460469231731687303715884105728"
            .parse()
            .expect("MIN parses");
        assert_eq!(min, I128::MIN);
    }

    #[test]
    fn test_signed_trait_semantics() {
        use num_traits::Signed;
        assert_eq!(I128::from(-3i64).abs(), I128::from(3i64));
        assert_eq!(I128::MIN.abs(), I128::MIN);
        assert_eq!(I128::from(-3i64).signum().as_i128(), -1);
        assert_eq!(I128::ZERO.signum(), I128::ZERO);
        assert!(I128::ONE.is_positive());
        assert!(!I128::ZERO.is_positive());
    }

    #[test]
    fn test_unsigned_reinterpret_roundtrip() {
        for v in [I128::from(-1i64), I128::MIN, I128::from(12345i64)] {
            assert_eq!(I128::from(U128::from(v)), v);
        }
    }
}
