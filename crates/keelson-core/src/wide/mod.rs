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

//! # Extended-Width Integers
//!
//! 128-bit integer value types (`U128` unsigned, `I128` signed) with the
//! full complement of arithmetic, bitwise, comparison, conversion,
//! formatting, and parsing operations, matching native two's-complement
//! and modulo-2^128 wraparound semantics.
//!
//! ## Submodules
//!
//! - `unsigned`: The `U128` value type.
//! - `signed`: The `I128` value type.
//! - `portable`: The dual-64-bit-word arithmetic engine used when the
//!   `portable-wide` feature selects the portable backend. It is compiled
//!   unconditionally so its algorithms can be differentially tested
//!   against the native 128-bit integers on every target.
//! - `parse`: Radix parsing shared by both types and the
//!   [`ParseWideIntError`] type it reports failures with.
//!
//! ## Backend selection
//!
//! By default both types are transparent wrappers over the native `u128` /
//! `i128` and delegate every operation to them (fast path). Enabling the
//! `portable-wide` cargo feature switches the representation to a pair of
//! 64-bit words (`value == high * 2^64 + low`) driven by the portable
//! engine. Public behavior is identical across backends; the test suites
//! in this module exist primarily to enforce that equivalence.
//!
//! ## Deliberate semantics
//!
//! - Division and remainder by zero return **zero** on both types. This is
//!   a defined saturating-to-zero policy, not an error and not a panic.
//! - All arithmetic wraps modulo 2^128 (two's complement for `I128`);
//!   negating `I128::MIN` yields `I128::MIN`.
//! - Shift amounts of 128 or more do not panic: they yield zero, except
//!   for the sign-propagating `I128` right shift which saturates to 0 or
//!   -1 depending on the sign.

mod parse;
// On the native backend the engine is only reached from its tests.
#[cfg_attr(not(feature = "portable-wide"), allow(dead_code))]
pub(crate) mod portable;
mod signed;
mod unsigned;

pub use parse::ParseWideIntError;
pub use signed::I128;
pub use unsigned::U128;
