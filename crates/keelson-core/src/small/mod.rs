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

//! # Small-Buffer-Optimized Containers
//!
//! Containers that keep small payloads in storage embedded in the
//! container itself and transparently spill to an exclusively owned heap
//! allocation when the payload outgrows the inline capacity.
//!
//! ## Submodules
//!
//! - `buffer`: [`SmallBuffer`], a type-erased single-value container
//!   placing any `Clone + 'static` value inline when its size and
//!   alignment permit.
//! - `string`: [`SmallString`], a growable byte string with inline
//!   storage for short content and an always-maintained NUL terminator
//!   for foreign-function interop.
//!
//! ## Motivation
//!
//! Heap allocation dominates the cost of handling many small, transient
//! values. Both containers here trade a few bytes of fixed footprint for
//! allocation-free handling of the common (small) case, while keeping
//! the spilled (large) case fully functional rather than a capacity
//! error. The inline capacity is a const generic parameter with a
//! default chosen for typical payloads.

mod buffer;
mod string;

pub use buffer::SmallBuffer;
pub use string::{OutOfRangeError, SmallString};
