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

//! # Keelson Core
//!
//! Foundational value-type primitives for the Keelson ecosystem. This crate
//! consolidates small, dependency-light building blocks focused on
//! performance, correctness, and predictable semantics that underpin
//! higher-level crates.
//!
//! ## Modules
//!
//! - `wide`: Extended-width integer value types (`U128`, `I128`) with full
//!   arithmetic, bitwise, comparison, conversion, formatting, and parsing
//!   support. A portable dual-64-bit-word engine backs the types on targets
//!   (or builds) without native 128-bit integer support, selected via the
//!   `portable-wide` cargo feature; behavior is identical across backends.
//! - `small`: Small-buffer-optimized containers: a type-erased single-value
//!   container (`SmallBuffer<N>`) and a byte-string with inline storage for
//!   short content (`SmallString<N>`), both spilling to an exclusively owned
//!   heap allocation when the inline capacity is exceeded.
//!
//! ## Purpose
//!
//! These primitives are pure, single-threaded value types: no I/O, no
//! locking, no shared state. Every operation runs to completion, ownership
//! of heap storage is always exclusive, and allocation failure is the only
//! external fault a caller can observe (and it is fatal by design).
//!
//! Refer to each module for detailed APIs and examples.

pub mod small;
pub mod wide;
