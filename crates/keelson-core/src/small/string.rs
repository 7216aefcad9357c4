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

use std::alloc::{self, Layout};
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, Index};
use std::ptr::{self, NonNull};
use std::str::Utf8Error;

/// Error returned by [`SmallString::byte_at`] for an index at or past
/// the end of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRangeError {
    /// The requested index.
    pub index: usize,
    /// The content length at the time of the access.
    pub len: usize,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for string of length {}",
            self.index, self.len
        )
    }
}

impl Error for OutOfRangeError {}

enum Repr<const N: usize> {
    Inline { len: u8, buf: [u8; N] },
    Heap { ptr: NonNull<u8>, len: usize, cap: usize },
}

/// A growable byte string with inline storage for short content.
///
/// Content of up to `N - 1` bytes lives in the string itself; longer
/// content moves to an exclusively owned heap allocation. A NUL
/// terminator directly follows the content at all times (which is why
/// one byte of the inline buffer is reserved), so
/// [`as_bytes_with_nul`](SmallString::as_bytes_with_nul) is always
/// suitable for handing to C APIs expecting a NUL-terminated string.
/// The content itself is arbitrary bytes; it may contain interior NULs
/// and need not be UTF-8.
///
/// `N` must be between 8 and 256 inclusive (checked at compile time;
/// the inline length is tracked in a single byte).
///
/// # Examples
///
/// ```rust
/// use keelson_core::small::SmallString;
///
/// let mut s: SmallString = SmallString::from("hello");
/// assert!(s.is_inline());
/// s.push_str(", world! this now exceeds the inline capacity");
/// assert!(!s.is_inline());
/// assert_eq!(s.to_string(), "hello, world! this now exceeds the inline capacity");
/// assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
/// ```
pub struct SmallString<const N: usize = 24> {
    repr: Repr<N>,
}

// The heap block is exclusively owned and never shared; moving the
// string across threads moves sole ownership of the allocation.
unsafe impl<const N: usize> Send for SmallString<N> {}
unsafe impl<const N: usize> Sync for SmallString<N> {}

/// Allocates `cap + 1` bytes (content plus NUL terminator).
fn heap_alloc(cap: usize) -> NonNull<u8> {
    let layout = Layout::array::<u8>(cap + 1).expect("string capacity overflows a Layout");
    // SAFETY: the layout has non-zero size.
    let raw = unsafe { alloc::alloc(layout) };
    match NonNull::new(raw) {
        Some(ptr) => ptr,
        None => alloc::handle_alloc_error(layout),
    }
}

/// # Safety
///
/// `ptr` must come from [`heap_alloc`] with the same `cap`.
unsafe fn heap_free(ptr: NonNull<u8>, cap: usize) {
    let layout = Layout::array::<u8>(cap + 1).expect("string capacity overflows a Layout");
    alloc::dealloc(ptr.as_ptr(), layout);
}

impl<const N: usize> SmallString<N> {
    const CHECK: () = assert!(
        N >= 8 && N <= 256,
        "SmallString inline size must be in 8..=256"
    );

    /// Bytes of content the inline buffer can hold; one byte of `N` is
    /// reserved for the NUL terminator.
    pub const INLINE_CAPACITY: usize = N - 1;

    /// Creates an empty string in inline storage.
    pub const fn new() -> Self {
        let _ = Self::CHECK;
        Self {
            repr: Repr::Inline { len: 0, buf: [0; N] },
        }
    }

    /// Creates a string holding `bytes` as its content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keelson_core::small::SmallString;
    /// let s: SmallString = SmallString::from_bytes(b"raw \xff bytes");
    /// assert_eq!(s.len(), 11);
    /// ```
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut out = Self::new();
        out.assign(bytes);
        out
    }

    /// Length of the content in bytes, excluding the NUL terminator.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { len, .. } => *len as usize,
            Repr::Heap { len, .. } => *len,
        }
    }

    /// Returns `true` if the content is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes of content the current storage can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Inline { .. } => Self::INLINE_CAPACITY,
            Repr::Heap { cap, .. } => *cap,
        }
    }

    /// Returns `true` while the content lives in inline storage.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    /// The content, excluding the NUL terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the first `len` bytes of the storage are initialized
        // content; both arms uphold this invariant.
        unsafe { std::slice::from_raw_parts(self.content_ptr(), self.len()) }
    }

    /// The content including the trailing NUL terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        // SAFETY: byte `len` is always the NUL terminator.
        unsafe { std::slice::from_raw_parts(self.content_ptr(), self.len() + 1) }
    }

    /// The content as UTF-8, if it is valid UTF-8.
    #[inline]
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// The byte at `index`, or an [`OutOfRangeError`] for `index >= len`.
    #[inline]
    pub fn byte_at(&self, index: usize) -> Result<u8, OutOfRangeError> {
        let len = self.len();
        if index < len {
            Ok(self.as_bytes()[index])
        } else {
            Err(OutOfRangeError { index, len })
        }
    }

    /// Replaces the content. The current storage is reused when it is
    /// large enough; otherwise an exact-size heap block replaces it.
    pub fn assign(&mut self, bytes: &[u8]) {
        if bytes.len() > self.capacity() {
            let ptr = heap_alloc(bytes.len());
            // SAFETY: the fresh block holds bytes.len() + 1 bytes.
            unsafe {
                ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
                *ptr.as_ptr().add(bytes.len()) = 0;
            }
            self.replace_repr(Repr::Heap {
                ptr,
                len: bytes.len(),
                cap: bytes.len(),
            });
        } else {
            // SAFETY: capacity covers bytes.len() content plus the NUL.
            unsafe {
                let dst = self.content_mut_ptr();
                ptr::copy_nonoverlapping(bytes.as_ptr(), dst, bytes.len());
                *dst.add(bytes.len()) = 0;
            }
            self.set_len(bytes.len());
        }
    }

    /// Appends a single byte, growing the storage if it is full.
    pub fn push(&mut self, byte: u8) {
        let len = self.len();
        if len == self.capacity() {
            self.grow_to(len + 1);
        }
        // SAFETY: capacity now exceeds len, leaving room for the byte
        // and the shifted NUL.
        unsafe {
            let dst = self.content_mut_ptr();
            *dst.add(len) = byte;
            *dst.add(len + 1) = 0;
        }
        self.set_len(len + 1);
    }

    /// Appends `bytes` to the content.
    pub fn append(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        let len = self.len();
        // SAFETY: reserve guaranteed room for the bytes and the NUL.
        unsafe {
            let dst = self.content_mut_ptr().add(len);
            ptr::copy_nonoverlapping(bytes.as_ptr(), dst, bytes.len());
            *dst.add(bytes.len()) = 0;
        }
        self.set_len(len + bytes.len());
    }

    /// Appends a string slice to the content.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.append(s.as_bytes());
    }

    /// Removes and returns the last content byte, if any.
    pub fn pop(&mut self) -> Option<u8> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let byte = self.as_bytes()[len - 1];
        // SAFETY: len - 1 is in bounds; the NUL moves down one byte.
        unsafe { *self.content_mut_ptr().add(len - 1) = 0 };
        self.set_len(len - 1);
        Some(byte)
    }

    /// Empties the content. Storage and capacity are kept.
    pub fn clear(&mut self) {
        // SAFETY: the storage always has room for at least the NUL.
        unsafe { *self.content_mut_ptr() = 0 };
        self.set_len(0);
    }

    /// Ensures capacity for at least `additional` more content bytes.
    /// Growth goes 1.5x from the current capacity, so a run of pushes
    /// reallocates O(log n) times.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len() + additional;
        if needed > self.capacity() {
            self.grow_to(needed);
        }
    }

    /// Shrinks the storage to the smallest that fits the content:
    /// back into inline storage when the content allows it, otherwise
    /// an exact-size heap block.
    pub fn shrink_to_fit(&mut self) {
        let (heap_ptr, len, cap) = match &self.repr {
            Repr::Inline { .. } => return,
            Repr::Heap { ptr, len, cap } => (*ptr, *len, *cap),
        };
        if len <= Self::INLINE_CAPACITY {
            let mut buf = [0u8; N];
            // SAFETY: len + 1 <= N, and the heap block holds len content
            // bytes plus the NUL.
            unsafe {
                ptr::copy_nonoverlapping(heap_ptr.as_ptr(), buf.as_mut_ptr(), len + 1);
            }
            self.replace_repr(Repr::Inline { len: len as u8, buf });
        } else if len < cap {
            let ptr = heap_alloc(len);
            unsafe {
                ptr::copy_nonoverlapping(heap_ptr.as_ptr(), ptr.as_ptr(), len + 1);
            }
            self.replace_repr(Repr::Heap { ptr, len, cap: len });
        }
    }

    /// Moves the content into a heap block grown geometrically from the
    /// current capacity: 1.5x steps until `min_cap` is covered.
    fn grow_to(&mut self, min_cap: usize) {
        let mut new_cap = self.capacity();
        while new_cap < min_cap {
            new_cap += new_cap / 2;
        }
        let ptr = heap_alloc(new_cap);
        let len = self.len();
        // SAFETY: the new block holds new_cap + 1 >= len + 1 bytes.
        unsafe {
            ptr::copy_nonoverlapping(self.content_ptr(), ptr.as_ptr(), len + 1);
        }
        self.replace_repr(Repr::Heap { ptr, len, cap: new_cap });
    }

    /// Installs a new representation and frees the old heap block, if any.
    fn replace_repr(&mut self, new_repr: Repr<N>) {
        let old = mem::replace(&mut self.repr, new_repr);
        if let Repr::Heap { ptr, cap, .. } = old {
            // SAFETY: the old block came from heap_alloc with this cap
            // and nothing references it anymore.
            unsafe { heap_free(ptr, cap) };
        }
    }

    #[inline]
    fn content_ptr(&self) -> *const u8 {
        match &self.repr {
            Repr::Inline { buf, .. } => buf.as_ptr(),
            Repr::Heap { ptr, .. } => ptr.as_ptr(),
        }
    }

    #[inline]
    fn content_mut_ptr(&mut self) -> *mut u8 {
        match &mut self.repr {
            Repr::Inline { buf, .. } => buf.as_mut_ptr(),
            Repr::Heap { ptr, .. } => ptr.as_ptr(),
        }
    }

    #[inline]
    fn set_len(&mut self, new_len: usize) {
        match &mut self.repr {
            Repr::Inline { len, .. } => *len = new_len as u8,
            Repr::Heap { len, .. } => *len = new_len,
        }
    }
}

impl<const N: usize> Drop for SmallString<N> {
    fn drop(&mut self) {
        if let Repr::Heap { ptr, cap, .. } = self.repr {
            // SAFETY: the block came from heap_alloc with this cap.
            unsafe { heap_free(ptr, cap) };
        }
    }
}

impl<const N: usize> Clone for SmallString<N> {
    /// The clone holds the same content in the smallest fitting storage,
    /// so cloning a shrunk-out heap string can come back inline.
    fn clone(&self) -> Self {
        Self::from(self.as_bytes())
    }
}

impl<const N: usize> Default for SmallString<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<&[u8]> for SmallString<N> {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<&str> for SmallString<N> {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl<const N: usize> Deref for SmallString<N> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> Index<usize> for SmallString<N> {
    type Output = u8;

    /// Indexes the content; `index == len` reads the NUL terminator.
    ///
    /// # Panics
    ///
    /// Panics for `index > len`.
    fn index(&self, index: usize) -> &u8 {
        assert!(
            index <= self.len(),
            "index {} out of range for string of length {}",
            index,
            self.len()
        );
        &self.as_bytes_with_nul()[index]
    }
}

impl<const N: usize> PartialEq for SmallString<N> {
    /// Content equality; storage placement does not participate.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for SmallString<N> {}

impl<const N: usize> PartialOrd for SmallString<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for SmallString<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl<const N: usize> Hash for SmallString<N> {
    /// Hashes the content only, consistent with `PartialEq`.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<const N: usize> PartialEq<[u8]> for SmallString<N> {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<&[u8]> for SmallString<N> {
    #[inline]
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const N: usize> PartialEq<str> for SmallString<N> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for SmallString<N> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> fmt::Display for SmallString<N> {
    /// Lossy UTF-8 rendering; invalid sequences become U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl<const N: usize> fmt::Debug for SmallString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SmallString")
            .field(&String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}
