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

use std::any::TypeId;
use std::fmt;
use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};

/// Alignment of the inline storage. Values with a stricter alignment
/// requirement are stored on the heap regardless of their size.
const INLINE_ALIGN: usize = 16;

/// Aligned inline storage for a payload of up to `N` bytes.
#[repr(C, align(16))]
struct RawBuf<const N: usize> {
    bytes: [MaybeUninit<u8>; N],
}

impl<const N: usize> RawBuf<N> {
    #[inline(always)]
    fn new() -> Self {
        Self {
            bytes: [MaybeUninit::uninit(); N],
        }
    }
}

/// Monomorphized operations for the type currently held, captured when
/// the value is placed. The `type_id` tags the erased payload so typed
/// access can be checked, and the function pointers drive destruction
/// and cloning without knowing the type statically.
#[derive(Clone, Copy)]
struct TypeOps {
    type_id: TypeId,
    type_name: &'static str,
    size: usize,
    align: usize,
    drop_in_place: unsafe fn(*mut u8),
    drop_boxed: unsafe fn(*mut u8),
    clone_into: unsafe fn(*const u8, *mut u8),
    clone_boxed: unsafe fn(*const u8) -> NonNull<u8>,
}

impl TypeOps {
    fn of<T: Clone + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            size: mem::size_of::<T>(),
            align: mem::align_of::<T>(),
            drop_in_place: drop_in_place_of::<T>,
            drop_boxed: drop_boxed_of::<T>,
            clone_into: clone_into_of::<T>,
            clone_boxed: clone_boxed_of::<T>,
        }
    }
}

/// # Safety
///
/// `payload` must point to a valid, initialized `T` that is not used
/// again afterwards.
unsafe fn drop_in_place_of<T>(payload: *mut u8) {
    ptr::drop_in_place(payload as *mut T);
}

/// # Safety
///
/// `payload` must be a pointer previously produced by `Box::<T>::into_raw`
/// (or equivalent) and not freed since.
unsafe fn drop_boxed_of<T>(payload: *mut u8) {
    drop(Box::from_raw(payload as *mut T));
}

/// # Safety
///
/// `src` must point to a valid `T`; `dst` must be valid for writing a `T`
/// and properly aligned.
unsafe fn clone_into_of<T: Clone>(src: *const u8, dst: *mut u8) {
    let value = (*(src as *const T)).clone();
    ptr::write(dst as *mut T, value);
}

/// # Safety
///
/// `src` must point to a valid `T`.
unsafe fn clone_boxed_of<T: Clone>(src: *const u8) -> NonNull<u8> {
    let value = (*(src as *const T)).clone();
    NonNull::from(Box::leak(Box::new(value))).cast()
}

enum Slot<const N: usize> {
    Empty,
    Inline { buf: RawBuf<N>, ops: TypeOps },
    Heap { ptr: NonNull<u8>, ops: TypeOps },
}

/// A type-erased container for at most one value, with inline storage
/// for small payloads.
///
/// Any `Clone + 'static` value can be stored. The placement decision is
/// made per type when the value is set: payloads of at most `N` bytes
/// with alignment at most 16 live directly in the container, everything
/// else is boxed. Either way the container exclusively owns the value
/// and destroys it on [`reset`](SmallBuffer::reset), replacement, or
/// drop. Typed access is checked: asking for the wrong type yields
/// `None`, never a reinterpretation.
///
/// The container is deliberately neither `Send` nor `Sync`; it is a
/// single-threaded value type.
///
/// # Examples
///
/// ```rust
/// use keelson_core::small::SmallBuffer;
///
/// let mut slot: SmallBuffer = SmallBuffer::new();
/// slot.set(42u32);
/// assert!(slot.is_inline());
/// assert_eq!(slot.get_if::<u32>(), Some(&42));
/// assert_eq!(slot.get_if::<String>(), None);
///
/// slot.set(String::from("replaces and drops the integer"));
/// assert_eq!(slot.take_if::<String>().as_deref(), Some("replaces and drops the integer"));
/// assert!(!slot.has_value());
/// ```
pub struct SmallBuffer<const N: usize = 64> {
    slot: Slot<N>,
}

impl<const N: usize> SmallBuffer<N> {
    /// Creates an empty container.
    #[inline]
    pub const fn new() -> Self {
        Self { slot: Slot::Empty }
    }

    /// Creates a container already holding `value`.
    #[inline]
    pub fn with_value<T: Clone + 'static>(value: T) -> Self {
        let mut buffer = Self::new();
        buffer.set(value);
        buffer
    }

    /// Whether a payload of type `T` is placed inline rather than boxed.
    #[inline(always)]
    pub const fn fits_inline<T>() -> bool {
        mem::size_of::<T>() <= N && mem::align_of::<T>() <= INLINE_ALIGN
    }

    /// Returns `true` if the container holds a value.
    #[inline]
    pub fn has_value(&self) -> bool {
        !matches!(self.slot, Slot::Empty)
    }

    /// Returns `true` unless the held value lives on the heap. An empty
    /// container is inline: no allocation exists.
    #[inline]
    pub fn is_inline(&self) -> bool {
        !matches!(self.slot, Slot::Heap { .. })
    }

    /// The `TypeId` of the held value, if any.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.ops().map(|ops| ops.type_id)
    }

    /// The diagnostic type name of the held value, if any.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.ops().map(|ops| ops.type_name)
    }

    /// Stores `value`, destroying any previously held value first.
    pub fn set<T: Clone + 'static>(&mut self, value: T) {
        self.reset();
        let ops = TypeOps::of::<T>();
        if Self::fits_inline::<T>() {
            let mut buf = RawBuf::new();
            // SAFETY: the placement check guarantees size and alignment;
            // the buffer bytes are exclusively ours.
            unsafe { ptr::write(buf.bytes.as_mut_ptr() as *mut T, value) };
            self.slot = Slot::Inline { buf, ops };
        } else {
            let ptr = NonNull::from(Box::leak(Box::new(value))).cast();
            self.slot = Slot::Heap { ptr, ops };
        }
    }

    /// Destroys the held value, if any, leaving the container empty.
    pub fn reset(&mut self) {
        match mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Empty => {}
            // SAFETY: the ops were captured for exactly the type that
            // was placed into this storage, which is still live.
            Slot::Inline { mut buf, ops } => unsafe {
                (ops.drop_in_place)(buf.bytes.as_mut_ptr() as *mut u8)
            },
            Slot::Heap { ptr, ops } => unsafe { (ops.drop_boxed)(ptr.as_ptr()) },
        }
    }

    /// A shared reference to the held value, if it exists and is a `T`.
    pub fn get_if<T: 'static>(&self) -> Option<&T> {
        match &self.slot {
            Slot::Inline { buf, ops } if ops.type_id == TypeId::of::<T>() => {
                // SAFETY: the tag match proves the bytes are a live T.
                Some(unsafe { &*(buf.bytes.as_ptr() as *const T) })
            }
            Slot::Heap { ptr, ops } if ops.type_id == TypeId::of::<T>() => {
                Some(unsafe { ptr.cast::<T>().as_ref() })
            }
            _ => None,
        }
    }

    /// An exclusive reference to the held value, if it exists and is a `T`.
    pub fn get_if_mut<T: 'static>(&mut self) -> Option<&mut T> {
        match &mut self.slot {
            Slot::Inline { buf, ops } if ops.type_id == TypeId::of::<T>() => {
                // SAFETY: as in `get_if`, plus exclusivity via `&mut self`.
                Some(unsafe { &mut *(buf.bytes.as_mut_ptr() as *mut T) })
            }
            Slot::Heap { ptr, ops } if ops.type_id == TypeId::of::<T>() => {
                Some(unsafe { ptr.cast::<T>().as_mut() })
            }
            _ => None,
        }
    }

    /// Moves the held value out, if it exists and is a `T`, leaving the
    /// container empty. On a type mismatch the value stays untouched.
    pub fn take_if<T: 'static>(&mut self) -> Option<T> {
        if self.type_id() != Some(TypeId::of::<T>()) {
            return None;
        }
        match mem::replace(&mut self.slot, Slot::Empty) {
            // SAFETY: the tag match proves the payload is a live T; the
            // slot is emptied so it is never dropped twice.
            Slot::Inline { buf, .. } => Some(unsafe { ptr::read(buf.bytes.as_ptr() as *const T) }),
            Slot::Heap { ptr, .. } => Some(unsafe { *Box::from_raw(ptr.cast::<T>().as_ptr()) }),
            Slot::Empty => None,
        }
    }

    #[inline]
    fn ops(&self) -> Option<&TypeOps> {
        match &self.slot {
            Slot::Empty => None,
            Slot::Inline { ops, .. } | Slot::Heap { ops, .. } => Some(ops),
        }
    }
}

impl<const N: usize> Clone for SmallBuffer<N> {
    /// Clones the held value via its captured clone operation. The
    /// storage placement of the clone matches the original, since the
    /// placement rule depends only on the type and `N`.
    fn clone(&self) -> Self {
        let slot = match &self.slot {
            Slot::Empty => Slot::Empty,
            Slot::Inline { buf, ops } => {
                debug_assert!(ops.size <= N && ops.align <= INLINE_ALIGN);
                let mut copy = RawBuf::new();
                // SAFETY: source holds a live value of the ops' type and
                // the destination satisfies its size and alignment.
                unsafe {
                    (ops.clone_into)(
                        buf.bytes.as_ptr() as *const u8,
                        copy.bytes.as_mut_ptr() as *mut u8,
                    )
                };
                Slot::Inline { buf: copy, ops: *ops }
            }
            Slot::Heap { ptr, ops } => {
                let cloned = unsafe { (ops.clone_boxed)(ptr.as_ptr() as *const u8) };
                Slot::Heap { ptr: cloned, ops: *ops }
            }
        };
        Self { slot }
    }
}

impl<const N: usize> Drop for SmallBuffer<N> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<const N: usize> Default for SmallBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for SmallBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmallBuffer")
            .field("type", &self.type_name().unwrap_or("<empty>"))
            .field("inline", &self.is_inline())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts its drops through a shared cell.
    #[derive(Clone)]
    struct Tracked {
        drops: Rc<Cell<u32>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Big([u8; 128]);

    #[derive(Clone, PartialEq, Debug)]
    #[repr(align(32))]
    struct OverAligned(u64);

    #[test]
    fn test_empty_container() {
        let slot: SmallBuffer = SmallBuffer::new();
        assert!(!slot.has_value());
        assert!(slot.is_inline());
        assert_eq!(slot.type_id(), None);
        assert_eq!(slot.get_if::<u32>(), None);
    }

    #[test]
    fn test_small_value_is_inline() {
        let slot = SmallBuffer::<64>::with_value(0xdead_beefu32);
        assert!(slot.has_value());
        assert!(slot.is_inline());
        assert_eq!(slot.get_if::<u32>(), Some(&0xdead_beef));
    }

    #[test]
    fn test_large_value_spills_to_heap() {
        let slot = SmallBuffer::<64>::with_value(Big([7; 128]));
        assert!(slot.has_value());
        assert!(!slot.is_inline());
        assert_eq!(slot.get_if::<Big>(), Some(&Big([7; 128])));
    }

    #[test]
    fn test_over_aligned_value_spills_to_heap() {
        assert!(!SmallBuffer::<64>::fits_inline::<OverAligned>());
        let slot = SmallBuffer::<64>::with_value(OverAligned(9));
        assert!(!slot.is_inline());
        assert_eq!(slot.get_if::<OverAligned>(), Some(&OverAligned(9)));
    }

    #[test]
    fn test_typed_access_is_checked() {
        let mut slot: SmallBuffer = SmallBuffer::with_value(1u64);
        assert_eq!(slot.get_if::<u32>(), None);
        assert_eq!(slot.get_if_mut::<i64>(), None);
        assert_eq!(slot.take_if::<u32>(), None);
        // The mismatched take left the value in place.
        assert_eq!(slot.get_if::<u64>(), Some(&1));
    }

    #[test]
    fn test_get_if_mut_mutates_in_place() {
        let mut slot: SmallBuffer = SmallBuffer::with_value(10i32);
        *slot.get_if_mut::<i32>().unwrap() += 5;
        assert_eq!(slot.get_if::<i32>(), Some(&15));
    }

    #[test]
    fn test_replacement_drops_previous_value() {
        let drops = Rc::new(Cell::new(0));
        let mut slot: SmallBuffer = SmallBuffer::new();
        slot.set(Tracked { drops: Rc::clone(&drops) });
        assert_eq!(drops.get(), 0);
        slot.set(42u32);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_reset_and_drop_destroy_the_value() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut slot: SmallBuffer = SmallBuffer::new();
            slot.set(Tracked { drops: Rc::clone(&drops) });
            slot.reset();
            assert_eq!(drops.get(), 1);
            assert!(!slot.has_value());
            slot.set(Tracked { drops: Rc::clone(&drops) });
        }
        // Container drop destroyed the second value.
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn test_take_if_moves_without_dropping() {
        let drops = Rc::new(Cell::new(0));
        let mut slot: SmallBuffer = SmallBuffer::new();
        slot.set(Tracked { drops: Rc::clone(&drops) });
        let taken = slot.take_if::<Tracked>().unwrap();
        assert!(!slot.has_value());
        assert_eq!(drops.get(), 0);
        drop(taken);
        assert_eq!(drops.get(), 1);
    }

    /// Counts its clones through a shared cell; large enough to force
    /// heap placement at the default inline capacity.
    struct CloneCounted {
        clones: Rc<Cell<u32>>,
        _payload: [u8; 128],
    }

    impl Clone for CloneCounted {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                clones: Rc::clone(&self.clones),
                _payload: self._payload,
            }
        }
    }

    #[test]
    fn test_take_transplants_heap_without_cloning() {
        let clones = Rc::new(Cell::new(0));
        let mut slot: SmallBuffer = SmallBuffer::with_value(CloneCounted {
            clones: Rc::clone(&clones),
            _payload: [0; 128],
        });
        assert!(!slot.is_inline());

        let mut taken = std::mem::take(&mut slot);
        assert!(!slot.has_value());
        assert!(taken.has_value());
        assert_eq!(clones.get(), 0);

        // The boxed payload moves out untouched as well.
        assert!(taken.take_if::<CloneCounted>().is_some());
        assert_eq!(clones.get(), 0);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = SmallBuffer::<64>::with_value(Big([3; 128]));
        let copy = original.clone();
        original.get_if_mut::<Big>().unwrap().0[0] = 99;
        assert_eq!(copy.get_if::<Big>(), Some(&Big([3; 128])));
        assert!(!copy.is_inline());
    }

    #[test]
    fn test_clone_of_empty_is_empty() {
        let slot: SmallBuffer = SmallBuffer::new();
        assert!(!slot.clone().has_value());
    }

    #[test]
    fn test_type_metadata() {
        let slot: SmallBuffer = SmallBuffer::with_value(1u8);
        assert_eq!(slot.type_id(), Some(TypeId::of::<u8>()));
        assert_eq!(slot.type_name(), Some("u8"));
    }

    #[test]
    fn test_small_inline_capacity_forces_heap() {
        // u64 fits the default capacity but not a 4-byte one.
        let slot = SmallBuffer::<4>::with_value(1u64);
        assert!(!slot.is_inline());
        assert_eq!(slot.get_if::<u64>(), Some(&1));
    }
}
