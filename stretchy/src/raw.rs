//! The header-prefixed block behind every [`Seq`][crate::Seq].
//!
//! One allocation holds a [`Header`] followed by `capacity` element slots. The sequence keeps
//! a pointer to slot 0; the header is recovered by stepping back a fixed, per-type offset.
//! A sequence that has never grown holds no pointer at all, and reports a length and
//! capacity of zero.
//!
//! Nothing in this module reads or drops elements. It only moves bytes when the block is
//! reallocated, and tracks the two numbers in the header.

use crate::allocator::RawAlloc;
use crate::Error;
use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::NonNull;

/// Number of slots allocated the first time a sequence grows, unless more are requested.
pub const MIN_CAPACITY: usize = 4;

// Field order matches the block layout: capacity first, then the live count.
#[repr(C)]
pub(crate) struct Header {
    pub(crate) capacity: usize,
    pub(crate) len: usize,
}

/// Byte distance from the start of the block to slot 0.
#[inline(always)]
pub(crate) const fn elems_offset<T>() -> usize {
    let align = core::mem::align_of::<T>();
    (core::mem::size_of::<Header>() + align - 1) & 0usize.wrapping_sub(align)
}

/// Layout of a block with `capacity` slots, or `None` if it overflows.
#[inline]
pub(crate) fn block_layout<T>(capacity: usize) -> Option<Layout> {
    let elems = Layout::array::<T>(capacity).ok()?;
    let (layout, offset) = Layout::new::<Header>().extend(elems).ok()?;
    debug_assert_eq!(offset, elems_offset::<T>());
    Some(layout.pad_to_align())
}

#[inline(always)]
unsafe fn header_of<T>(elems: NonNull<T>) -> NonNull<Header> {
    NonNull::new_unchecked(
        elems
            .as_ptr()
            .cast::<u8>()
            .sub(elems_offset::<T>())
            .cast::<Header>(),
    )
}

#[inline(always)]
unsafe fn elems_of<T>(block: NonNull<u8>) -> NonNull<T> {
    NonNull::new_unchecked(block.as_ptr().add(elems_offset::<T>()).cast::<T>())
}

#[inline(never)]
#[cold]
fn corrupt_header() -> ! {
    panic!("Sequence header describes an impossible block")
}

pub(crate) struct RawSeq<T, A: RawAlloc> {
    // Slot 0 of a live block, or `None` before the first growth and after release.
    elems: Option<NonNull<T>>,
    alloc: A,
    marker: PhantomData<T>,
}

// Shared access only reads; every write goes through `&mut`.
unsafe impl<T: Send, A: RawAlloc + Send> Send for RawSeq<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RawSeq<T, A> {}

impl<T, A: RawAlloc> RawSeq<T, A> {
    #[inline]
    pub(crate) const fn new_in(alloc: A) -> Self {
        RawSeq {
            elems: None,
            alloc,
            marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub(crate) fn is_allocated(&self) -> bool {
        self.elems.is_some()
    }

    #[inline]
    fn header(&self) -> Option<&Header> {
        // Safety: a present pointer always sits `elems_offset` bytes after a live header.
        self.elems.map(|elems| unsafe { &*header_of(elems).as_ptr() })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.header().map_or(0, |h| h.len)
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.header().map_or(0, |h| h.capacity)
    }

    /// Pointer to slot 0; dangling (but aligned) when nothing is allocated.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.elems.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Records a new live count.
    ///
    /// # Safety
    ///
    /// A block must be allocated, `len <= capacity`, and slots `[0, len)` must be initialized.
    #[inline]
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        match self.elems {
            Some(elems) => {
                let header = &mut *header_of(elems).as_ptr();
                debug_assert!(len <= header.capacity);
                header.len = len;
            }
            None => debug_assert_eq!(len, 0),
        }
    }

    /// Makes room for `additional` more elements, relocating the block if needed.
    ///
    /// A block is (re)allocated when none exists yet or when `len + additional` reaches the
    /// current capacity. A fresh block gets `max(additional, MIN_CAPACITY)` slots; a grown one
    /// gets `max(len + additional, 2 * capacity)`. On error nothing changes.
    pub(crate) fn ensure_capacity(&mut self, additional: usize) -> Result<(), Error> {
        let len = self.len();
        let capacity = self.capacity();
        let needed = len.checked_add(additional).ok_or_else(|| {
            log::warn!("sequence of {len} elements cannot grow by {additional}");
            Error::CapacityOverflow {
                requested: usize::MAX,
            }
        })?;
        let new_capacity = if self.elems.is_none() {
            core::cmp::max(additional, MIN_CAPACITY)
        } else if needed >= capacity {
            core::cmp::max(needed, capacity.saturating_mul(2))
        } else {
            return Ok(());
        };
        self.reallocate(new_capacity)
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), Error> {
        let layout = block_layout::<T>(new_capacity).ok_or_else(|| {
            log::warn!("a block of {new_capacity} slots does not fit in the address space");
            Error::CapacityOverflow {
                requested: new_capacity,
            }
        })?;
        let block = match self.elems {
            None => unsafe { self.alloc.allocate(layout) },
            Some(elems) => {
                let old = self.current_layout();
                // Safety: `elems` came from this allocator, inside a block of layout `old`;
                // the new layout has the same alignment and more slots.
                unsafe { self.alloc.grow(header_of(elems).cast(), old, layout) }
            }
        };
        let Some(block) = block else {
            log::warn!(
                "allocation of {} bytes for {new_capacity} slots failed; sequence left as is",
                layout.size()
            );
            return Err(Error::AllocationFailure {
                capacity: new_capacity,
                size: layout.size(),
            });
        };
        let header = block.cast::<Header>();
        unsafe {
            if self.elems.is_none() {
                header.as_ptr().write(Header {
                    capacity: new_capacity,
                    len: 0,
                });
            } else {
                // The live count travelled with the block.
                (*header.as_ptr()).capacity = new_capacity;
            }
            self.elems = Some(elems_of(block));
        }
        log::trace!(
            "sequence block now {} bytes for {new_capacity} slots",
            layout.size()
        );
        Ok(())
    }

    #[inline]
    fn current_layout(&self) -> Layout {
        block_layout::<T>(self.capacity()).unwrap_or_else(|| corrupt_header())
    }

    /// Returns the block to the allocator. Live elements are not dropped here.
    pub(crate) fn release_block(&mut self) {
        if let Some(elems) = self.elems.take() {
            let layout = block_layout::<T>(unsafe { (*header_of(elems).as_ptr()).capacity })
                .unwrap_or_else(|| corrupt_header());
            log::trace!("releasing sequence block of {} bytes", layout.size());
            // Safety: the block came from this allocator with this layout, and the pointer
            // has just been forgotten.
            unsafe { self.alloc.release(header_of(elems).cast(), layout) }
        }
    }
}

impl<T, A: RawAlloc> Drop for RawSeq<T, A> {
    fn drop(&mut self) {
        self.release_block();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::Global;
    use crate::test_alloc::Budget;
    use memoffset::offset_of;

    #[repr(align(32))]
    struct Wide(#[allow(dead_code)] u8);

    #[test]
    fn header_layout() {
        let word = core::mem::size_of::<usize>();
        assert_eq!(0, offset_of!(Header, capacity));
        assert_eq!(word, offset_of!(Header, len));
        assert_eq!(2 * word, elems_offset::<u8>());
        assert_eq!(2 * word, elems_offset::<u64>());
        assert_eq!(32, elems_offset::<Wide>());
        assert_eq!(32 + 3 * 32, block_layout::<Wide>(3).unwrap().size());
        assert_eq!(32, block_layout::<Wide>(3).unwrap().align());
    }

    #[test]
    fn block_layout_overflow() {
        assert!(block_layout::<u64>(usize::MAX / 4).is_none());
        assert!(block_layout::<()>(usize::MAX).is_some());
    }

    #[test]
    fn null_until_first_growth() {
        let raw: RawSeq<u32, Global> = RawSeq::new_in(Global);
        assert!(!raw.is_allocated());
        assert_eq!(0, raw.len());
        assert_eq!(0, raw.capacity());
        assert_eq!(NonNull::<u32>::dangling().as_ptr(), raw.ptr());
    }

    #[test]
    fn growth_rule() {
        let mut raw: RawSeq<u32, Global> = RawSeq::new_in(Global);
        raw.ensure_capacity(1).unwrap();
        assert_eq!(MIN_CAPACITY, raw.capacity());

        let mut big: RawSeq<u32, Global> = RawSeq::new_in(Global);
        big.ensure_capacity(10).unwrap();
        assert_eq!(10, big.capacity());

        unsafe { raw.set_len(3) };
        // 3 + 1 < 4 would not grow; 3 + 1 reaching 4 does, and doubles.
        raw.ensure_capacity(0).unwrap();
        assert_eq!(4, raw.capacity());
        raw.ensure_capacity(1).unwrap();
        assert_eq!(8, raw.capacity());
        assert_eq!(3, raw.len());
        raw.ensure_capacity(20).unwrap();
        assert_eq!(23, raw.capacity());
        unsafe { raw.set_len(0) };
    }

    #[test]
    fn growth_preserves_bytes() {
        let mut raw: RawSeq<u64, Global> = RawSeq::new_in(Global);
        raw.ensure_capacity(4).unwrap();
        unsafe {
            for i in 0..4 {
                raw.ptr().add(i).write(i as u64 * 11);
            }
            raw.set_len(4);
        }
        raw.ensure_capacity(1).unwrap();
        assert_eq!(8, raw.capacity());
        let got = unsafe { core::slice::from_raw_parts(raw.ptr(), raw.len()) };
        assert_eq!(&[0, 11, 22, 33], got);
    }

    #[test]
    fn failure_leaves_block_untouched() {
        let budget = Budget::new(1);
        let mut raw: RawSeq<u16, &Budget> = RawSeq::new_in(&budget);
        raw.ensure_capacity(0).unwrap();
        unsafe {
            for i in 0..3 {
                raw.ptr().add(i).write(i as u16 + 1);
            }
            raw.set_len(3);
        }
        let before = raw.ptr();
        let err = raw.ensure_capacity(1).unwrap_err();
        assert_eq!(
            Error::AllocationFailure {
                capacity: 8,
                size: block_layout::<u16>(8).unwrap().size(),
            },
            err
        );
        assert_eq!(before, raw.ptr());
        assert_eq!(3, raw.len());
        assert_eq!(4, raw.capacity());
        let got = unsafe { core::slice::from_raw_parts(raw.ptr(), raw.len()) };
        assert_eq!(&[1, 2, 3], got);
        unsafe { raw.set_len(0) };
    }

    #[test]
    fn overflow_is_reported_not_attempted() {
        let budget = Budget::unlimited();
        let mut raw: RawSeq<u64, &Budget> = RawSeq::new_in(&budget);
        assert_eq!(
            Err(Error::CapacityOverflow {
                requested: usize::MAX
            }),
            raw.ensure_capacity(usize::MAX)
        );
        assert_eq!(0, budget.calls());
        assert!(!raw.is_allocated());
    }

    #[test]
    fn release_returns_to_null() {
        let budget = Budget::unlimited();
        let mut raw: RawSeq<u8, &Budget> = RawSeq::new_in(&budget);
        raw.ensure_capacity(2).unwrap();
        raw.release_block();
        assert!(!raw.is_allocated());
        assert_eq!(0, raw.capacity());
        assert_eq!(0, budget.live());
        raw.release_block();
        assert_eq!(0, budget.live());
    }
}
