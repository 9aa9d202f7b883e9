//! Sources of memory for a sequence's header-prefixed block.
//!
//! A [`Seq`][crate::Seq] asks its [`RawAlloc`] for exactly three things: a fresh block, a
//! larger block holding a copy of the old one, and the return of a block it no longer needs.
//! [`Global`] forwards to the global heap. With the `bumpalo` feature enabled, `&Bump`
//! hands out arena memory instead:
//!
//! ```
//! # #[cfg(feature = "bumpalo")] {
//! use stretchy::Seq;
//!
//! let arena = bumpalo::Bump::new();
//! let mut seq = Seq::new_in(&arena);
//! for i in 0..100u32 {
//!     seq.push(i).unwrap();
//! }
//! assert_eq!(seq.len(), 100);
//! # }
//! ```

use core::alloc::Layout;
use core::ptr::NonNull;

/// An allocator that can back a [`Seq`][crate::Seq].
///
/// # Safety
///
/// Implementors must guarantee:
///  * a block returned by [`allocate`][RawAlloc::allocate] or [`grow`][RawAlloc::grow] is
///    valid for reads and writes of the requested layout's size, aligned to its alignment,
///    and stays valid until it is passed to `grow` or `release`;
///  * a block returned by `grow` starts with the first `old.size()` bytes of the block it
///    replaces;
///  * when `grow` returns `None`, the old block is untouched and still owned by the caller.
pub unsafe trait RawAlloc {
    /// Allocates a block for `layout`, returning `None` if the allocator refuses.
    ///
    /// # Safety
    ///
    /// `layout.size()` must be nonzero.
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Replaces the block at `ptr` with one of layout `new`, preserving its contents.
    ///
    /// # Safety
    ///
    /// * `ptr` must have come from this allocator with layout `old`.
    /// * `new.size() >= old.size()` and `new.align() == old.align()`.
    unsafe fn grow(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> Option<NonNull<u8>>;

    /// Gives the block at `ptr` back to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have come from this allocator with layout `layout`, and must not be used
    /// afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global heap, via `alloc`, `realloc` and `dealloc`.
///
/// This is the allocator a [`Seq`][crate::Seq] uses unless told otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAlloc for Global {
    #[inline]
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0);
        NonNull::new(alloc::alloc::alloc(layout))
    }

    #[inline]
    unsafe fn grow(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> Option<NonNull<u8>> {
        debug_assert!(new.size() >= old.size());
        debug_assert_eq!(new.align(), old.align());
        NonNull::new(alloc::alloc::realloc(ptr.as_ptr(), old, new.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        alloc::alloc::dealloc(ptr.as_ptr(), layout)
    }
}

/// Arena allocation. Growing copies into a fresh arena block; abandoned blocks are reclaimed
/// when the arena is reset or dropped. An arena allocation limit surfaces as
/// [`Error::AllocationFailure`][crate::Error::AllocationFailure]. A limit set below the
/// arena's current `allocated_bytes()` is ignored by `bumpalo`.
#[cfg(feature = "bumpalo")]
unsafe impl<'a> RawAlloc for &'a bumpalo::Bump {
    #[inline]
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        self.try_alloc_layout(layout).ok()
    }

    unsafe fn grow(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> Option<NonNull<u8>> {
        let fresh = self.try_alloc_layout(new).ok()?;
        core::ptr::copy_nonoverlapping(ptr.as_ptr(), fresh.as_ptr(), old.size());
        Some(fresh)
    }

    #[inline]
    unsafe fn release(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_grow_keeps_prefix() {
        let old = Layout::from_size_align(16, 8).unwrap();
        let new = Layout::from_size_align(64, 8).unwrap();
        unsafe {
            let p = Global.allocate(old).unwrap();
            for i in 0..16 {
                p.as_ptr().add(i).write(i as u8);
            }
            let q = Global.grow(p, old, new).unwrap();
            for i in 0..16 {
                assert_eq!(*q.as_ptr().add(i), i as u8);
            }
            Global.release(q, new);
        }
    }

    #[cfg(feature = "bumpalo")]
    #[test]
    fn bump_grow_copies_and_respects_limit() {
        let arena = bumpalo::Bump::new();
        let old = Layout::from_size_align(8, 8).unwrap();
        let new = Layout::from_size_align(32, 8).unwrap();
        unsafe {
            let p = (&arena).allocate(old).unwrap();
            p.as_ptr().cast::<u64>().write(0xfeed);
            let q = (&arena).grow(p, old, new).unwrap();
            assert_eq!(q.as_ptr().cast::<u64>().read(), 0xfeed);
            (&arena).release(q, new);
        }
        arena.set_allocation_limit(Some(arena.allocated_bytes()));
        let huge = Layout::from_size_align(1 << 20, 8).unwrap();
        assert!(unsafe { (&arena).allocate(huge) }.is_none());
    }

    #[cfg(feature = "bumpalo")]
    #[test]
    fn bump_limit_fails_seq_growth() {
        use crate::{Error, Seq};

        let arena = bumpalo::Bump::new();
        arena.set_allocation_limit(Some(0));
        let mut seq: Seq<u64, &bumpalo::Bump> = Seq::new_in(&arena);
        assert!(matches!(seq.push(1), Err(Error::AllocationFailure { .. })));
        assert!(!seq.is_allocated());

        arena.set_allocation_limit(None);
        seq.push(1).unwrap();
        arena.set_allocation_limit(Some(arena.allocated_bytes()));
        assert!(matches!(
            seq.reserve(1 << 17),
            Err(Error::AllocationFailure { .. })
        ));
        assert_eq!(seq, [1]);
    }
}
