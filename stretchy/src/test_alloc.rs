//! An allocator for tests that refuses once its budget of allocations is spent.

use crate::allocator::{Global, RawAlloc};
use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

pub(crate) struct Budget {
    remaining: Cell<usize>,
    calls: Cell<usize>,
    live: Cell<usize>,
}

impl Budget {
    /// Grants `n` successful allocations or grows, then refuses.
    pub(crate) fn new(n: usize) -> Self {
        Budget {
            remaining: Cell::new(n),
            calls: Cell::new(0),
            live: Cell::new(0),
        }
    }

    pub(crate) fn unlimited() -> Self {
        Budget::new(usize::MAX)
    }

    pub(crate) fn refuse_from_now(&self) {
        self.remaining.set(0);
    }

    /// Number of successful allocations and grows so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Number of blocks handed out and not yet released.
    pub(crate) fn live(&self) -> usize {
        self.live.get()
    }

    fn spend(&self) -> bool {
        match self.remaining.get() {
            0 => false,
            n => {
                self.remaining.set(n - 1);
                self.calls.set(self.calls.get() + 1);
                true
            }
        }
    }
}

unsafe impl<'a> RawAlloc for &'a Budget {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.spend() {
            return None;
        }
        let p = Global.allocate(layout)?;
        self.live.set(self.live.get() + 1);
        Some(p)
    }

    unsafe fn grow(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> Option<NonNull<u8>> {
        if !self.spend() {
            return None;
        }
        Global.grow(ptr, old, new)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        Global.release(ptr, layout)
    }
}
