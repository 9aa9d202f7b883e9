//! The growable sequence and its operations.
//!
//! Every operation here is written against three primitives of the storage block: the live
//! count, the capacity, and "make room for `n` more". Anything that may relocate the block
//! takes `&mut self`, so no slot reference or iterator can survive a growth.

use crate::allocator::{Global, RawAlloc};
use crate::fill::{CloneFrom, Fill};
use crate::raw::RawSeq;
use crate::Error;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

/// Direction kept by [`Seq::insert_ordered`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Smallest first, as judged by the comparator.
    Ascending,
    /// Largest first, as judged by the comparator.
    Descending,
}

impl Order {
    // `existing` is `cmp(element already in the sequence, item being inserted)`.
    #[inline]
    fn goes_before(self, existing: Ordering) -> bool {
        match self {
            Order::Ascending => existing == Ordering::Greater,
            Order::Descending => existing == Ordering::Less,
        }
    }
}

/// A growable sequence whose length and capacity live in a header directly in front of the
/// elements, inside the same heap block.
///
/// A new `Seq` owns no memory at all. The first operation that needs room allocates
/// [`MIN_CAPACITY`][crate::MIN_CAPACITY] slots (or more, if more were asked for), and every
/// later growth at least doubles the capacity.
///
/// Fallible operations return [`Error`] and leave the sequence untouched on failure.
/// Reads go through [`Deref`] to `[T]`, so slice methods such as `first`, `last`, `iter`
/// and `binary_search_by` are available directly.
///
/// # Examples
///
/// ```
/// use stretchy::prelude::*;
///
/// let mut seq: Seq<i32> = Seq::new();
/// assert_eq!(seq.capacity(), 0);
/// for x in [12, 34, 56, 78] {
///     seq.push(x)?;
/// }
/// seq.insert(0, 4)?;
/// assert_eq!(seq, [4, 12, 34, 56, 78]);
/// assert_eq!(seq.last(), Some(&78));
/// assert_eq!(seq.remove(2)?, 34);
/// assert_eq!(seq.index_of(&56, Ord::cmp), Some(2));
/// # Ok::<(), stretchy::Error>(())
/// ```
pub struct Seq<T, A: RawAlloc = Global> {
    raw: RawSeq<T, A>,
}

#[inline(never)]
#[cold]
fn allocation_failed(e: Error) -> ! {
    panic!("Sequence allocation failed: {}", e)
}

impl<T> Seq<T> {
    /// Creates an empty sequence on the global heap. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Seq {
            raw: RawSeq::new_in(Global),
        }
    }

    /// Creates an empty sequence with room for at least `capacity` elements.
    ///
    /// A `capacity` of zero does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::Seq;
    ///
    /// let seq: Seq<u8> = Seq::with_capacity(10)?;
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.capacity(), 10);
    /// # Ok::<(), stretchy::Error>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, Global)
    }
}

impl<T, A: RawAlloc> Seq<T, A> {
    /// Creates an empty sequence that will take its block from `alloc`. Does not allocate.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Seq {
            raw: RawSeq::new_in(alloc),
        }
    }

    /// Creates an empty sequence in `alloc` with room for at least `capacity` elements.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        let mut seq = Self::new_in(alloc);
        if capacity > 0 {
            seq.raw.ensure_capacity(capacity)?;
        }
        Ok(seq)
    }

    /// Number of elements in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the sequence has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of element slots in the current block; zero when no block exists.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Whether the sequence currently owns a block.
    ///
    /// This is `false` for a new sequence and after [`release`][Seq::release], and `true`
    /// after any growth, even once the sequence has been [cleared][Seq::clear].
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.raw.is_allocated()
    }

    /// The allocator backing this sequence.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Makes room for `additional` more elements.
    ///
    /// The block is reallocated when none exists yet or when `len() + additional` reaches
    /// the capacity. A first block gets `max(additional, MIN_CAPACITY)` slots; a grown block
    /// gets `max(len() + additional, 2 * capacity())`. The block may move; elements keep
    /// their order.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the allocator refuses, or [`Error::CapacityOverflow`]
    /// if the block size cannot be expressed. The sequence is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::{Error, Seq};
    ///
    /// let mut seq: Seq<u64> = Seq::new();
    /// seq.reserve(1)?;
    /// assert_eq!(seq.capacity(), 4);
    /// assert!(seq.reserve(usize::MAX).unwrap_err().is_allocation_failure());
    /// assert_eq!(seq.capacity(), 4);
    /// # Ok::<(), Error>(())
    /// ```
    #[inline]
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.raw.ensure_capacity(additional)
    }

    /// Appends an element. Amortized *O*(1).
    ///
    /// # Errors
    ///
    /// On allocation failure the element is dropped and the sequence is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::Seq;
    ///
    /// let mut seq = Seq::new();
    /// seq.push("a")?;
    /// seq.push("b")?;
    /// assert_eq!(seq, ["a", "b"]);
    /// # Ok::<(), stretchy::Error>(())
    /// ```
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        self.raw.ensure_capacity(1)?;
        let len = self.len();
        unsafe {
            self.raw.ptr().add(len).write(item);
            self.raw.set_len(len + 1);
        }
        Ok(())
    }

    /// Appends `count` elements written by `fill`, and returns them for further editing.
    ///
    /// The slots are reserved first, then filled, and only then counted in the length, so a
    /// panicking filler leaves the sequence as it was (the written values are leaked).
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::prelude::*;
    ///
    /// let mut seq = seq![1u8, 2];
    /// let fresh = seq.append_range(3, FillWithDefault)?;
    /// fresh.copy_from_slice(&[7, 8, 9]);
    /// assert_eq!(seq, [1, 2, 7, 8, 9]);
    /// # Ok::<(), stretchy::Error>(())
    /// ```
    pub fn append_range<F: Fill<T>>(&mut self, count: usize, fill: F) -> Result<&mut [T], Error> {
        self.raw.ensure_capacity(count)?;
        let len = self.len();
        unsafe {
            let start = self.raw.ptr().add(len);
            fill.fill(slice::from_raw_parts_mut(
                start.cast::<MaybeUninit<T>>(),
                count,
            ));
            self.raw.set_len(len + count);
            Ok(slice::from_raw_parts_mut(start, count))
        }
    }

    /// Appends clones of every element of `src`.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.append_range(src.len(), CloneFrom(src)).map(|_| ())
    }

    /// Inserts `item` at `index`, shifting the elements at and after `index` one slot right.
    ///
    /// `index == len()` appends. *O*(`len() - index`).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len()`, checked before any allocation; or an
    /// allocation error. The sequence is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::{seq, Error};
    ///
    /// let mut seq = seq![1, 2, 3];
    /// seq.insert(1, 9)?;
    /// seq.insert(4, 10)?;
    /// assert_eq!(seq, [1, 9, 2, 3, 10]);
    /// assert_eq!(seq.insert(9, 0), Err(Error::IndexOutOfRange { index: 9, len: 5 }));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), Error> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.raw.ensure_capacity(1)?;
        unsafe {
            let p = self.raw.ptr().add(index);
            ptr::copy(p, p.add(1), len - index);
            p.write(item);
            self.raw.set_len(len + 1);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements one slot left.
    ///
    /// The last slot goes back to being unused; capacity is kept. *O*(`len() - index`).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`, including on an empty or unallocated
    /// sequence. The sequence is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::{seq, Error, Seq};
    ///
    /// let mut seq = seq!['a', 'b', 'c'];
    /// assert_eq!(seq.remove(0), Ok('a'));
    /// assert_eq!(seq, ['b', 'c']);
    ///
    /// let mut empty: Seq<char> = Seq::new();
    /// assert_eq!(empty.remove(0), Err(Error::IndexOutOfRange { index: 0, len: 0 }));
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        unsafe {
            self.raw.set_len(len - 1);
            let p = self.raw.ptr().add(index);
            let item = p.read();
            ptr::copy(p.add(1), p, len - index - 1);
            Ok(item)
        }
    }

    /// Position of the first element that `cmp` judges equal to `item`, scanning from the
    /// front. *O*(`len()`).
    #[inline]
    pub fn index_of<F>(&self, item: &T, mut cmp: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_slice()
            .iter()
            .position(|e| cmp(e, item) == Ordering::Equal)
    }

    /// Whether some element is judged equal to `item` by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let seq = seq!["Ada", "Grace"];
    /// assert!(seq.contains_by(&"grace", |a, b| a.to_lowercase().cmp(&b.to_lowercase())));
    /// assert!(!seq.contains_by(&"Alan", |a, b| a.cmp(b)));
    /// ```
    #[inline]
    pub fn contains_by<F>(&self, item: &T, cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.index_of(item, cmp).is_some()
    }

    /// Removes the first element judged equal to `item`, returning it.
    ///
    /// Returns `None`, leaving the sequence alone, when nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let mut seq = seq![5, 7, 5];
    /// assert_eq!(seq.remove_value(&5, Ord::cmp), Some(5));
    /// assert_eq!(seq.remove_value(&100, Ord::cmp), None);
    /// assert_eq!(seq, [7, 5]);
    /// ```
    pub fn remove_value<F>(&mut self, item: &T, cmp: F) -> Option<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let index = self.index_of(item, cmp)?;
        self.remove(index).ok()
    }

    /// Drops every element. The block and its capacity are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let mut seq = seq![1, 2, 3, 4, 5];
    /// let capacity = seq.capacity();
    /// seq.clear();
    /// assert!(seq.is_empty());
    /// assert_eq!(seq.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        let len = self.len();
        unsafe {
            // Length first: a panicking destructor must not lead to a double drop.
            self.raw.set_len(0);
            ptr::drop_in_place(slice::from_raw_parts_mut(self.raw.ptr(), len));
        }
    }

    /// Sorts the elements with a three-way comparator.
    ///
    /// The sort is not stable: elements that compare equal may be reordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let mut seq = seq![33, 4, 12, 16];
    /// seq.sort_with(|a, b| b.cmp(a));
    /// assert_eq!(seq, [33, 16, 12, 4]);
    /// ```
    #[inline]
    pub fn sort_with<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(cmp)
    }

    /// Inserts `item` in front of the first element it should precede, and returns the index
    /// it landed at.
    ///
    /// Scans from the front for the first element `e` with `cmp(e, &item)` greater than
    /// (for [`Order::Ascending`]) or less than (for [`Order::Descending`]) zero, and inserts
    /// there; appends if there is none. Items equal to existing ones go after them. The
    /// sequence is assumed, not checked, to already be in that order. *O*(`len()`).
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::prelude::*;
    ///
    /// let mut seq = seq![10, 20, 30];
    /// assert_eq!(seq.insert_ordered(25, Ord::cmp, Order::Ascending)?, 2);
    /// assert_eq!(seq.insert_ordered(99, Ord::cmp, Order::Ascending)?, 4);
    /// assert_eq!(seq, [10, 20, 25, 30, 99]);
    /// # Ok::<(), stretchy::Error>(())
    /// ```
    pub fn insert_ordered<F>(&mut self, item: T, mut cmp: F, order: Order) -> Result<usize, Error>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let index = self
            .as_slice()
            .iter()
            .position(|e| order.goes_before(cmp(e, &item)))
            .unwrap_or_else(|| self.len());
        self.insert(index, item)?;
        Ok(index)
    }

    /// [`insert_ordered`][Seq::insert_ordered] with [`Order::Ascending`].
    #[inline]
    pub fn insert_ascending<F>(&mut self, item: T, cmp: F) -> Result<usize, Error>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.insert_ordered(item, cmp, Order::Ascending)
    }

    /// [`insert_ordered`][Seq::insert_ordered] with [`Order::Descending`].
    #[inline]
    pub fn insert_descending<F>(&mut self, item: T, cmp: F) -> Result<usize, Error>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.insert_ordered(item, cmp, Order::Descending)
    }

    /// Iterates over `(index, &element)` pairs, front to back.
    ///
    /// Each call starts again from index 0. The sequence is borrowed for as long as the
    /// iterator lives, so it cannot grow or shrink underneath it:
    ///
    /// ```compile_fail
    /// use stretchy::seq;
    ///
    /// let mut seq = seq![1, 2, 3];
    /// for (_, x) in seq.entries() {
    ///     if *x == 2 {
    ///         seq.push(4).unwrap();
    ///     }
    /// }
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let seq = seq!["x", "y"];
    /// let pairs: Vec<_> = seq.entries().collect();
    /// assert_eq!(pairs, [(0, &"x"), (1, &"y")]);
    /// ```
    #[inline]
    pub fn entries(&self) -> Entries<'_, T> {
        Entries {
            inner: self.as_slice().iter().enumerate(),
        }
    }

    /// Iterates over `(index, &mut element)` pairs, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let mut seq = seq![1, 1, 1];
    /// for (i, x) in seq.entries_mut() {
    ///     *x += i;
    /// }
    /// assert_eq!(seq, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn entries_mut(&mut self) -> EntriesMut<'_, T> {
        EntriesMut {
            inner: self.as_mut_slice().iter_mut().enumerate(),
        }
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.raw.ptr(), self.len()) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.raw.ptr(), self.len()) }
    }

    /// Drops every element and frees the block, returning the sequence to its unallocated
    /// state. Does nothing on a sequence that owns no block.
    ///
    /// The sequence stays usable: the next growth allocates a fresh block.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::seq;
    ///
    /// let mut seq = seq![1, 2, 3];
    /// seq.release();
    /// assert!(!seq.is_allocated());
    /// assert_eq!(seq.capacity(), 0);
    /// seq.push(4)?;
    /// assert_eq!(seq, [4]);
    /// # Ok::<(), stretchy::Error>(())
    /// ```
    pub fn release(&mut self) {
        self.clear();
        self.raw.release_block();
    }
}

impl<T, A: RawAlloc> Drop for Seq<T, A> {
    fn drop(&mut self) {
        // The block itself is freed by `RawSeq`.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T, A: RawAlloc> Deref for Seq<T, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for Seq<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for Seq<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for Seq<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: RawAlloc + Default> Default for Seq<T, A> {
    fn default() -> Self {
        Seq::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for Seq<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Cloning allocates a block sized for the elements in the same allocator.
///
/// # Panics
///
/// Panics if the allocation fails.
impl<T: Clone, A: RawAlloc + Clone> Clone for Seq<T, A> {
    fn clone(&self) -> Self {
        let mut seq = Seq::new_in(self.allocator().clone());
        if !self.is_empty() {
            seq.extend_from_slice(self)
                .unwrap_or_else(|e| allocation_failed(e));
        }
        seq
    }
}

impl<T: PartialEq<U>, U, A: RawAlloc, B: RawAlloc> PartialEq<Seq<U, B>> for Seq<T, A> {
    fn eq(&self, other: &Seq<U, B>) -> bool {
        self[..] == other[..]
    }
}

impl<T: Eq, A: RawAlloc> Eq for Seq<T, A> {}

impl<T: PartialEq<U>, U, A: RawAlloc> PartialEq<[U]> for Seq<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self[..] == other[..]
    }
}

impl<'a, T: PartialEq<U>, U, A: RawAlloc> PartialEq<&'a [U]> for Seq<T, A> {
    fn eq(&self, other: &&'a [U]) -> bool {
        self[..] == other[..]
    }
}

impl<T: PartialEq<U>, U, A: RawAlloc, const N: usize> PartialEq<[U; N]> for Seq<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self[..] == other[..]
    }
}

/// # Panics
///
/// Panics if an allocation fails. Use [`Seq::push`] to handle that case.
impl<T, A: RawAlloc> Extend<T> for Seq<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in iter {
            self.push(item).unwrap_or_else(|e| allocation_failed(e));
        }
    }
}

impl<'a, T: Copy + 'a, A: RawAlloc> Extend<&'a T> for Seq<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for Seq<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut seq = Seq::new();
        seq.extend(iter);
        seq
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a Seq<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut Seq<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A: RawAlloc> IntoIterator for Seq<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let seq = ManuallyDrop::new(self);
        // Safety: `seq` is never used or dropped again, so the block has exactly one owner.
        let mut raw = unsafe { ptr::read(&seq.raw) };
        let end = raw.len();
        // The iterator now owns the elements; the header must not claim them too.
        unsafe { raw.set_len(0) };
        IntoIter { raw, start: 0, end }
    }
}

/// Iterates over `(index, &element)` pairs. Created by [`Seq::entries`].
pub struct Entries<'a, T> {
    inner: core::iter::Enumerate<slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<(usize, &'a T)> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Entries<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<(usize, &'a T)> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Entries<'a, T> {}
impl<'a, T> FusedIterator for Entries<'a, T> {}

/// Iterates over `(index, &mut element)` pairs. Created by [`Seq::entries_mut`].
pub struct EntriesMut<'a, T> {
    inner: core::iter::Enumerate<slice::IterMut<'a, T>>,
}

impl<'a, T> Iterator for EntriesMut<'a, T> {
    type Item = (usize, &'a mut T);

    #[inline]
    fn next(&mut self) -> Option<(usize, &'a mut T)> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for EntriesMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<(usize, &'a mut T)> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for EntriesMut<'a, T> {}
impl<'a, T> FusedIterator for EntriesMut<'a, T> {}

/// Iterates over owned elements, front to back. Elements not yet yielded are dropped with
/// the iterator, and the block is freed after them.
pub struct IntoIter<T, A: RawAlloc = Global> {
    // Header length is zero; slots `[start, end)` are live and owned here.
    raw: RawSeq<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: RawAlloc> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.raw.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, A: RawAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start < self.end {
            let item = unsafe { self.raw.ptr().add(self.start).read() };
            self.start += 1;
            Some(item)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }
}

impl<T, A: RawAlloc> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start < self.end {
            self.end -= 1;
            Some(unsafe { self.raw.ptr().add(self.end).read() })
        } else {
            None
        }
    }
}

impl<T, A: RawAlloc> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: RawAlloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(
            unsafe { self.raw.ptr().add(self.start) },
            self.end - self.start,
        );
        self.start = self.end;
        unsafe { ptr::drop_in_place(rest) }
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

/// Creates a [`Seq`] on the global heap containing the arguments.
///
/// # Panics
///
/// Panics if the allocation fails.
///
/// # Examples
///
/// ```
/// use stretchy::{seq, Seq};
///
/// let empty: Seq<u8> = seq![];
/// assert!(!empty.is_allocated());
/// let s = seq![1, 2, 3];
/// assert_eq!(s, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! seq {
    () => (
        $crate::Seq::new()
    );
    ($($x:expr),+ $(,)?) => (
        <$crate::Seq<_> as ::core::iter::FromIterator<_>>::from_iter([$($x),+])
    );
}
