#![warn(missing_docs)]

//! A [`Fill<T>`] writes every slot of a freshly reserved, uninitialized run of `T`s.
//!
//! [`Seq::append_range`][crate::Seq::append_range] reserves `count` slots at the end of a
//! sequence and hands them to a `Fill<T>` before they become part of the sequence, so no
//! uninitialized element is ever observable.
//!
//! # Examples
//!
//! ```
//! use stretchy::prelude::*;
//!
//! let mut seq: Seq<u16> = Seq::new();
//! seq.append_range(3, FillWithDefault).unwrap();
//! seq.append_range(3, FillSequentially(|i| (i * 2) as u16)).unwrap();
//! seq.append_range(2, CopyFrom(&[7, 9])).unwrap();
//! assert_eq!(seq, [0, 0, 0, 0, 2, 4, 7, 9]);
//! ```

use core::mem::MaybeUninit;

/// An object that is able to initialize a run of `T` values.
///
/// # Examples
///
/// A filler that writes powers of 3 from the last slot backwards:
///
/// ```
/// use stretchy::prelude::*;
/// use std::mem::MaybeUninit;
///
/// struct BackwardsPowersOf3;
/// unsafe impl Fill<u64> for BackwardsPowersOf3 {
///     fn fill(self, dst: &mut [MaybeUninit<u64>]) {
///         let mut v = 1;
///         for slot in dst.iter_mut().rev() {
///             slot.write(v);
///             v *= 3;
///         }
///     }
/// }
///
/// let mut seq = Seq::new();
/// seq.append_range(5, BackwardsPowersOf3).unwrap();
/// assert_eq!(seq, [81, 27, 9, 3, 1]);
/// ```
///
/// # Safety
///
/// When `fill` returns normally, every slot of `dst` must have been written. Panicking is
/// allowed; the slots are then discarded without being dropped.
pub unsafe trait Fill<T> {
    /// Writes every slot of `dst`.
    fn fill(self, dst: &mut [MaybeUninit<T>]);
}

/// Calls the closure with each slot's position in the run (starting at 0).
///
/// # Examples
///
/// ```
/// use stretchy::prelude::*;
///
/// let mut seq = seq![100u32];
/// seq.append_range(3, FillSequentially(|i| i as u32)).unwrap();
/// assert_eq!(seq, [100, 0, 1, 2]);
/// ```
pub struct FillSequentially<Lambda>(pub Lambda);

unsafe impl<T, Lambda: FnMut(usize) -> T> Fill<T> for FillSequentially<Lambda> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) {
        let mut next = self.0;
        let mut i = 0;
        for slot in dst {
            slot.write(next(i));
            i += 1;
        }
    }
}

/// Writes `T::default()` into every slot, the typed counterpart of zero-filling.
///
/// # Examples
///
/// ```
/// use stretchy::prelude::*;
///
/// let mut seq: Seq<i8> = Seq::new();
/// let fresh = seq.append_range(2, FillWithDefault).unwrap();
/// fresh[1] = -1;
/// assert_eq!(seq, [0, -1]);
/// ```
pub struct FillWithDefault;

unsafe impl<T: Default> Fill<T> for FillWithDefault {
    fn fill(self, dst: &mut [MaybeUninit<T>]) {
        for slot in dst {
            slot.write(T::default());
        }
    }
}

/// Writes a clone of the value into every slot.
///
/// # Examples
///
/// ```
/// use stretchy::prelude::*;
///
/// let mut seq: Seq<String> = Seq::new();
/// seq.append_range(2, Repeat(String::from("ab"))).unwrap();
/// assert_eq!(seq, ["ab", "ab"]);
/// ```
pub struct Repeat<T>(pub T);

unsafe impl<T: Clone> Fill<T> for Repeat<T> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) {
        if let Some((last, rest)) = dst.split_last_mut() {
            for slot in rest {
                slot.write(self.0.clone());
            }
            // The value itself goes into the last slot.
            last.write(self.0);
        }
    }
}

/// Bitwise copies of a source slice.
///
/// # Panics
///
/// Panics if the source length differs from the number of slots.
pub struct CopyFrom<'a, T>(pub &'a [T]);

unsafe impl<'a, T: Copy> Fill<T> for CopyFrom<'a, T> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) {
        if self.0.len() != dst.len() {
            source_length_mismatch(self.0.len(), dst.len());
        }
        for (slot, &item) in dst.iter_mut().zip(self.0) {
            slot.write(item);
        }
    }
}

/// Clones of a source slice.
///
/// # Panics
///
/// Panics if the source length differs from the number of slots.
pub struct CloneFrom<'a, T>(pub &'a [T]);

unsafe impl<'a, T: Clone> Fill<T> for CloneFrom<'a, T> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) {
        if self.0.len() != dst.len() {
            source_length_mismatch(self.0.len(), dst.len());
        }
        for (slot, item) in dst.iter_mut().zip(self.0) {
            slot.write(item.clone());
        }
    }
}

#[inline(never)]
#[cold]
fn source_length_mismatch(src: usize, slots: usize) -> ! {
    panic!("Source has {} elements but the range has {} slots", src, slots)
}
