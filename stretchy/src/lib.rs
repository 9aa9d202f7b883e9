#![doc = crate::doc_macro::layout_doc!(
//! # `stretchy`
//! Growable sequences that keep their bookkeeping in front of their elements.
//!
//! 1. [Summary](#summary)
//! 1. [Memory layout](#memory-layout)
//! 1. [Examples](#examples)
//! 1. [Errors](#errors)
//! 1. [Feature flags](#feature-flags)
//!
//! # Summary
//!
//! [`Seq<T>`] is a contiguous, growable sequence in the spirit of `Vec<T>`, with two
//! differences in how it is built:
//!
//! * its length and capacity are not fields of the `Seq` value, but a small header stored in
//!   the heap block itself, immediately before element 0;
//! * every operation that can run out of memory returns a [`Result`] instead of aborting, and
//!   leaves the sequence exactly as it was when it fails.
//!
//! On top of the usual append/insert/remove it provides linear search with a caller-supplied
//! three-way comparator, removal by value, sorting, and ordered insertion.
//!
//! # Memory layout
//!
//! A `Seq` that has never grown owns nothing and reports a length and capacity of 0. Once it
//! grows, it holds a single pointer to element 0 of a block laid out like this:
//!
//! ```svgbob
//! +-----+
//! | ptr |
//! +-----+
//!    |
//!    '-------------------------------.
//!                                    |
//!  block                             v
//!  +--------------+-----------------+--------+--------+--------+------------+------------+
//!  | "capacity 6" | "len 4"         | "12"   | "34"   | "56"   | "(unused)" | "(unused)" |
//!  +--------------+-----------------+--------+--------+--------+------------+------------+
//!   "header, recovered at a fixed offset before element 0"
//! ```
//!
//! One allocation, one free, and no second pointer to chase. The cost is that growing may
//! move the whole block, so the sequence updates its own pointer and requires `&mut` for
//! anything that might grow.
//!
//! The first growth allocates [`MIN_CAPACITY`] slots (or the requested amount, if larger).
//! Later growth takes `max(len + additional, 2 * capacity)`, so appends are amortized *O*(1).
//!
//! # Examples
//!
//! ```
//! use stretchy::prelude::*;
//!
//! let mut scores: Seq<u32> = Seq::new();
//! for s in [40, 10, 30] {
//!     scores.insert_ordered(s, Ord::cmp, Order::Ascending)?;
//! }
//! assert_eq!(scores, [10, 30, 40]);
//!
//! assert_eq!(scores.index_of(&30, Ord::cmp), Some(1));
//! assert_eq!(scores.remove_value(&10, Ord::cmp), Some(10));
//! assert_eq!(scores.remove_value(&99, Ord::cmp), None);
//!
//! for (i, s) in scores.entries_mut() {
//!     *s += i as u32;
//! }
//! assert_eq!(scores, [30, 41]);
//!
//! let capacity = scores.capacity();
//! scores.clear();
//! assert_eq!(scores.capacity(), capacity);
//! scores.release();
//! assert_eq!(scores.capacity(), 0);
//! # Ok::<(), stretchy::Error>(())
//! ```
//!
//! # Errors
//!
//! Fallible operations return [`Error`]:
//!
//! * [`Error::AllocationFailure`] and [`Error::CapacityOverflow`] when a block cannot be
//!   obtained. The element being added is dropped; everything else is untouched.
//! * [`Error::IndexOutOfRange`] when [`Seq::insert`] or [`Seq::remove`] is given an index
//!   outside the sequence. Nothing is changed.
//!
//! A search that finds nothing is not an error and returns `None`.
//!
//! Trait implementations that have no way to report failure (`Extend`, `FromIterator`,
//! `Clone` and the [`seq!`] macro) panic on allocation failure, like `Vec` does.
//!
//! Allocation, growth and release are traced through the [`log`](https://docs.rs/log)
//! facade; allocation failures are logged at `warn` level.
//!
//! # Feature flags
//!
//! * `bumpalo`. Lets a `Seq` take its block from a `bumpalo::Bump` arena, via
//!   [`Seq::new_in`]. Adds a dependency on `bumpalo`.
//! * `doc`. Renders the layout drawing above as SVG. Adds a dependency on `svgbobdoc`.
//!
)]
#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod allocator;
pub mod error;
pub mod fill;
pub mod prelude;
pub mod seq;

mod doc_macro;
mod raw;
#[cfg(test)]
mod test_alloc;

pub use allocator::{Global, RawAlloc};
pub use error::Error;
pub use raw::MIN_CAPACITY;
pub use seq::{Order, Seq};
