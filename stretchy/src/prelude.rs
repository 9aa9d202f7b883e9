//! Single module with all `stretchy` exports
//!
//! # Examples
//!
//! Import all into current scope:
//!
//! ```
//! use stretchy::prelude::*;
//!
//! let mut seq: Seq<u8> = seq![3, 1, 2];
//! seq.insert_ordered(0, Ord::cmp, Order::Ascending)?;
//! seq.append_range(2, FillWithDefault)?;
//! assert_eq!(seq, [0, 3, 1, 2, 0, 0]);
//! # Ok::<(), stretchy::Error>(())
//! ```

pub use crate::allocator::{Global, RawAlloc};
pub use crate::error::Error;
pub use crate::fill::{CloneFrom, CopyFrom, Fill, FillSequentially, FillWithDefault, Repeat};
pub use crate::raw::MIN_CAPACITY;
pub use crate::seq;
pub use crate::seq::{Entries, EntriesMut, IntoIter, Order, Seq};
