//! Failures reported by [`Seq`][crate::Seq] operations.
//!
//! Absence is not an error: searches return [`Option`]. Only the allocator refusing a block,
//! a request too large to describe, or an index outside the sequence are reported here.

/// Errors that can occur while mutating a [`Seq`][crate::Seq].
///
/// Every operation that returns an `Error` leaves the sequence exactly as it was before the
/// call: same elements, same length, same capacity.
///
/// # Examples
///
/// ```
/// use stretchy::{Error, Seq};
///
/// let mut seq: Seq<u32> = Seq::new();
/// assert_eq!(
///     seq.insert(3, 7),
///     Err(Error::IndexOutOfRange { index: 3, len: 0 }),
/// );
/// assert_eq!(seq.len(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The allocator could not provide a block for the requested capacity.
    #[error("allocation of {size} bytes for {capacity} elements failed")]
    AllocationFailure {
        /// Element capacity that was requested.
        capacity: usize,
        /// Size in bytes of the header plus element block.
        size: usize,
    },
    /// The requested capacity cannot be represented as an allocation layout.
    #[error("capacity overflow: {requested} elements do not fit in a single allocation")]
    CapacityOverflow {
        /// Element capacity that was requested, saturated at `usize::MAX`.
        requested: usize,
    },
    /// An insertion or removal index lies outside the sequence.
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange {
        /// Index passed by the caller.
        index: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },
}

impl Error {
    /// Whether this error came from the allocation path rather than from a bad index.
    ///
    /// # Examples
    ///
    /// ```
    /// use stretchy::Error;
    ///
    /// assert!(Error::CapacityOverflow { requested: usize::MAX }.is_allocation_failure());
    /// assert!(!Error::IndexOutOfRange { index: 1, len: 0 }.is_allocation_failure());
    /// ```
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Error::AllocationFailure { .. } | Error::CapacityOverflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_numbers() {
        let e = Error::AllocationFailure {
            capacity: 8,
            size: 48,
        };
        assert_eq!(
            e.to_string(),
            "allocation of 48 bytes for 8 elements failed"
        );
        let e = Error::IndexOutOfRange { index: 9, len: 2 };
        assert_eq!(
            e.to_string(),
            "index 9 is out of range for a sequence of length 2"
        );
    }
}
