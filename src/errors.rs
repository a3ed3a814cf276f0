//! Error Types for Table Operations
//!
//! ## Design Philosophy
//!
//! calmap's error system follows the constraints of deterministic embedded
//! control code:
//!
//! 1. **Small Size**: every variant is a few machine words at most, since
//!    errors are returned from the lookup hot path on every rejected query.
//!
//! 2. **No Heap Allocation**: all error data is inline. This keeps memory
//!    usage deterministic and works without an allocator.
//!
//! 3. **Copy Semantics**: errors implement `Copy` so they can be returned
//!    and stored without move-semantics friction.
//!
//! 4. **Recoverable by Construction**: none of these conditions panic. A
//!    caller can always retry with corrected input, a resized buffer, or
//!    after re-validating the table.
//!
//! ## Error Categories
//!
//! ### Query failures
//! - `OutOfBounds`: query outside the axis range under the rejecting policy
//! - `NotValidated`: axes have not passed (or never ran) monotonicity
//!   validation, so interpolation on them cannot be trusted
//! - `NotInitialised`: the table's internal regions have not been carved yet
//!
//! ### Mutation failures
//! - `IndexOutOfRange`: direct index access beyond the declared dimensions;
//!   the grid is left untouched
//! - `NoExactMatch`: `set_value` requires the coordinate to sit exactly on
//!   axis break-points; there is no interpolated write-back
//!
//! ### Storage failures
//! - `SizeMismatch`: save/load buffer length differs from `data_size()`;
//!   no partial copy is performed
//! - `AllocationExhausted`: the fixed arena ran out of space while carving
//!   regions — fatal for that table instance until re-initialised with a
//!   correctly sized buffer

use thiserror_no_std::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableError {
    /// Query outside the axis range (rejecting policy only)
    #[error("Value {value} outside axis range [{min}, {max}]")]
    OutOfBounds {
        /// The queried coordinate, widened to f32
        value: f32,
        /// First break-point of the violated axis
        min: f32,
        /// Last break-point of the violated axis
        max: f32,
    },

    /// Axes have not passed monotonicity validation
    #[error("Table not validated: call validate() after loading axis data")]
    NotValidated,

    /// The table has not been initialised
    #[error("Table not initialised: call initialise() first")]
    NotInitialised,

    /// Direct index access beyond the declared dimensions
    #[error("Index {index} out of range (size {size})")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// The dimension it was checked against
        size: usize,
    },

    /// No axis break-point matches the coordinate exactly
    #[error("No exact axis match for coordinate")]
    NoExactMatch,

    /// Save/load buffer length differs from the table's data size
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Required buffer length in bytes
        expected: usize,
        /// Length the caller provided
        actual: usize,
    },

    /// The fixed arena ran out of space while carving regions
    #[error("Allocation exhausted: requested {requested}, remaining {remaining}")]
    AllocationExhausted {
        /// Bytes requested from the arena
        requested: usize,
        /// Bytes left before the request
        remaining: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for TableError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfBounds { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::NotValidated =>
                defmt::write!(fmt, "Table not validated"),
            Self::NotInitialised =>
                defmt::write!(fmt, "Table not initialised"),
            Self::IndexOutOfRange { index, size } =>
                defmt::write!(fmt, "Index {} out of range (size {})", index, size),
            Self::NoExactMatch =>
                defmt::write!(fmt, "No exact axis match"),
            Self::SizeMismatch { expected, actual } =>
                defmt::write!(fmt, "Size mismatch: expected {}, got {}", expected, actual),
            Self::AllocationExhausted { requested, remaining } =>
                defmt::write!(fmt, "Allocation exhausted: requested {}, remaining {}", requested, remaining),
        }
    }
}
