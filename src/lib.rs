//! Fixed-size calibration tables for embedded control
//!
//! Maps one or two axis values to a dependent value: direct lookup on
//! exact axis hits, linear/bilinear interpolation otherwise. Built for
//! engine-management style calibration maps where layout, latency and
//! memory use must be predictable.
//!
//! Key constraints:
//! - One owned buffer per table, no allocation after construction
//! - O(axis length) worst case, O(1) on repeated queries (result cache)
//! - No panics in library paths; every failure is a returned error
//!
//! ```rust
//! use calmap::{data_size, Table};
//!
//! // 4x4 fuel-map style table: u8 cells on i32 axes
//! let mut map: Table<u8, i32, i32, 4, 4, { data_size::<u8, i32, i32>(4, 4) }> =
//!     Table::new();
//! map.initialise().unwrap();
//! map.load_x_axis(&[10, 20, 30, 40]).unwrap();
//! map.load_y_axis(&[10, 20, 30, 40]).unwrap();
//! map.set_value_by_index(0, 0, 5).unwrap();
//! map.set_value_by_index(1, 0, 40).unwrap();
//! assert!(map.validate());
//!
//! // Interpolated lookup between break-points
//! let value = map.get_value(15, 10).unwrap();
//! assert_eq!(value, 22.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod arena;
pub mod axis;
pub mod cache;
pub mod errors;
pub mod interp;
pub mod table;
pub mod traits;

// Public API
pub use errors::{TableError, TableResult};
pub use table::{data_size, RangePolicy, Table};
pub use traits::Cell;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
