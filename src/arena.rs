//! Fixed Arena Allocation Over One Byte Buffer
//!
//! ## Overview
//!
//! A table owns exactly one contiguous byte buffer for its whole lifetime.
//! The arena carves that buffer into sub-regions — X axis, Y axis, value
//! grid, in that fixed order — at initialisation time, and never again.
//! There is no free list and no deallocation: the layout is a pure
//! function of the table's dimensions, so re-running the same allocation
//! sequence always reproduces the same regions.
//!
//! ## Design Rationale
//!
//! The obvious alternative is raw pointers into the buffer, which is how
//! this layout is traditionally done in C. Regions instead carry plain
//! `(offset, len)` pairs and hand out bounds-checked slices on demand,
//! which keeps the crate free of `unsafe` and makes a stale region a
//! panic-free logic error rather than undefined behavior.
//!
//! Because regions are just offsets, restoring the buffer from a saved
//! copy (see `Table::load_data`) only requires re-running the carve; the
//! bytes themselves are already in place.
//!
//! ## Invariants
//!
//! - `cursor <= capacity` at all times
//! - regions never overlap: each allocation starts where the previous ended
//! - a failed allocation leaves the cursor untouched

use crate::errors::{TableError, TableResult};

/// A carved sub-range of the table buffer.
///
/// Holds no reference to the buffer itself; callers pass the buffer in
/// when they want the bytes. This keeps `Region` `Copy` and lets the
/// table store regions alongside the buffer they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Byte offset of the region start
    pub offset: usize,
    /// Region length in bytes
    pub len: usize,
}

impl Region {
    /// Borrow the region's bytes out of `data`
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.offset..self.offset + self.len]
    }

    /// Mutably borrow the region's bytes out of `data`
    pub fn slice_mut<'a>(&self, data: &'a mut [u8]) -> &'a mut [u8] {
        &mut data[self.offset..self.offset + self.len]
    }
}

/// Bump allocator over a fixed capacity.
///
/// Tracks only a cursor; the buffer lives on the table. Allocations must
/// be requested in the fixed layout order so repeated initialisation
/// yields identical regions.
#[derive(Debug)]
pub struct Arena {
    capacity: usize,
    cursor: usize,
}

impl Arena {
    /// Create an arena over `capacity` bytes with the cursor at zero
    pub const fn new(capacity: usize) -> Self {
        Self { capacity, cursor: 0 }
    }

    /// Carve the next `len` bytes.
    ///
    /// Fails with `AllocationExhausted` when fewer than `len` bytes
    /// remain; the cursor does not move on failure, and the table must
    /// treat the failure as fatal for this buffer.
    pub fn allocate(&mut self, len: usize) -> TableResult<Region> {
        let remaining = self.capacity - self.cursor;
        if len > remaining {
            return Err(TableError::AllocationExhausted {
                requested: len,
                remaining,
            });
        }
        let region = Region { offset: self.cursor, len };
        self.cursor += len;
        Ok(region)
    }

    /// Rewind the cursor to zero, forgetting all carved regions
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Bytes not yet carved
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }
}
