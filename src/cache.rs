//! Single-Slot Result Cache
//!
//! ## Overview
//!
//! Control loops hammer the same table coordinate for many consecutive
//! iterations (engine speed does not jump between 1 ms samples), so one
//! remembered result removes the axis scans and interpolation from the
//! common case entirely. One slot is deliberate: it costs a handful of
//! bytes, needs no eviction policy, and its timing is constant.
//!
//! ## State Machine
//!
//! ```text
//!           store(x, y, r)
//!   Empty ─────────────────▶ Valid { x, y, r }
//!     ▲                        │    │
//!     │    invalidate()        │    │ hit(x, y) == query
//!     └────────────────────────┘    ▼
//!                                 short-circuit return
//! ```
//!
//! Every mutation of table data invalidates the slot; a query with
//! different coordinates simply misses and is overwritten on compute.

/// Last-query cache slot for a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cache<X, Y> {
    /// No trusted result stored
    Empty,
    /// The most recent query and its computed result
    Valid {
        /// Cached X coordinate
        x: X,
        /// Cached Y coordinate
        y: Y,
        /// Result computed for (x, y)
        result: f32,
    },
}

impl<X: PartialEq + Copy, Y: PartialEq + Copy> Cache<X, Y> {
    /// Return the cached result iff the slot is valid for exactly (x, y)
    pub fn hit(&self, x: X, y: Y) -> Option<f32> {
        match self {
            Self::Valid { x: cx, y: cy, result } if *cx == x && *cy == y => Some(*result),
            _ => None,
        }
    }

    /// Populate the slot after a computed lookup
    pub fn store(&mut self, x: X, y: Y, result: f32) {
        *self = Self::Valid { x, y, result };
    }

    /// Drop the slot back to `Empty`
    pub fn invalidate(&mut self) {
        *self = Self::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_never_hits() {
        let cache: Cache<i32, i32> = Cache::Empty;
        assert_eq!(cache.hit(10, 10), None);
    }

    #[test]
    fn hit_requires_both_coordinates() {
        let mut cache = Cache::Empty;
        cache.store(15, 25, 42.5);
        assert_eq!(cache.hit(15, 25), Some(42.5));
        assert_eq!(cache.hit(15, 26), None);
        assert_eq!(cache.hit(16, 25), None);
    }

    #[test]
    fn store_overwrites_previous_slot() {
        let mut cache = Cache::Empty;
        cache.store(1, 1, 5.0);
        cache.store(2, 2, 9.0);
        assert_eq!(cache.hit(1, 1), None);
        assert_eq!(cache.hit(2, 2), Some(9.0));
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut cache = Cache::Empty;
        cache.store(3, 4, 1.5);
        cache.invalidate();
        assert_eq!(cache.hit(3, 4), None);
        assert_eq!(cache, Cache::Empty);
    }
}
