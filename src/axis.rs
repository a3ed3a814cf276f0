//! Axis Index Resolution
//!
//! ## Overview
//!
//! Given a query value on one axis, resolution answers two questions:
//! does the value sit exactly on a break-point, and which adjacent pair
//! of break-points brackets it for interpolation. Both tables of a map
//! (X and Y) use the same resolver, so the bracket rules live in exactly
//! one place and are tested independently of the interpolation math.
//!
//! ## Bracket Rules
//!
//! For an axis `a[0..n]` that is monotonically non-decreasing:
//!
//! - `n == 1`: index 0 is both ends of the bracket; no interpolation is
//!   possible along this axis.
//! - Exact match at `i` (first match wins on plateaus): the hit itself
//!   needs no interpolation, but when the *other* axis still does, this
//!   axis contributes the bracket `(i-1, i)` — or `(0, 1)` when `i == 0`.
//!   Evaluating the interpolant at the bracket edge then reproduces the
//!   exact column/row.
//! - Otherwise: the unique `(i, i+1)` with `a[i] < v < a[i+1]`.
//!
//! Callers resolve only values already inside `[a[0], a[n-1]]` (the range
//! policy runs first). Should a non-monotonic axis slip through anyway,
//! the resolver degrades to the nearest end rather than panicking; the
//! table's validity flag is what guards against trusting such output.

use core::marker::PhantomData;

use crate::traits::Cell;

/// Typed, bounds-checked element view over an axis region's bytes.
///
/// The table's buffer stores axes as little-endian element runs; this
/// wrapper decodes elements on access instead of keeping a second typed
/// copy in sync.
pub struct AxisView<'a, A: Cell> {
    bytes: &'a [u8],
    _elem: PhantomData<A>,
}

impl<'a, A: Cell> AxisView<'a, A> {
    /// Wrap an axis region's bytes. Length must be a multiple of `A::SIZE`.
    pub fn new(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % A::SIZE, 0);
        Self { bytes, _elem: PhantomData }
    }

    /// Number of break-points on this axis
    pub fn len(&self) -> usize {
        self.bytes.len() / A::SIZE
    }

    /// True when the axis has no break-points
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the break-point at `idx`
    pub fn get(&self, idx: usize) -> A {
        A::from_le_slice(&self.bytes[idx * A::SIZE..(idx + 1) * A::SIZE])
    }

    /// First break-point (axis minimum for a monotonic axis)
    pub fn first(&self) -> A {
        self.get(0)
    }

    /// Last break-point (axis maximum for a monotonic axis)
    pub fn last(&self) -> A {
        self.get(self.len() - 1)
    }

    /// True iff every element is >= its predecessor (plateaus permitted)
    pub fn is_monotonic(&self) -> bool {
        (1..self.len()).all(|i| self.get(i - 1) <= self.get(i))
    }

    /// Index of the first break-point equal to `v`, if any
    pub fn position(&self, v: A) -> Option<usize> {
        (0..self.len()).find(|&i| self.get(i) == v)
    }
}

/// Outcome of resolving one query value against one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisHit {
    /// Index of the break-point the value matched exactly, if any
    pub exact: Option<usize>,
    /// Lower interpolation bracket index
    pub lo: usize,
    /// Upper interpolation bracket index
    pub hi: usize,
}

/// Resolve `v` against `axis` per the bracket rules above.
pub fn resolve<A: Cell>(axis: &AxisView<'_, A>, v: A) -> AxisHit {
    let n = axis.len();
    if n == 1 {
        return AxisHit { exact: Some(0), lo: 0, hi: 0 };
    }

    for i in 0..n {
        if v == axis.get(i) {
            let (lo, hi) = if i == 0 { (0, 1) } else { (i - 1, i) };
            return AxisHit { exact: Some(i), lo, hi };
        }
    }

    for i in 0..n - 1 {
        if axis.get(i) < v && v < axis.get(i + 1) {
            return AxisHit { exact: None, lo: i, hi: i + 1 };
        }
    }

    // Unreachable for in-range values on a monotonic axis; degrade to the
    // nearest end so unvalidated data cannot cause an index panic.
    if v < axis.first() {
        AxisHit { exact: Some(0), lo: 0, hi: 0 }
    } else {
        AxisHit { exact: Some(n - 1), lo: n - 1, hi: n - 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_bytes(values: &[i32]) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, v) in values.iter().enumerate() {
            v.write_le(&mut bytes[i * 4..]);
        }
        bytes
    }

    #[test]
    fn view_decodes_elements() {
        let bytes = axis_bytes(&[10, 20, 30, 40]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert_eq!(view.len(), 4);
        assert_eq!(view.get(0), 10);
        assert_eq!(view.get(3), 40);
        assert_eq!(view.first(), 10);
        assert_eq!(view.last(), 40);
    }

    #[test]
    fn monotonicity_permits_plateaus() {
        let bytes = axis_bytes(&[10, 20, 20, 30]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert!(view.is_monotonic());

        let bytes = axis_bytes(&[10, 30, 20, 40]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert!(!view.is_monotonic());
    }

    #[test]
    fn between_break_points() {
        let bytes = axis_bytes(&[10, 20, 30, 40]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert_eq!(
            resolve(&view, 15),
            AxisHit { exact: None, lo: 0, hi: 1 }
        );
        assert_eq!(
            resolve(&view, 35),
            AxisHit { exact: None, lo: 2, hi: 3 }
        );
    }

    #[test]
    fn exact_hit_brackets_downward() {
        let bytes = axis_bytes(&[10, 20, 30, 40]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        // Interior and top hits bracket (i-1, i)
        assert_eq!(
            resolve(&view, 20),
            AxisHit { exact: Some(1), lo: 0, hi: 1 }
        );
        assert_eq!(
            resolve(&view, 40),
            AxisHit { exact: Some(3), lo: 2, hi: 3 }
        );
        // First break-point has nothing below it
        assert_eq!(
            resolve(&view, 10),
            AxisHit { exact: Some(0), lo: 0, hi: 1 }
        );
    }

    #[test]
    fn single_point_axis() {
        let bytes = axis_bytes(&[1]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..4]);
        assert_eq!(
            resolve(&view, 1),
            AxisHit { exact: Some(0), lo: 0, hi: 0 }
        );
    }

    #[test]
    fn plateau_takes_first_match() {
        let bytes = axis_bytes(&[10, 20, 20, 30]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert_eq!(
            resolve(&view, 20),
            AxisHit { exact: Some(1), lo: 0, hi: 1 }
        );
        // Strict bracket skips over the plateau
        assert_eq!(
            resolve(&view, 25),
            AxisHit { exact: None, lo: 2, hi: 3 }
        );
    }

    #[test]
    fn position_finds_first_exact_match() {
        let bytes = axis_bytes(&[10, 20, 20, 30]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert_eq!(view.position(20), Some(1));
        assert_eq!(view.position(30), Some(3));
        assert_eq!(view.position(21), None);
    }

    #[test]
    fn out_of_range_degrades_to_nearest_end() {
        let bytes = axis_bytes(&[10, 20, 30, 40]);
        let view: AxisView<'_, i32> = AxisView::new(&bytes[..16]);
        assert_eq!(resolve(&view, -5).exact, Some(0));
        assert_eq!(resolve(&view, 99).exact, Some(3));
    }
}
