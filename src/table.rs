//! Calibration Table with Direct Lookup and Interpolation
//!
//! ## Overview
//!
//! `Table` maps one or two independent axis values to a dependent value:
//! a fuel map keyed by RPM and load, an ignition curve keyed by RPM, a
//! sensor linearisation curve. Queries that land exactly on axis
//! break-points read the grid cell directly; anything else is linearly or
//! bilinearly interpolated from the bracketing cells.
//!
//! ## Memory Layout
//!
//! The whole table lives in one owned byte buffer, carved once at
//! initialisation into three regions plus a reserved pad byte:
//!
//! ```text
//! [X axis: X_SIZE × X] [Y axis: Y_SIZE × Y] [grid: X_SIZE·Y_SIZE × T] [pad]
//! ```
//!
//! The grid is row-major by X then Y (`index = x * Y_SIZE + y`). Elements
//! are little-endian, so the buffer doubles as the persistence format:
//! `save_data` / `load_data` are verbatim copies of `DATA_BYTES` bytes.
//!
//! Stable Rust cannot size an array from arithmetic on other const
//! parameters, so the byte size is the trailing `DATA` parameter, written
//! at the instantiation site and checked at `initialise()`:
//!
//! ```rust
//! use calmap::{data_size, Table};
//!
//! // 4x4 map of u8 cells on i32 axes
//! let mut map: Table<u8, i32, i32, 4, 4, { data_size::<u8, i32, i32>(4, 4) }> =
//!     Table::new();
//! map.initialise().unwrap();
//! ```
//!
//! ## Out-of-Range Policy
//!
//! Two-axis tables default to [`RangePolicy::Reject`]: a query outside
//! either axis fails whole with `OutOfBounds`. One-axis tables default to
//! [`RangePolicy::Clamp`]: the query is pinned to the boundary cell (and
//! reported through `log` when that feature is on). The policy is stored
//! on the table and can be overridden explicitly; the two behaviors are
//! never mixed silently.
//!
//! ## Timing
//!
//! Every operation is a bounded in-memory computation: O(axis length)
//! worst case, O(1) on a cache hit or repeated exact query. There is no
//! allocation after construction and no internal locking; embedders that
//! share a table across contexts must serialize access themselves.

use core::marker::PhantomData;

use crate::arena::{Arena, Region};
use crate::axis::{self, AxisView};
use crate::cache::Cache;
use crate::errors::{TableError, TableResult};
use crate::interp;
use crate::traits::Cell;

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Bytes required for a table's buffer: grid, both axes, one pad byte.
///
/// Use it at the instantiation site to compute the `DATA` parameter, and
/// in embedding systems to size save/load transfer buffers.
pub const fn data_size<T, X, Y>(x_size: usize, y_size: usize) -> usize {
    x_size * y_size * core::mem::size_of::<T>()
        + x_size * core::mem::size_of::<X>()
        + y_size * core::mem::size_of::<Y>()
        + 1
}

/// What a lookup does with a query outside the axis range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangePolicy {
    /// Pin the query to the nearest boundary cell (one-axis default)
    Clamp,
    /// Fail the whole query with `OutOfBounds` (two-axis default)
    Reject,
}

/// Regions carved out of the buffer at initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    axis_x: Region,
    axis_y: Region,
    values: Region,
}

/// Fixed-size calibration table.
///
/// Type parameters: `T` is the cell type, `X`/`Y` the axis break-point
/// types (they may all differ), `X_SIZE`/`Y_SIZE` the axis lengths, and
/// `DATA` the buffer size in bytes, which must equal
/// [`data_size`]`::<T, X, Y>(X_SIZE, Y_SIZE)`.
///
/// A table with `Y_SIZE == 1` is effectively one-dimensional: the single
/// Y slot holds the sentinel value 1 and the `_1d` method variants query
/// it implicitly.
pub struct Table<T, X, Y, const X_SIZE: usize, const Y_SIZE: usize, const DATA: usize> {
    /// The one buffer holding axes, grid and pad byte
    data: [u8; DATA],
    /// Carved regions; `None` until `initialise()` has run
    layout: Option<Layout>,
    /// Out-of-range handling for lookups
    policy: RangePolicy,
    /// Set by `validate()`, cleared by axis mutation
    validated: bool,
    /// Last-query slot
    cache: Cache<X, Y>,
    _cell: PhantomData<T>,
}

impl<T, X, Y, const X_SIZE: usize, const Y_SIZE: usize, const DATA: usize>
    Table<T, X, Y, X_SIZE, Y_SIZE, DATA>
where
    T: Cell,
    X: Cell,
    Y: Cell,
{
    /// Required buffer size for these dimensions
    pub const DATA_BYTES: usize = data_size::<T, X, Y>(X_SIZE, Y_SIZE);

    /// Create an uninitialised table with a zeroed buffer.
    ///
    /// `const`, so tables can live in `static` storage. Call
    /// [`initialise`](Self::initialise) before any other operation.
    pub const fn new() -> Self {
        Self {
            data: [0; DATA],
            layout: None,
            policy: if Y_SIZE == 1 { RangePolicy::Clamp } else { RangePolicy::Reject },
            validated: false,
            cache: Cache::Empty,
            _cell: PhantomData,
        }
    }

    /// Zero the buffer, carve the regions, and for one-axis tables write
    /// the Y sentinel. The table still needs axis data and `validate()`
    /// before it answers lookups.
    pub fn initialise(&mut self) -> TableResult<()> {
        self.reset_data()?;
        if Y_SIZE == 1 {
            // Lone Y slot carries the sentinel so 1D queries resolve it
            let layout = self.layout.ok_or(TableError::NotInitialised)?;
            Self::write_elem::<Y>(&mut self.data, layout.axis_y, 0, Y::ONE);
        }
        Ok(())
    }

    /// Zero the entire buffer and re-run the three allocations.
    ///
    /// Drops all calibration data, the cache, and the validity flag.
    pub fn reset_data(&mut self) -> TableResult<()> {
        self.data.fill(0);
        self.layout = Some(self.carve()?);
        self.cache.invalidate();
        self.validated = false;
        Ok(())
    }

    /// Scan both axes for monotonically non-decreasing order.
    ///
    /// Plateaus are permitted; a decrease anywhere fails. The outcome is
    /// stored on the table: lookups error with `NotValidated` until a
    /// scan passes, and axis mutation clears the flag again.
    pub fn validate(&mut self) -> bool {
        let ok = match self.layout {
            Some(layout) => {
                self.axis_x_view(layout).is_monotonic() && self.axis_y_view(layout).is_monotonic()
            }
            None => false,
        };
        self.validated = ok;
        ok
    }

    /// Whether the last validation scan passed
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Current out-of-range policy
    pub fn range_policy(&self) -> RangePolicy {
        self.policy
    }

    /// Override the out-of-range policy.
    ///
    /// Invalidates the cache, since a cached result may have been
    /// produced under the previous policy.
    pub fn set_range_policy(&mut self, policy: RangePolicy) {
        self.policy = policy;
        self.cache.invalidate();
    }

    /// Drop the cached result; the next lookup recomputes.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Look up the value at axis coordinates `(x, y)`.
    ///
    /// Exact hits on both axes return the stored cell verbatim (widened
    /// to f32); otherwise the result is interpolated from the bracketing
    /// cells, collapsing to 1D linear interpolation when the corners
    /// degenerate along one axis.
    pub fn get_value(&mut self, x: X, y: Y) -> TableResult<f32> {
        let layout = self.layout()?;
        if !self.validated {
            return Err(TableError::NotValidated);
        }
        let (qx, qy) = self.apply_policy(layout, x, y)?;

        if let Some(result) = self.cache.hit(x, y) {
            return Ok(result);
        }

        let result = {
            let xs = self.axis_x_view(layout);
            let ys = self.axis_y_view(layout);
            let hx = axis::resolve(&xs, qx);
            let hy = axis::resolve(&ys, qy);

            match (hx.exact, hy.exact) {
                (Some(xi), Some(yi)) => self.read_cell(layout, xi, yi).to_f32(),
                _ => {
                    let x1 = xs.get(hx.lo).to_f32();
                    let x2 = xs.get(hx.hi).to_f32();
                    let y1 = ys.get(hy.lo).to_f32();
                    let y2 = ys.get(hy.hi).to_f32();
                    let q11 = self.read_cell(layout, hx.lo, hy.lo).to_f32();
                    let q12 = self.read_cell(layout, hx.lo, hy.hi).to_f32();
                    let q21 = self.read_cell(layout, hx.hi, hy.lo).to_f32();
                    let q22 = self.read_cell(layout, hx.hi, hy.hi).to_f32();
                    let xq = qx.to_f32();
                    let yq = qy.to_f32();

                    if q11 == q12 && q21 == q22 {
                        // Rows identical along Y: plain curve in X
                        interp::linear(q11, q21, x1, x2, xq)
                    } else if q11 == q21 && q12 == q22 {
                        // Columns identical along X: plain curve in Y
                        interp::linear(q11, q12, y1, y2, yq)
                    } else {
                        interp::bilinear(q11, q12, q21, q22, x1, x2, y1, y2, xq, yq)
                    }
                }
            }
        };

        // Keyed by the query as asked, not the clamped coordinates, so a
        // repeated out-of-range query under Clamp still short-circuits.
        self.cache.store(x, y, result);
        Ok(result)
    }

    /// One-axis lookup: queries `(x, Y::ONE)` against the sentinel slot.
    pub fn get_value_1d(&mut self, x: X) -> TableResult<f32> {
        self.get_value(x, Y::ONE)
    }

    /// Read the grid cell at integer indices `(x, y)`.
    pub fn get_value_by_index(&self, x: usize, y: usize) -> TableResult<T> {
        let layout = self.layout()?;
        self.check_index(x, X_SIZE)?;
        self.check_index(y, Y_SIZE)?;
        Ok(self.read_cell(layout, x, y))
    }

    /// Read the grid cell at index `x` of a one-axis table.
    pub fn get_value_by_index_1d(&self, x: usize) -> TableResult<T> {
        self.get_value_by_index(x, 0)
    }

    /// Write the grid cell at integer indices `(x, y)`.
    ///
    /// Out-of-range indices fail and leave the grid untouched. A
    /// successful write invalidates the cache.
    pub fn set_value_by_index(&mut self, x: usize, y: usize, value: T) -> TableResult<()> {
        let layout = self.layout()?;
        self.check_index(x, X_SIZE)?;
        self.check_index(y, Y_SIZE)?;
        Self::write_elem::<T>(&mut self.data, layout.values, x * Y_SIZE + y, value);
        self.cache.invalidate();
        Ok(())
    }

    /// Write the grid cell at index `x` of a one-axis table.
    pub fn set_value_by_index_1d(&mut self, x: usize, value: T) -> TableResult<()> {
        self.set_value_by_index(x, 0, value)
    }

    /// Write the cell whose axis break-points equal `(x, y)` exactly.
    ///
    /// There is no interpolated write-back: a coordinate off the
    /// break-point grid fails with `NoExactMatch` and changes nothing.
    pub fn set_value(&mut self, x: X, y: Y, value: T) -> TableResult<()> {
        let layout = self.layout()?;
        let xi = self
            .axis_x_view(layout)
            .position(x)
            .ok_or(TableError::NoExactMatch)?;
        let yi = self
            .axis_y_view(layout)
            .position(y)
            .ok_or(TableError::NoExactMatch)?;
        self.set_value_by_index(xi, yi, value)
    }

    /// One-axis variant of [`set_value`](Self::set_value).
    pub fn set_value_1d(&mut self, x: X, value: T) -> TableResult<()> {
        self.set_value(x, Y::ONE, value)
    }

    /// Write the X-axis break-point at `x`.
    ///
    /// Clears the validity flag (ordering may have changed) and the cache.
    pub fn set_x_axis_value_by_index(&mut self, x: usize, value: X) -> TableResult<()> {
        let layout = self.layout()?;
        self.check_index(x, X_SIZE)?;
        Self::write_elem::<X>(&mut self.data, layout.axis_x, x, value);
        self.cache.invalidate();
        self.validated = false;
        Ok(())
    }

    /// Write the Y-axis break-point at `y`.
    ///
    /// Clears the validity flag (ordering may have changed) and the cache.
    pub fn set_y_axis_value_by_index(&mut self, y: usize, value: Y) -> TableResult<()> {
        let layout = self.layout()?;
        self.check_index(y, Y_SIZE)?;
        Self::write_elem::<Y>(&mut self.data, layout.axis_y, y, value);
        self.cache.invalidate();
        self.validated = false;
        Ok(())
    }

    /// Read the X-axis break-point at `x`.
    pub fn x_axis_value_by_index(&self, x: usize) -> TableResult<X> {
        let layout = self.layout()?;
        self.check_index(x, X_SIZE)?;
        Ok(self.axis_x_view(layout).get(x))
    }

    /// Read the Y-axis break-point at `y`.
    pub fn y_axis_value_by_index(&self, y: usize) -> TableResult<Y> {
        let layout = self.layout()?;
        self.check_index(y, Y_SIZE)?;
        Ok(self.axis_y_view(layout).get(y))
    }

    /// Replace the whole X axis in one call (calibration loaders).
    pub fn load_x_axis(&mut self, values: &[X; X_SIZE]) -> TableResult<()> {
        for (i, v) in values.iter().enumerate() {
            self.set_x_axis_value_by_index(i, *v)?;
        }
        Ok(())
    }

    /// Replace the whole Y axis in one call (calibration loaders).
    pub fn load_y_axis(&mut self, values: &[Y; Y_SIZE]) -> TableResult<()> {
        for (i, v) in values.iter().enumerate() {
            self.set_y_axis_value_by_index(i, *v)?;
        }
        Ok(())
    }

    /// Copy the table's buffer into `buffer`, verbatim.
    ///
    /// `buffer` must be exactly [`DATA_BYTES`](Self::DATA_BYTES) long;
    /// any other length fails without a partial copy.
    pub fn save_data(&self, buffer: &mut [u8]) -> TableResult<()> {
        if buffer.len() != DATA {
            return Err(TableError::SizeMismatch { expected: DATA, actual: buffer.len() });
        }
        buffer.copy_from_slice(&self.data);
        Ok(())
    }

    /// Replace the table's buffer with `buffer`, verbatim.
    ///
    /// Re-runs the arena to re-derive the regions, invalidates the cache
    /// (the restored bytes may be different calibration data), and
    /// re-validates the restored axes, so prior lookup results reproduce
    /// immediately. Fails without touching the table when the length is
    /// not exactly [`DATA_BYTES`](Self::DATA_BYTES).
    pub fn load_data(&mut self, buffer: &[u8]) -> TableResult<()> {
        if buffer.len() != DATA {
            return Err(TableError::SizeMismatch { expected: DATA, actual: buffer.len() });
        }
        self.data.copy_from_slice(buffer);
        self.layout = Some(self.carve()?);
        self.cache.invalidate();
        self.validate();
        Ok(())
    }

    // -- internals --------------------------------------------------------

    /// Carve the three regions in the fixed layout order.
    ///
    /// Rejects instantiations whose `DATA` parameter disagrees with the
    /// computed size; the trailing pad byte stays uncarved.
    fn carve(&self) -> TableResult<Layout> {
        if DATA != Self::DATA_BYTES {
            return Err(TableError::SizeMismatch { expected: Self::DATA_BYTES, actual: DATA });
        }
        let mut arena = Arena::new(DATA);
        let axis_x = arena.allocate(X_SIZE * X::SIZE)?;
        let axis_y = arena.allocate(Y_SIZE * Y::SIZE)?;
        let values = arena.allocate(X_SIZE * Y_SIZE * T::SIZE)?;
        Ok(Layout { axis_x, axis_y, values })
    }

    fn layout(&self) -> TableResult<Layout> {
        self.layout.ok_or(TableError::NotInitialised)
    }

    fn axis_x_view(&self, layout: Layout) -> AxisView<'_, X> {
        AxisView::new(layout.axis_x.slice(&self.data))
    }

    fn axis_y_view(&self, layout: Layout) -> AxisView<'_, Y> {
        AxisView::new(layout.axis_y.slice(&self.data))
    }

    fn read_cell(&self, layout: Layout, x: usize, y: usize) -> T {
        let bytes = layout.values.slice(&self.data);
        T::from_le_slice(&bytes[(x * Y_SIZE + y) * T::SIZE..])
    }

    fn write_elem<E: Cell>(data: &mut [u8; DATA], region: Region, idx: usize, value: E) {
        let bytes = region.slice_mut(data);
        value.write_le(&mut bytes[idx * E::SIZE..]);
    }

    fn check_index(&self, index: usize, size: usize) -> TableResult<()> {
        if index >= size {
            return Err(TableError::IndexOutOfRange { index, size });
        }
        Ok(())
    }

    /// Bounds-handle a query per the table's policy: reject fails whole
    /// when either axis is out of range, clamp pins to the boundary.
    fn apply_policy(&self, layout: Layout, x: X, y: Y) -> TableResult<(X, Y)> {
        let xs = self.axis_x_view(layout);
        let ys = self.axis_y_view(layout);
        let (x_min, x_max) = (xs.first(), xs.last());
        let (y_min, y_max) = (ys.first(), ys.last());

        match self.policy {
            RangePolicy::Reject => {
                if x < x_min || x > x_max {
                    return Err(TableError::OutOfBounds {
                        value: x.to_f32(),
                        min: x_min.to_f32(),
                        max: x_max.to_f32(),
                    });
                }
                if y < y_min || y > y_max {
                    return Err(TableError::OutOfBounds {
                        value: y.to_f32(),
                        min: y_min.to_f32(),
                        max: y_max.to_f32(),
                    });
                }
                Ok((x, y))
            }
            RangePolicy::Clamp => {
                let (cx, x_clamped) = clamp(x, x_min, x_max);
                let (cy, y_clamped) = clamp(y, y_min, y_max);
                if x_clamped || y_clamped {
                    log_warn!(
                        "table lookup clamped: ({}, {}) -> ({}, {})",
                        x.to_f32(),
                        y.to_f32(),
                        cx.to_f32(),
                        cy.to_f32()
                    );
                }
                Ok((cx, cy))
            }
        }
    }
}

impl<T, X, Y, const X_SIZE: usize, const Y_SIZE: usize, const DATA: usize> Default
    for Table<T, X, Y, X_SIZE, Y_SIZE, DATA>
where
    T: Cell,
    X: Cell,
    Y: Cell,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Pin `v` into `[min, max]`, reporting whether it moved.
fn clamp<A: Cell>(v: A, min: A, max: A) -> (A, bool) {
    if v < min {
        (min, true)
    } else if v > max {
        (max, true)
    } else {
        (v, false)
    }
}
