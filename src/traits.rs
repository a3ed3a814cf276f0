//! Scalar Abstraction for Cell and Axis Types
//!
//! ## Overview
//!
//! A table stores three element arrays inside one byte buffer: the X axis,
//! the Y axis, and the value grid. Each array may use a different numeric
//! type (a fuel map typically keys `u8` cells on `i32` RPM/load axes), so
//! the storage layer needs one seam that answers three questions about a
//! scalar:
//!
//! - how many bytes it occupies in the buffer (`SIZE`)
//! - how to move it in and out of the buffer (`from_le_slice` / `write_le`)
//! - how to widen it for interpolation math (`to_f32`)
//!
//! Elements are serialized little-endian, which makes the raw buffer a
//! portable persistence format on its own: the bytes written on one target
//! read back identically on another.
//!
//! ## Precision
//!
//! Interpolation is always computed in `f32` to avoid truncation artifacts
//! with integer cells. Integer values above 2^24 lose precision when
//! widened; calibration data is far below that in practice.

/// Numeric scalar usable as a table cell or axis break-point.
///
/// Implemented for the fixed-width integers, `f32`, and (behind the
/// `fixed` feature) binary fixed-point types for FPU-less targets.
pub trait Cell: Copy + PartialEq + PartialOrd {
    /// Serialized width in bytes
    const SIZE: usize;

    /// The value 1 in this type's representation.
    ///
    /// Written into the single Y-axis slot of one-axis tables at
    /// initialisation, so a 1D lookup is a 2D lookup at y = ONE.
    const ONE: Self;

    /// Decode from the first `SIZE` bytes of `bytes` (little-endian)
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Encode into the first `SIZE` bytes of `out` (little-endian)
    fn write_le(self, out: &mut [u8]);

    /// Widen to f32 for interpolation math
    fn to_f32(self) -> f32;
}

macro_rules! impl_cell {
    ($($ty:ty),* $(,)?) => {$(
        impl Cell for $ty {
            const SIZE: usize = core::mem::size_of::<$ty>();
            const ONE: Self = 1 as $ty;

            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[..Self::SIZE]);
                <$ty>::from_le_bytes(raw)
            }

            fn write_le(self, out: &mut [u8]) {
                out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
            }

            fn to_f32(self) -> f32 {
                self as f32
            }
        }
    )*};
}

impl_cell!(i8, u8, i16, u16, i32, u32, f32);

/// Fixed-point scalars for targets without an FPU.
///
/// The interpolation path itself stays in f32 (software floats on such
/// targets); storing cells as fixed-point keeps the buffer compact and the
/// stored values free of float rounding.
#[cfg(feature = "fixed")]
mod fixed_impls {
    use super::Cell;
    use fixed::types::{I16F16, I8F8};

    macro_rules! impl_cell_fixed {
        ($($ty:ty),* $(,)?) => {$(
            impl Cell for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                const ONE: Self = <$ty>::ONE;

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_le_bytes(raw)
                }

                fn write_le(self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }

                fn to_f32(self) -> f32 {
                    self.to_num::<f32>()
                }
            }
        )*};
    }

    impl_cell_fixed!(I8F8, I16F16);
}
