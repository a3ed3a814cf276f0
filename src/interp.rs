//! Linear and Bilinear Interpolation
//!
//! ## Overview
//!
//! All interpolation runs in `f32` regardless of the stored cell type;
//! integer grids are widened first so fractional positions never truncate.
//!
//! ```text
//!   |
//! y2|-Q12----R2----Q22
//!   |  !     !      !
//!  y|--------P--------
//!   |  !     !      !
//! y1|-Q11----R1----Q21
//!   |__!_____!______!_
//!      x1    x     x2
//! ```
//!
//! The bilinear form is the standard weighted average of the four corners:
//!
//! ```text
//! f(x,y) = (Q11*(x2-x)*(y2-y) + Q21*(x-x1)*(y2-y)
//!         + Q12*(x2-x)*(y-y1) + Q22*(x-x1)*(y-y1)) / ((x2-x1)*(y2-y1))
//! ```
//!
//! ## Degenerate Spans
//!
//! A zero-width span can only come from a plateau at the edge of an axis
//! bracket. Dividing by it would poison the result with NaN, so each form
//! collapses to the remaining axis (or the corner itself) instead. The
//! table layer additionally collapses equal corner *pairs* to 1D linear
//! interpolation before ever calling the bilinear form.

/// Linear interpolation of `x` in `[x1, x2]` between `q1` and `q2`.
///
/// A zero-width span returns `q1`.
pub fn linear(q1: f32, q2: f32, x1: f32, x2: f32, x: f32) -> f32 {
    let span = x2 - x1;
    if span == 0.0 {
        return q1;
    }
    q1 + ((q2 - q1) / span) * (x - x1)
}

/// Bilinear interpolation of `(x, y)` within the rectangle
/// `[x1, x2] × [y1, y2]` spanned by corners `q11, q12, q21, q22`
/// (first digit: x end, second digit: y end).
#[allow(clippy::too_many_arguments)]
pub fn bilinear(
    q11: f32, q12: f32, q21: f32, q22: f32,
    x1: f32, x2: f32,
    y1: f32, y2: f32,
    x: f32, y: f32,
) -> f32 {
    let x2x1 = x2 - x1;
    let y2y1 = y2 - y1;
    if x2x1 == 0.0 {
        return linear(q11, q12, y1, y2, y);
    }
    if y2y1 == 0.0 {
        return linear(q11, q21, x1, x2, x);
    }
    let x2x = x2 - x;
    let y2y = y2 - y;
    let yy1 = y - y1;
    let xx1 = x - x1;
    (q11 * x2x * y2y + q21 * xx1 * y2y + q12 * x2x * yy1 + q22 * xx1 * yy1)
        / (x2x1 * y2y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint_and_ends() {
        assert_eq!(linear(10.0, 20.0, 0.0, 100.0, 50.0), 15.0);
        assert_eq!(linear(10.0, 20.0, 0.0, 100.0, 0.0), 10.0);
        assert_eq!(linear(10.0, 20.0, 0.0, 100.0, 100.0), 20.0);
    }

    #[test]
    fn linear_zero_span_returns_lower() {
        assert_eq!(linear(7.0, 99.0, 5.0, 5.0, 5.0), 7.0);
    }

    #[test]
    fn bilinear_center_of_reference_cell() {
        // Corner values from the reference 4x4 map around (15, 15)
        let r = bilinear(
            5.0, 10.0, 40.0, 35.0,
            10.0, 20.0, 10.0, 20.0,
            15.0, 15.0,
        );
        assert_eq!(r, 22.5);
    }

    #[test]
    fn bilinear_at_edges_matches_linear() {
        // x pinned to x2: only the (q21, q22) column contributes
        let r = bilinear(
            5.0, 10.0, 40.0, 35.0,
            10.0, 20.0, 10.0, 20.0,
            20.0, 15.0,
        );
        assert_eq!(r, linear(40.0, 35.0, 10.0, 20.0, 15.0));
    }

    #[test]
    fn bilinear_reproduces_corners() {
        let r = bilinear(
            1.0, 2.0, 3.0, 4.0,
            0.0, 1.0, 0.0, 1.0,
            0.0, 0.0,
        );
        assert_eq!(r, 1.0);
        let r = bilinear(
            1.0, 2.0, 3.0, 4.0,
            0.0, 1.0, 0.0, 1.0,
            1.0, 1.0,
        );
        assert_eq!(r, 4.0);
    }

    #[test]
    fn bilinear_degenerate_spans_collapse() {
        // Zero x-span: interpolate along y only
        let r = bilinear(
            1.0, 3.0, 9.0, 9.0,
            5.0, 5.0, 0.0, 10.0,
            5.0, 5.0,
        );
        assert_eq!(r, 2.0);
        // Zero y-span: interpolate along x only
        let r = bilinear(
            1.0, 9.0, 3.0, 9.0,
            0.0, 10.0, 5.0, 5.0,
            5.0, 5.0,
        );
        assert_eq!(r, 2.0);
    }
}
