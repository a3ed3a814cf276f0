//! Property tests for interpolation and persistence
//!
//! - On a grid whose values increase along X, lookups must be
//!   non-decreasing along X for any fixed Y.
//! - A saved buffer loaded into a fresh table of the same dimensions must
//!   reproduce every lookup result exactly.

use calmap::{data_size, Table};
use proptest::prelude::*;

type Map4x4 = Table<u8, i32, i32, 4, 4, { data_size::<u8, i32, i32>(4, 4) }>;

const AXIS: [i32; 4] = [10, 20, 30, 40];

fn build_map(cells: &[[u8; 4]; 4]) -> Map4x4 {
    let mut map = Map4x4::new();
    map.initialise().unwrap();
    map.load_x_axis(&AXIS).unwrap();
    map.load_y_axis(&AXIS).unwrap();
    for x in 0..4 {
        for y in 0..4 {
            map.set_value_by_index(x, y, cells[x][y]).unwrap();
        }
    }
    assert!(map.validate());
    map
}

/// Grid monotonically non-decreasing along X: per-column base plus
/// cumulative increments. Bounded so u8 cells cannot overflow.
fn monotone_grid() -> impl Strategy<Value = [[u8; 4]; 4]> {
    (
        proptest::array::uniform4(0u8..=100),
        proptest::array::uniform4(proptest::array::uniform4(0u8..=30)),
    )
        .prop_map(|(bases, increments)| {
            let mut cells = [[0u8; 4]; 4];
            for y in 0..4 {
                let mut acc = bases[y];
                for x in 0..4 {
                    acc += increments[x][y];
                    cells[x][y] = acc;
                }
            }
            cells
        })
}

proptest! {
    #[test]
    fn lookups_monotone_along_x(
        cells in monotone_grid(),
        x1 in 10i32..=40,
        x2 in 10i32..=40,
        y in 10i32..=40,
    ) {
        let mut map = build_map(&cells);
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let at_lo = map.get_value(lo, y).unwrap();
        let at_hi = map.get_value(hi, y).unwrap();
        prop_assert!(at_lo <= at_hi, "f({lo},{y})={at_lo} > f({hi},{y})={at_hi}");
    }

    #[test]
    fn exact_hits_return_stored_cells(cells in monotone_grid()) {
        let mut map = build_map(&cells);
        for (xi, &x) in AXIS.iter().enumerate() {
            for (yi, &y) in AXIS.iter().enumerate() {
                prop_assert_eq!(map.get_value(x, y).unwrap(), cells[xi][yi] as f32);
            }
        }
    }

    #[test]
    fn persistence_round_trip_reproduces_lookups(
        cells in proptest::array::uniform4(proptest::array::uniform4(any::<u8>())),
        queries in proptest::collection::vec((0i32..=50, 0i32..=50), 1..20),
    ) {
        let mut original = build_map(&cells);
        let mut saved = [0u8; Map4x4::DATA_BYTES];
        original.save_data(&mut saved).unwrap();

        let mut restored = Map4x4::new();
        restored.initialise().unwrap();
        restored.load_data(&saved).unwrap();

        for (x, y) in queries {
            // Out-of-range queries must fail identically too
            prop_assert_eq!(restored.get_value(x, y), original.get_value(x, y));
        }
    }

    #[test]
    fn interpolated_results_stay_within_corner_envelope(
        cells in monotone_grid(),
        x in 10i32..=40,
        y in 10i32..=40,
    ) {
        let mut map = build_map(&cells);
        let result = map.get_value(x, y).unwrap();
        let min = cells.iter().flatten().copied().min().unwrap() as f32;
        let max = cells.iter().flatten().copied().max().unwrap() as f32;
        prop_assert!(result >= min && result <= max);
    }
}
