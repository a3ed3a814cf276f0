//! Engine Map Example
//!
//! Walks through the full lifecycle of a calibration table: initialise,
//! load axes and cells, validate, query (exact, interpolated, cached,
//! out-of-range), and snapshot/rollback via save/load.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example engine_map
//! ```

use calmap::{data_size, RangePolicy, Table};

/// 4x4 fuel-map style table: u8 cells on i32 RPM/load axes
type FuelMap = Table<u8, i32, i32, 4, 4, { data_size::<u8, i32, i32>(4, 4) }>;

/// 5-point linearisation curve
type ThrottleCurve = Table<u32, i32, i32, 5, 1, { data_size::<u32, i32, i32>(5, 1) }>;

fn main() {
    println!("calmap Engine Map Example");
    println!("=========================\n");

    demo_fuel_map();
    println!();
    demo_throttle_curve();
    println!();
    demo_snapshot_rollback();
}

fn demo_fuel_map() {
    println!("Two-axis fuel map ({} bytes):", FuelMap::DATA_BYTES);
    println!("-----------------------------");

    let mut map = FuelMap::new();
    map.initialise().expect("sized by data_size, cannot fail");
    map.load_x_axis(&[10, 20, 30, 40]).unwrap();
    map.load_y_axis(&[10, 20, 30, 40]).unwrap();

    let rows: [[u8; 4]; 4] = [
        [5, 40, 45, 80],  // y = 10
        [10, 35, 50, 75], // y = 20
        [15, 30, 55, 70], // y = 30
        [20, 25, 60, 65], // y = 40
    ];
    for (y, row) in rows.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            map.set_value_by_index(x, y, cell).unwrap();
        }
    }
    assert!(map.validate());

    // Exact break-point hit: direct cell read
    println!("get_value(20, 20) = {:?}  (direct hit)", map.get_value(20, 20));
    // Halfway between cells on both axes: bilinear
    println!("get_value(15, 15) = {:?}  (bilinear)", map.get_value(15, 15));
    // Repeated query: served from the result cache
    println!("get_value(15, 15) = {:?}  (cached)", map.get_value(15, 15));
    // Two-axis tables reject out-of-range queries
    println!("get_value(10000, 35) = {:?}", map.get_value(10000, 35));
    assert_eq!(map.range_policy(), RangePolicy::Reject);
}

fn demo_throttle_curve() {
    println!("One-axis throttle curve ({} bytes):", ThrottleCurve::DATA_BYTES);
    println!("-----------------------------------");

    let mut curve = ThrottleCurve::new();
    curve.initialise().unwrap();
    curve.load_x_axis(&[0, 50, 60, 75, 100]).unwrap();
    for (x, &cell) in [50u32, 100, 150, 200, 250].iter().enumerate() {
        curve.set_value_by_index_1d(x, cell).unwrap();
    }
    assert!(curve.validate());

    for x in [0, 50, 25, 75, 100] {
        println!("get_value_1d({x}) = {:?}", curve.get_value_1d(x));
    }
    // One-axis tables clamp to the boundary cell instead of rejecting
    println!("get_value_1d(300) = {:?}  (clamped)", curve.get_value_1d(300));
}

fn demo_snapshot_rollback() {
    println!("Snapshot and rollback:");
    println!("----------------------");

    let mut map = FuelMap::new();
    map.initialise().unwrap();
    map.load_x_axis(&[10, 20, 30, 40]).unwrap();
    map.load_y_axis(&[10, 20, 30, 40]).unwrap();
    map.set_value(20, 20, 57).unwrap();
    assert!(map.validate());

    let mut snapshot = [0u8; FuelMap::DATA_BYTES];
    map.save_data(&mut snapshot).unwrap();
    println!("saved {} bytes", snapshot.len());

    map.set_value(20, 20, 32).unwrap();
    println!("after tweak:    get_value(20, 20) = {:?}", map.get_value(20, 20));

    map.load_data(&snapshot).unwrap();
    println!("after rollback: get_value(20, 20) = {:?}", map.get_value(20, 20));
}
