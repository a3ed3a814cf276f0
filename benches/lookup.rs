//! Lookup hot-path benchmarks
//!
//! Control loops query a table every tick, usually with slowly-moving
//! coordinates. Three cases matter: a repeated identical query (cache
//! hit), a query landing exactly on break-points (direct read), and a
//! query needing full bilinear interpolation.

use calmap::{data_size, Table};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

type Map16 = Table<u8, i32, i32, 16, 16, { data_size::<u8, i32, i32>(16, 16) }>;

fn setup_map() -> Map16 {
    let mut map = Map16::new();
    map.initialise().unwrap();
    for i in 0..16 {
        map.set_x_axis_value_by_index(i, (i as i32) * 100).unwrap();
        map.set_y_axis_value_by_index(i, (i as i32) * 100).unwrap();
    }
    for x in 0..16 {
        for y in 0..16 {
            map.set_value_by_index(x, y, (x * 16 + y) as u8).unwrap();
        }
    }
    assert!(map.validate());
    map
}

fn bench_lookup(c: &mut Criterion) {
    c.bench_function("cache_hit", |b| {
        let mut map = setup_map();
        map.get_value(750, 750).unwrap();
        b.iter(|| map.get_value(black_box(750), black_box(750)).unwrap());
    });

    c.bench_function("exact_hit", |b| {
        let mut map = setup_map();
        let mut flip = false;
        b.iter(|| {
            // Alternate coordinates so the cache never hits
            flip = !flip;
            let x = if flip { 700 } else { 800 };
            map.get_value(black_box(x), black_box(700)).unwrap()
        });
    });

    c.bench_function("bilinear_miss", |b| {
        let mut map = setup_map();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let x = if flip { 750 } else { 850 };
            map.get_value(black_box(x), black_box(750)).unwrap()
        });
    });
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
