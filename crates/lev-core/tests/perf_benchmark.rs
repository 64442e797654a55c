use lev_core::{GridMap, emit_level, parse_level};
use std::time::Instant;

#[test]
#[ignore] // Run manually with `cargo test --test perf_benchmark -- --nocapture --ignored`
fn benchmark_large_level_roundtrip() {
    let mut map = GridMap::new(1_000, 1_000).expect("level");
    for y in 0..1_000 {
        for x in 0..1_000 {
            map.set_block(x, y, ((x * 7 + y * 3) % 16) as u32).expect("in bounds");
        }
    }
    let text = emit_level(&map).expect("emit failed");

    let start = Instant::now();
    let _map = parse_level(&text).expect("parse failed");
    let duration = start.elapsed();

    println!("Parsed a 1000x1000 level ({} bytes) in {:?}", text.len(), duration);
}
