//! Benchmark: parse + align + emit over a synthetic class file with many
//! multi-variant classes, versus parse alone.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;

const TYPES: &[&str] = &["boolean", "string", "datetime", "sint32", "uint16", "uint64"];

fn synthetic_input(classes: usize, properties: usize) -> String {
    let mut src = String::new();
    for c in 0..classes {
        for ns in ["", "v2/"] {
            let _ = writeln!(src, "class {}Msvm_Class{}", ns, c);
            for p in 0..properties {
                // v2 variants drop every fourth property and gain one of their own
                if !ns.is_empty() && p % 4 == 3 {
                    continue;
                }
                let suffix = if p % 5 == 0 { "[]" } else { "" };
                let _ = writeln!(src, "    {} Prop{}{}", TYPES[p % TYPES.len()], p, suffix);
            }
            if !ns.is_empty() {
                let _ = writeln!(src, "    uint32 Extra{}", c);
            }
            let _ = writeln!(src, "end\n");
        }
    }
    src
}

fn bench_generate(c: &mut Criterion) {
    let src = synthetic_input(200, 24);
    c.bench_function("parse", |b| b.iter(|| wmigen::parse(black_box(&src))));
    c.bench_function("generate", |b| b.iter(|| wmigen::generate(black_box(&src))));
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
