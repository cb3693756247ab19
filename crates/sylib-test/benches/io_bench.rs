//! Benchmarks for runtime I/O primitives

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sylib_io::{Printer, Scanner};

fn int_input(count: usize) -> Vec<u8> {
    let mut input = format!("{}\n", count);
    for i in 0..count {
        input.push_str(&format!("{} ", (i as i32).wrapping_mul(7919) - 500_000));
    }
    input.into_bytes()
}

fn bench_read_array(c: &mut Criterion) {
    let input = int_input(10_000);
    let mut buf = vec![0i32; 10_000];

    c.bench_function("scanner_read_array_10k", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(Cursor::new(input.as_slice()));
            black_box(scanner.read_array(&mut buf).unwrap())
        })
    });
}

fn bench_put_array(c: &mut Criterion) {
    let values: Vec<i32> = (0..10_000).map(|i| i * 31 - 77_000).collect();

    c.bench_function("printer_put_array_10k", |b| {
        b.iter(|| {
            let mut printer = Printer::new(Vec::with_capacity(80_000));
            printer.put_array(values.len() as i32, black_box(&values)).unwrap();
            black_box(printer.into_inner().len())
        })
    });
}

criterion_group!(benches, bench_read_array, bench_put_array);
criterion_main!(benches);
