use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rawdisc::sector::SectorStripper;
use rawdisc::tables::{TableScanner, BLOCK_SIZE};
use std::io::Cursor;

fn bench_strip(c: &mut Criterion) {
    let data = vec![42u8; 2352 * 512];

    c.bench_function("strip_512_sectors", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(2048 * 512);
            SectorStripper::new(Cursor::new(black_box(&data[..])))
                .unwrap()
                .strip_to(&mut out)
                .unwrap();
            out
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    // Alternating zero and tagged blocks: every other block emits a record.
    let mut data = Vec::with_capacity(1024 * 1024);
    while data.len() < 1024 * 1024 {
        data.extend(std::iter::repeat(0u8).take(BLOCK_SIZE));
        data.extend(b"TBL0");
        data.extend(std::iter::repeat(0x55u8).take(BLOCK_SIZE - 4));
    }

    c.bench_function("scan_1mb_dense_tags", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            TableScanner::new(Cursor::new(black_box(&data[..])))
                .unwrap()
                .scan_to(&mut out)
                .unwrap()
        })
    });

    let zeros = vec![0u8; 1024 * 1024];
    c.bench_function("scan_1mb_zeros", |b| {
        b.iter(|| {
            TableScanner::new(Cursor::new(black_box(&zeros[..])))
                .unwrap()
                .scan_to(&mut std::io::sink())
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_strip, bench_scan);
criterion_main!(benches);
