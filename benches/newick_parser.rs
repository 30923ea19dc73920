use criterion::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use phylotext::{parse_newick, write_newick};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;

fn prepare_test_data() -> Vec<(String, String)> {
    let mut test_data = Vec::new();
    let test_data_dir =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data");

    let newick_files = ["trees01.tre"];

    for file_path in &newick_files {
        let full_path = test_data_dir.join(file_path);
        if let Ok(content) = fs::read_to_string(&full_path) {
            let name = file_path.replace(".tre", "");
            test_data.push((name, content));
        }
    }

    test_data
}

fn bench_newick_parser(c: &mut Criterion) {
    let test_data = prepare_test_data();

    let mut group = c.benchmark_group("newick_parser");
    let _ = group.sample_size(30);

    for (name, newick_string) in &test_data {
        let byte_count = newick_string.len();
        let _ = group.throughput(Throughput::Bytes(byte_count as u64));

        let _ = group.bench_with_input(
            BenchmarkId::new("parse_newick", name),
            newick_string,
            |b, newick| {
                b.iter(|| {
                    let _ = black_box(parse_newick(newick));
                });
            },
        );
    }

    group.finish();
}

fn bench_newick_writer(c: &mut Criterion) {
    let test_data = prepare_test_data();

    let mut group = c.benchmark_group("newick_writer");
    let _ = group.sample_size(30);

    for (name, newick_string) in &test_data {
        let trees =
            parse_newick(newick_string).expect("Failed to parse bench data");

        let _ = group.bench_with_input(
            BenchmarkId::new("write_newick", name),
            &trees,
            |b, trees| {
                b.iter(|| {
                    for tree in trees {
                        let _ = black_box(write_newick(tree));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_newick_parser, bench_newick_writer);
criterion_main!(benches);
