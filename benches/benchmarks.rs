//! Performance benchmarks for walkfind

use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use walkfind::test_utils::TestTree;
use walkfind::{
    DisplayFlags, OutputBuffer, SearchConfig, TreeWalker, WalkOptions, format_size, run_search,
};

fn create_test_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    for d in 0..dirs {
        for f in 0..files_per_dir {
            tree.add_file(&format!("dir_{}/file_{}.rs", d, f), "fn main() {}");
        }
    }
    tree
}

fn create_deep_tree(depth: usize) -> TestTree {
    let tree = TestTree::new();
    let mut rel = String::new();
    for level in 0..depth {
        rel.push_str(&format!("level_{}/", level));
        tree.add_file(&format!("{}leaf_{}.txt", rel, level), "x");
    }
    tree
}

fn bench_format_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_size");

    group.bench_function("bytes", |b| b.iter(|| format_size(black_box(512))));
    group.bench_function("mebibytes", |b| {
        b.iter(|| format_size(black_box(5 * 1024 * 1024)))
    });

    group.finish();
}

fn bench_output_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_buffer");

    for capacity in [1, 50, 500] {
        group.bench_function(format!("append_1000_capacity_{}", capacity), |b| {
            b.iter(|| {
                let mut buffer = OutputBuffer::new(io::sink(), capacity);
                for _ in 0..1000 {
                    buffer.append(black_box(b"some/relative/path.txt\n")).unwrap();
                }
                buffer.drain().unwrap();
            })
        });
    }

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    let wide = create_test_tree(20, 25);
    group.bench_function("wide_500_files", |b| {
        b.iter(|| {
            TreeWalker::new(black_box(wide.path()), WalkOptions::default())
                .iter()
                .count()
        })
    });

    group.bench_function("wide_500_files_sorted", |b| {
        let options = WalkOptions {
            sort_by_name: true,
            ..Default::default()
        };
        b.iter(|| {
            TreeWalker::new(black_box(wide.path()), options.clone())
                .iter()
                .count()
        })
    });

    // Deeper than the handle budget, so directories get spilled.
    let deep = create_deep_tree(40);
    for budget in [1, 15, 64] {
        group.bench_function(format!("deep_40_budget_{}", budget), |b| {
            let options = WalkOptions {
                handle_budget: budget,
                ..Default::default()
            };
            b.iter(|| {
                TreeWalker::new(black_box(deep.path()), options.clone())
                    .iter()
                    .count()
            })
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let tree = create_test_tree(20, 25);
    let mut group = c.benchmark_group("search");

    let plain = SearchConfig::new(tree.path(), Some(r"file_1\d\.rs$")).unwrap();
    group.bench_function("pattern_full_path", |b| {
        b.iter(|| run_search(black_box(&plain), io::sink()).unwrap())
    });

    let extra = SearchConfig::new(tree.path(), None)
        .unwrap()
        .with_flags(DisplayFlags {
            show_metadata: true,
            match_basename: true,
            ..Default::default()
        });
    group.bench_function("metadata_basename", |b| {
        b.iter(|| run_search(black_box(&extra), io::sink()).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_format_size,
    bench_output_buffer,
    bench_walk,
    bench_search,
);
criterion_main!(benches);
