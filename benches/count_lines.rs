use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streamhandle::{CompressionType, InputHandle, OutputHandle};
use tempfile::TempDir;

fn create_test_file(dir: &TempDir, size_kb: usize, kind: CompressionType) -> std::path::PathBuf {
    let path = dir.path().join(format!("bench-{size_kb}-{kind}"));
    let target_size = size_kb * 1024;
    let mut current_size = 0;
    let mut line_num = 0;

    let mut out = OutputHandle::stdout();
    out.open_compressed(&path, kind, 3).unwrap();
    while current_size < target_size {
        let log_line = format!(
            "[2024-09-02T10:{}:{}] INFO: Request {} user_{}\n",
            (line_num / 3600) % 24,
            (line_num / 60) % 60,
            line_num,
            line_num % 1000
        );
        out.write(&log_line).unwrap();
        current_size += log_line.len();
        line_num += 1;
    }
    out.close().unwrap();
    path
}

fn bench_count_lines(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("count_lines");
    group.sample_size(10);

    for kind in [CompressionType::None, CompressionType::Gzip, CompressionType::Zstd] {
        for size_kb in [50, 500, 5000] {
            let path = create_test_file(&dir, size_kb, kind);
            let mut input = InputHandle::open_path(&path).unwrap();

            group.bench_with_input(
                BenchmarkId::new(kind.name(), format!("{size_kb}KB")),
                &size_kb,
                |b, _| b.iter(|| black_box(input.count_lines().unwrap())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_count_lines);
criterion_main!(benches);
