use proptest::prelude::*;
use streamhandle::{CompressionType, InputHandle, OutputHandle};
use tempfile::TempDir;

fn kind_strategy() -> impl Strategy<Value = CompressionType> {
    prop::sample::select(CompressionType::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn count_lines_matches_content_and_does_not_consume(
        lines in prop::collection::vec("[a-z0-9 ]{0,12}", 0..40),
        trailing_newline in any::<bool>(),
        kind in kind_strategy(),
    ) {
        let mut content = lines.join("\n");
        if trailing_newline && !lines.is_empty() {
            content.push('\n');
        }
        let expected = if content.is_empty() {
            0
        } else {
            content.matches('\n').count() as u64 + u64::from(!content.ends_with('\n'))
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data");
        let mut out = OutputHandle::stdout();
        out.open_compressed(&path, kind, 1).unwrap();
        out.write(&content).unwrap();
        out.close().unwrap();

        let mut fresh = InputHandle::open_path(&path).unwrap();
        let first_without_count = fresh.read::<String>().unwrap();

        let mut counted = InputHandle::open_path(&path).unwrap();
        prop_assert_eq!(counted.count_lines().unwrap(), expected);
        prop_assert_eq!(counted.read::<String>().unwrap(), first_without_count);
    }

    #[test]
    fn written_values_read_back_in_order(values in prop::collection::vec(any::<i64>(), 0..50)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.txt");

        let mut out = OutputHandle::create(&path).unwrap();
        for value in &values {
            out.write(value).unwrap().write('\n').unwrap();
        }
        out.close().unwrap();

        let mut input = InputHandle::open_path(&path).unwrap();
        let mut read = Vec::new();
        while let Some(value) = input.read::<i64>().unwrap() {
            read.push(value);
        }
        prop_assert_eq!(read, values);
    }
}
