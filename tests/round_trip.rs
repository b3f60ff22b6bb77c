use streamhandle::{
    directory_exists, CompressionType, InputHandle, OutputHandle, OutputTarget, StreamError,
    DEFAULT_LEVEL,
};
use tempfile::TempDir;

const RECORDS: usize = 25;

fn levels_for(kind: CompressionType) -> Vec<u32> {
    match kind {
        CompressionType::None => vec![DEFAULT_LEVEL],
        _ => kind.level_range().collect(),
    }
}

fn write_records(out: &mut OutputHandle) {
    for i in 0..RECORDS {
        out.write(i).unwrap().write(' ').unwrap();
        out.write(format!("record-{i}")).unwrap().write('\n').unwrap();
    }
}

fn read_records(input: &mut InputHandle) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    while let Some(index) = input.read::<usize>().unwrap() {
        let name = input.read::<String>().unwrap().expect("record name");
        records.push((index, name));
    }
    records
}

#[test]
fn compressed_round_trip_for_every_kind_and_level() {
    let dir = TempDir::new().unwrap();
    let expected: Vec<(usize, String)> = (0..RECORDS).map(|i| (i, format!("record-{i}"))).collect();

    for kind in CompressionType::ALL {
        for level in levels_for(kind) {
            let path = dir.path().join(format!("records-{kind}-{level}"));

            let mut out = OutputHandle::stdout();
            out.open_compressed(&path, kind, level).unwrap();
            write_records(&mut out);
            out.close().unwrap();

            let mut input = InputHandle::open_path(&path).unwrap();
            assert_eq!(input.compression(), kind, "{kind} level {level}");
            assert_eq!(input.count_lines().unwrap(), RECORDS as u64);
            assert_eq!(read_records(&mut input), expected, "{kind} level {level}");
        }
    }
}

#[test]
fn rebinding_between_codecs_keeps_each_file_whole() {
    let dir = TempDir::new().unwrap();
    let gz = dir.path().join("first.gz");
    let xz = dir.path().join("second.xz");
    let plain = dir.path().join("third.txt");

    let mut out = OutputHandle::create(&plain).unwrap();
    out.open_compressed(&gz, CompressionType::Gzip, 9).unwrap();
    out.write("A").unwrap();
    out.open_compressed(&xz, CompressionType::Xz, 1).unwrap();
    out.write("B").unwrap();
    out.open(&plain).unwrap();
    out.write("C").unwrap();
    out.close().unwrap();

    let mut input = InputHandle::open_path(&gz).unwrap();
    assert_eq!(input.read::<String>().unwrap().as_deref(), Some("A"));
    assert_eq!(input.read::<String>().unwrap(), None);

    input.open(&xz).unwrap();
    assert_eq!(input.compression(), CompressionType::Xz);
    assert_eq!(input.read::<String>().unwrap().as_deref(), Some("B"));
    assert_eq!(input.read::<String>().unwrap(), None);

    assert_eq!(std::fs::read_to_string(&plain).unwrap(), "C");
}

#[test]
fn truncated_zstd_is_an_error_not_end_of_stream() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.zst");

    let mut out = OutputHandle::new(OutputTarget::Compressed {
        path: path.clone(),
        kind: CompressionType::Zstd,
        level: 3,
    })
    .unwrap();
    for i in 0..2000 {
        out.write(i).unwrap().write('\n').unwrap();
    }
    out.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    // Depending on block layout the damage shows up at open or mid-read
    match InputHandle::open_path(&path) {
        Err(StreamError::CannotReadFromFile { .. }) => {}
        Err(other) => panic!("unexpected open error: {other}"),
        Ok(mut input) => {
            let outcome = loop {
                match input.read::<u32>() {
                    Ok(Some(_)) => continue,
                    other => break other,
                }
            };
            assert!(matches!(outcome, Err(StreamError::ReadError { .. })));
        }
    }
}

#[test]
fn directory_check_scenarios() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("regular.txt");
    std::fs::write(&file, "not a directory").unwrap();

    assert!(directory_exists(dir.path()).is_ok());
    assert!(matches!(
        directory_exists(&file),
        Err(StreamError::DirectoryDoesNotExist { .. })
    ));
    assert!(matches!(
        directory_exists(dir.path().join("nested").join("missing")),
        Err(StreamError::DirectoryDoesNotExist { .. })
    ));
}
