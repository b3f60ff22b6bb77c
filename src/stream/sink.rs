//! The single writable resource owned by an [`OutputHandle`](super::OutputHandle).

use std::fs::File;
use std::io::{self, BufWriter, Write};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use xz2::write::XzEncoder;

use crate::stream::CompressionType;

/// Writable byte sink behind an output handle.
///
/// Exactly one variant is live at a time. Encoders write through a buffered
/// file, so `finish` must run before release or the container is truncated.
pub enum Sink {
    /// Process standard output
    Stdout(io::Stdout),
    /// A stream supplied by the caller
    Writer(Box<dyn Write>),
    /// Plain file
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
    Xz(XzEncoder<BufWriter<File>>),
    Zstd(zstd::stream::write::Encoder<'static, BufWriter<File>>),
}

impl Sink {
    pub fn stdout() -> Self {
        Self::Stdout(io::stdout())
    }

    /// Compression format of the bytes reaching the resource
    pub fn compression(&self) -> CompressionType {
        match self {
            Self::Stdout(_) | Self::Writer(_) | Self::Plain(_) => CompressionType::None,
            Self::Gzip(_) => CompressionType::Gzip,
            Self::Bzip2(_) => CompressionType::Bzip2,
            Self::Xz(_) => CompressionType::Xz,
            Self::Zstd(_) => CompressionType::Zstd,
        }
    }

    /// Write any container trailer and push every buffered byte to the resource.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Stdout(mut out) => out.flush(),
            Self::Writer(mut writer) => writer.flush(),
            Self::Plain(mut file) => file.flush(),
            Self::Gzip(encoder) => encoder.finish()?.flush(),
            Self::Bzip2(encoder) => encoder.finish()?.flush(),
            Self::Xz(encoder) => encoder.finish()?.flush(),
            Self::Zstd(encoder) => encoder.finish()?.flush(),
        }
    }

    fn as_write(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(out) => out,
            Self::Writer(writer) => writer.as_mut(),
            Self::Plain(file) => file,
            Self::Gzip(encoder) => encoder,
            Self::Bzip2(encoder) => encoder,
            Self::Xz(encoder) => encoder,
            Self::Zstd(encoder) => encoder,
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.as_write().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.as_write().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.as_write().flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Stdout(_) => "Stdout",
            Self::Writer(_) => "Writer",
            Self::Plain(_) => "Plain",
            Self::Gzip(_) => "Gzip",
            Self::Bzip2(_) => "Bzip2",
            Self::Xz(_) => "Xz",
            Self::Zstd(_) => "Zstd",
        };
        f.debug_tuple("Sink").field(&name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::compression::encoder;

    #[test]
    fn test_finish_writes_complete_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.zst");

        let mut sink = encoder(CompressionType::Zstd, 3, File::create(&path).unwrap()).unwrap();
        assert_eq!(sink.compression(), CompressionType::Zstd);
        sink.write_all(b"hello zstd\n").unwrap();
        sink.finish().unwrap();

        let decoded = zstd::stream::decode_all(File::open(&path).unwrap()).unwrap();
        assert_eq!(decoded, b"hello zstd\n");
    }

    #[test]
    fn test_plain_sink_reports_no_compression() {
        let dir = tempfile::tempdir().unwrap();
        let file = File::create(dir.path().join("plain.txt")).unwrap();
        let sink = encoder(CompressionType::None, 0, file).unwrap();
        assert_eq!(sink.compression(), CompressionType::None);
        assert_eq!(format!("{sink:?}"), "Sink(\"Plain\")");
    }
}
