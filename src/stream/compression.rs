//! Compression format selection and codec construction.
//!
//! The write side builds an encoder for an explicitly chosen [`CompressionType`]
//! and level. The read side never asks: it peeks at the first bytes of the
//! buffered source, matches them against known magic numbers, and wraps the
//! source in the right decoder (or leaves it alone for plain data).

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

use bzip2::bufread::MultiBzDecoder;
use bzip2::write::BzEncoder;
use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use xz2::bufread::XzDecoder;
use xz2::write::XzEncoder;

use crate::error::{Result, StreamError};
use crate::stream::sink::Sink;

/// Compression level used when the caller does not pick one
pub const DEFAULT_LEVEL: u32 = 6;

/// Supported compression formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CompressionType {
    /// No compression - plain bytes
    #[default]
    None,
    /// Gzip compression (.gz files)
    Gzip,
    /// Bzip2 compression (.bz2 files)
    Bzip2,
    /// XZ compression (.xz files)
    Xz,
    /// Zstandard compression (.zst, .zstd files)
    Zstd,
}

impl CompressionType {
    /// Every supported kind, plain included
    pub const ALL: [CompressionType; 5] = [
        Self::None,
        Self::Gzip,
        Self::Bzip2,
        Self::Xz,
        Self::Zstd,
    ];

    /// Get the stable lowercase name for the compression type
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Check if this type represents a compressed format
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Levels accepted by the codec. Plain output ignores the level entirely.
    pub fn level_range(&self) -> RangeInclusive<u32> {
        match self {
            Self::None => 0..=u32::MAX,
            Self::Gzip | Self::Xz => 0..=9,
            Self::Bzip2 => 1..=9,
            Self::Zstd => 1..=22,
        }
    }

    pub fn validate_level(&self, level: u32) -> Result<()> {
        if self.level_range().contains(&level) {
            Ok(())
        } else {
            Err(StreamError::InvalidCompressionLevel { kind: *self, level })
        }
    }

    /// Pick a kind from a file name's extension, plain if it has none we know
    pub fn from_path(path: &Path) -> Self {
        detect_by_extension(path).unwrap_or(Self::None)
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown compression type: {0}")]
pub struct ParseCompressionTypeError(String);

impl FromStr for CompressionType {
    type Err = ParseCompressionTypeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCompressionTypeError(s.to_string()))
    }
}

/// Detect compression format from magic bytes
///
/// - Gzip: `1f 8b` (RFC 1952)
/// - Bzip2: `42 5a 68` ("BZh")
/// - XZ: `fd 37 7a 58 5a 00`
/// - Zstd: `28 b5 2f fd`
pub(crate) fn detect_by_magic(magic: &[u8]) -> Option<CompressionType> {
    if magic.starts_with(&[0x1f, 0x8b]) {
        Some(CompressionType::Gzip)
    } else if magic.starts_with(&[0x42, 0x5a, 0x68]) {
        Some(CompressionType::Bzip2)
    } else if magic.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
        Some(CompressionType::Zstd)
    } else if magic.starts_with(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]) {
        Some(CompressionType::Xz)
    } else {
        None
    }
}

/// Detect compression format from file extension
fn detect_by_extension(path: &Path) -> Option<CompressionType> {
    let ext = path.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "gz" => Some(CompressionType::Gzip),
        "bz2" => Some(CompressionType::Bzip2),
        "xz" => Some(CompressionType::Xz),
        "zst" | "zstd" => Some(CompressionType::Zstd),
        _ => None,
    }
}

/// Wrap a freshly created file in the encoder for `kind`.
///
/// The level must already be validated.
pub(crate) fn encoder(kind: CompressionType, level: u32, file: File) -> io::Result<Sink> {
    let writer = BufWriter::new(file);
    let sink = match kind {
        CompressionType::None => Sink::Plain(writer),
        CompressionType::Gzip => {
            Sink::Gzip(GzEncoder::new(writer, flate2::Compression::new(level)))
        }
        CompressionType::Bzip2 => {
            Sink::Bzip2(BzEncoder::new(writer, bzip2::Compression::new(level)))
        }
        CompressionType::Xz => Sink::Xz(XzEncoder::new(writer, level)),
        // Range checked by validate_level, always fits
        CompressionType::Zstd => Sink::Zstd(zstd::stream::write::Encoder::new(
            writer,
            level as i32,
        )?),
    };
    Ok(sink)
}

/// Wrap `reader` in the decoder its leading bytes call for.
///
/// Nothing is consumed from `reader` during detection. Concatenated members are
/// decoded to the end for every format.
pub(crate) fn decoder<R>(mut reader: R) -> io::Result<(CompressionType, Box<dyn BufRead>)>
where
    R: BufRead + 'static,
{
    let kind = detect_by_magic(reader.fill_buf()?).unwrap_or(CompressionType::None);

    let decoded: Box<dyn BufRead> = match kind {
        CompressionType::None => Box::new(reader),
        CompressionType::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(reader))),
        CompressionType::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(reader))),
        CompressionType::Xz => Box::new(BufReader::new(XzDecoder::new_multi_decoder(reader))),
        CompressionType::Zstd => Box::new(BufReader::new(
            zstd::stream::read::Decoder::with_buffer(reader)?,
        )),
    };

    Ok((kind, decoded))
}
