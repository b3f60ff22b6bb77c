//! Rebindable read handle with transparent decompression.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, StreamError};
use crate::stream::compression::{self, CompressionType};
use crate::stream::{scan, InputSource, STDIN_NAME};

const READER_NAME: &str = "<stream>";

/// One read source, either a standard stream or a named file.
///
/// Named files are always opened through the compression-aware reader, so
/// gzip, bzip2, xz, zstd and plain files read the same way. A handle backed by
/// a path can be rewound, which re-opens the file from byte zero.
pub struct InputHandle {
    source: Box<dyn BufRead>,
    path: Option<PathBuf>,
    compression: CompressionType,
    standard: bool,
}

impl InputHandle {
    pub fn new(source: InputSource) -> Result<Self> {
        match source {
            InputSource::Stdin => Ok(Self::stdin()),
            InputSource::Path(path) => Self::open_path(path),
        }
    }

    /// Bind to process standard input. Not rewindable.
    pub fn stdin() -> Self {
        Self {
            source: Box::new(BufReader::new(io::stdin())),
            path: None,
            compression: CompressionType::None,
            standard: true,
        }
    }

    /// Bind to a caller-supplied stream, read as-is. Not rewindable.
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self {
            source: Box::new(BufReader::new(reader)),
            path: None,
            compression: CompressionType::None,
            standard: false,
        }
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (compression, source) = open_source(path)?;
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
            compression,
            standard: false,
        })
    }

    /// Rebind to `path`. On failure the current source stays bound.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (compression, source) = open_source(path)?;
        log::debug!(
            "rebinding input from {} to {} ({})",
            self.file_name(),
            path.display(),
            compression
        );
        self.source = source;
        self.compression = compression;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Re-open the recorded path from the beginning.
    pub fn rewind(&mut self) -> Result<()> {
        let path = self.rewind_path()?.to_path_buf();
        let (compression, source) = open_source(&path)?;
        self.source = source;
        self.compression = compression;
        Ok(())
    }

    /// Release the source. Reads report end-of-stream until the handle is
    /// rewound or reopened; the recorded path is kept.
    pub fn close(&mut self) {
        log::debug!("closing input {}", self.file_name());
        self.source = Box::new(io::empty());
    }

    /// Parse the next whitespace-delimited token as `T`.
    ///
    /// Returns `Ok(None)` at end-of-stream.
    pub fn read<T>(&mut self) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let token = match scan::next_token(&mut self.source) {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(None),
            Err(e) => return Err(StreamError::read::<T>(self.file_name(), e.to_string())),
        };

        let text = std::str::from_utf8(&token)
            .map_err(|e| StreamError::read::<T>(self.file_name(), e.to_string()))?;
        text.parse::<T>()
            .map(Some)
            .map_err(|e| StreamError::read::<T>(self.file_name(), e.to_string()))
    }

    /// Read the next line without its terminator. `Ok(None)` at end-of-stream.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let line = match scan::next_line(&mut self.source) {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(None),
            Err(e) => return Err(StreamError::read::<String>(self.file_name(), e.to_string())),
        };

        String::from_utf8(line)
            .map(Some)
            .map_err(|e| StreamError::read::<String>(self.file_name(), e.to_string()))
    }

    /// Count the lines remaining in the stream, then rewind to the start.
    ///
    /// Fails up front, without consuming anything, when the handle has no path
    /// to rewind to.
    pub fn count_lines(&mut self) -> Result<u64> {
        let path = self.rewind_path()?.to_path_buf();
        let lines = scan::count_lines(&mut self.source)
            .map_err(|e| StreamError::read::<u64>(self.file_name(), e.to_string()))?;
        self.rewind()?;
        log::debug!("counted {} lines in {}", lines, path.display());
        Ok(lines)
    }

    /// Open a new handle on the same path, positioned at byte zero.
    ///
    /// Transferring a handle re-opens its file rather than sharing the
    /// underlying descriptor, so the copy never observes this handle's
    /// position.
    pub fn reopened(&self) -> Result<Self> {
        Self::open_path(self.rewind_path()?)
    }

    /// Raw access to the bound (decoded) source
    pub fn stream(&mut self) -> &mut dyn BufRead {
        self.source.as_mut()
    }

    /// Path of the bound file, `None` for standard input or a supplied stream
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Name used in error messages and logs
    pub fn file_name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None if self.standard => STDIN_NAME.to_string(),
            None => READER_NAME.to_string(),
        }
    }

    /// Format detected when the current source was opened
    pub fn compression(&self) -> CompressionType {
        self.compression
    }

    fn rewind_path(&self) -> Result<&Path> {
        self.path
            .as_deref()
            .ok_or_else(|| StreamError::RewindUnsupported {
                file: self.file_name(),
            })
    }
}

impl Default for InputHandle {
    fn default() -> Self {
        Self::stdin()
    }
}

impl std::fmt::Debug for InputHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputHandle")
            .field("file", &self.file_name())
            .field("compression", &self.compression)
            .finish_non_exhaustive()
    }
}

/// Open `path` through the compression-aware reader.
fn open_source(path: &Path) -> Result<(CompressionType, Box<dyn BufRead>)> {
    let file = File::open(path).map_err(|e| StreamError::cannot_read(path, e))?;
    let (compression, mut source) = compression::decoder(BufReader::new(file))
        .map_err(|e| StreamError::cannot_read(path, e))?;

    // Surface a corrupt container header here instead of on the first read
    source
        .fill_buf()
        .map_err(|e| StreamError::cannot_read(path, e))?;

    Ok((compression, source))
}
