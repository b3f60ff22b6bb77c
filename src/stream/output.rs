//! Rebindable write handle.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StreamError};
use crate::stream::compression::{self, CompressionType, DEFAULT_LEVEL};
use crate::stream::sink::Sink;
use crate::stream::{OutputTarget, STDOUT_NAME};

const WRITER_NAME: &str = "<stream>";

/// One write target that can be standard output, a caller-supplied stream, a
/// plain file, or a compressed file.
///
/// A handle is always bound to a usable sink. Rebinding acquires the new file
/// before the previous sink is released, so a failed [`open`](Self::open) or
/// [`open_compressed`](Self::open_compressed) leaves the handle writing where
/// it was.
///
/// # Example
///
/// ```no_run
/// use streamhandle::{CompressionType, OutputHandle};
///
/// # fn main() -> streamhandle::Result<()> {
/// let mut out = OutputHandle::create("counts.txt")?;
/// out.write(42)?.write('\n')?;
/// out.open_compressed("counts.txt.gz", CompressionType::Gzip, 6)?;
/// out.write("compressed")?;
/// out.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OutputHandle {
    sink: Sink,
    path: Option<PathBuf>,
}

impl OutputHandle {
    pub fn new(target: OutputTarget) -> Result<Self> {
        let mut handle = Self::stdout();
        match target {
            OutputTarget::Stdout => {}
            OutputTarget::Path(path) => handle.open(path)?,
            OutputTarget::Compressed { path, kind, level } => {
                handle.open_compressed(path, kind, level)?
            }
        }
        Ok(handle)
    }

    /// Bind to process standard output
    pub fn stdout() -> Self {
        Self {
            sink: Sink::stdout(),
            path: None,
        }
    }

    /// Create (or truncate) `path` as a plain file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(OutputTarget::Path(path.as_ref().to_path_buf()))
    }

    /// Bind to a caller-supplied stream. No path is recorded.
    pub fn from_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            sink: Sink::Writer(Box::new(writer)),
            path: None,
        }
    }

    /// Rebind to `path` as a plain file.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.open_compressed(path, CompressionType::None, DEFAULT_LEVEL)
    }

    /// Rebind to `path`, writing through the encoder for `kind` at `level`.
    ///
    /// Pending output of the current sink is flushed first. On any failure the
    /// current sink stays bound and `path` is left as it was. The new file is
    /// emptied only after the previous sink is finished, so rebinding to the
    /// file already being written starts it over cleanly.
    pub fn open_compressed(
        &mut self,
        path: impl AsRef<Path>,
        kind: CompressionType,
        level: u32,
    ) -> Result<()> {
        let path = path.as_ref();
        kind.validate_level(level)?;
        self.flush()?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| StreamError::file_not_writable(path, e))?;
        let truncate = file
            .try_clone()
            .map_err(|e| StreamError::file_not_writable(path, e))?;
        let sink = compression::encoder(kind, level, file)
            .map_err(|e| StreamError::file_not_writable(path, e))?;

        log::debug!(
            "rebinding output from {} to {} ({}, level {})",
            self.file_name(),
            path.display(),
            kind,
            level
        );
        let finished = self.rebind(sink, Some(path.to_path_buf()));

        // The previous sink may have been this same file; its trailer is out now
        let truncated = truncate
            .set_len(0)
            .map_err(|e| StreamError::file_not_writable(path, e));
        finished.and(truncated)
    }

    /// Finish the current sink and rebind to standard output. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        log::debug!("closing output {}", self.file_name());
        self.rebind(Sink::stdout(), None)
    }

    /// Push buffered bytes to the underlying resource.
    pub fn flush(&mut self) -> Result<()> {
        self.sink
            .flush()
            .map_err(|e| StreamError::flush(self.file_name(), e))
    }

    /// Write the text representation of `value`.
    ///
    /// Returns the handle so writes can be chained.
    pub fn write<T: Display>(&mut self, value: T) -> Result<&mut Self> {
        if let Err(e) = write!(self.sink, "{value}") {
            return Err(StreamError::write::<T>(self.file_name(), e));
        }
        Ok(self)
    }

    /// Raw access to the bound sink
    pub fn stream(&mut self) -> &mut dyn Write {
        &mut self.sink
    }

    /// Path of the bound file, `None` for standard output or a supplied stream
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Name used in error messages and logs
    pub fn file_name(&self) -> String {
        match (&self.path, &self.sink) {
            (Some(path), _) => path.display().to_string(),
            (None, Sink::Writer(_)) => WRITER_NAME.to_string(),
            (None, _) => STDOUT_NAME.to_string(),
        }
    }

    pub fn compression(&self) -> CompressionType {
        self.sink.compression()
    }

    /// Swap in `sink`, then finish and release the previous one.
    fn rebind(&mut self, sink: Sink, path: Option<PathBuf>) -> Result<()> {
        let previous_name = self.file_name();
        let previous = std::mem::replace(&mut self.sink, sink);
        self.path = path;
        previous
            .finish()
            .map_err(|e| StreamError::flush(previous_name, e))
    }
}

impl Default for OutputHandle {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Drop for OutputHandle {
    fn drop(&mut self) {
        let sink = std::mem::replace(&mut self.sink, Sink::stdout());
        if let Err(e) = sink.finish() {
            log::warn!("failed to finish output {}: {}", self.file_name(), e);
        }
    }
}
