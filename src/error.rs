//! Error types for stream handle operations.
//!
//! Every fallible operation in this crate returns [`Result`]. Variants carry the
//! offending path or type name so a message can be shown to a user without any
//! further context from the call site.
//!
//! End-of-stream is never represented here: reads signal it with `Ok(None)`.

use std::path::PathBuf;
use thiserror::Error;

use crate::stream::CompressionType;

/// The error type for stream handle operations.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Opening or rebinding a write target failed
    #[error("File {path} is not writable (does the directory exist?).")]
    FileNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opening a read source failed (missing, unreadable, corrupt container)
    #[error("Cannot read from file: {path}.")]
    CannotReadFromFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Boundary directory check failed
    #[error("Directory {path} does not exist.")]
    DirectoryDoesNotExist { path: PathBuf },

    /// A typed write left the sink in an error state
    #[error("Error writing type: {type_name} to file {file}")]
    WriteError {
        type_name: &'static str,
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A typed read failed for a reason other than end-of-stream
    #[error("Error reading type: {type_name} from file {file}: {reason}")]
    ReadError {
        type_name: &'static str,
        file: String,
        reason: String,
    },

    /// Pushing buffered bytes (or a compression trailer) to the resource failed
    #[error("Failed to flush output to {file}")]
    FlushError {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// Compression level outside the range accepted by the codec
    #[error("Compression level {level} is out of range for {kind}")]
    InvalidCompressionLevel { kind: CompressionType, level: u32 },

    /// The handle has no recorded path to re-open from the beginning
    #[error("Cannot rewind {file}: not backed by a named file")]
    RewindUnsupported { file: String },
}

/// Standard Result type for stream handle operations.
pub type Result<T> = std::result::Result<T, StreamError>;

impl StreamError {
    pub fn file_not_writable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileNotWritable {
            path: path.into(),
            source,
        }
    }

    pub fn cannot_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CannotReadFromFile {
            path: path.into(),
            source,
        }
    }

    /// Create a ReadError for type `T`
    pub fn read<T: ?Sized>(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReadError {
            type_name: std::any::type_name::<T>(),
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a WriteError for type `T`
    pub fn write<T: ?Sized>(file: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            type_name: std::any::type_name::<T>(),
            file: file.into(),
            source,
        }
    }

    pub fn flush(file: impl Into<String>, source: std::io::Error) -> Self {
        Self::FlushError {
            file: file.into(),
            source,
        }
    }
}
