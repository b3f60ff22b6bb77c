//! Rebindable stream handles with transparent compression support.
//!
//! An [`OutputHandle`] or [`InputHandle`] is a logical owner of exactly one
//! underlying byte resource at a time. The resource can be a standard stream, a
//! plain file, or a file under one of the supported compression formats, and it
//! can be swapped for another one without changing the handle itself.

pub mod compression;
pub mod input;
pub mod output;
pub mod scan;
pub mod sink;
pub mod validation;

pub use compression::{CompressionType, DEFAULT_LEVEL};
pub use input::InputHandle;
pub use output::OutputHandle;
pub use validation::directory_exists;

use std::path::PathBuf;

/// Where an [`InputHandle`] reads from when constructed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum InputSource {
    /// Process standard input, bound raw and not rewindable
    #[default]
    Stdin,
    /// A named file opened through the compression-aware reader
    Path(PathBuf),
}

/// Where an [`OutputHandle`] writes to when constructed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputTarget {
    /// Process standard output
    #[default]
    Stdout,
    /// A plain file, created or truncated
    Path(PathBuf),
    /// A file written through the encoder for `kind` at `level`
    Compressed {
        path: PathBuf,
        kind: CompressionType,
        level: u32,
    },
}

pub(crate) const STDIN_NAME: &str = "<stdin>";
pub(crate) const STDOUT_NAME: &str = "<stdout>";
