//! # streamhandle - Rebindable Stream Handles
//!
//! A small abstraction over byte-stream I/O that puts plain and compressed file
//! access behind one interface and reports failures through a structured error
//! type.
//!
//! ## Features
//!
//! - **Rebindable handles**: an [`OutputHandle`] or [`InputHandle`] can be pointed
//!   at a different file at any time without losing buffered output
//! - **Compression support**: gzip, bzip2, xz and zstd output at a chosen level;
//!   input format is detected from magic numbers
//! - **Restartable reads**: file-backed input can be rewound, and line counting
//!   leaves the read position untouched
//! - **Typed I/O**: values are written through `Display` and parsed back through
//!   `FromStr`, with errors naming the type and file involved
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types
//! - [`stream`] - Handles, codec selection, scanning and boundary checks
//! - `config` - Optional TOML defaults (feature `config`)

pub mod error;
pub mod stream;

#[cfg(feature = "config")]
pub mod config;

pub use error::{Result, StreamError};
pub use stream::{
    directory_exists, CompressionType, InputHandle, InputSource, OutputHandle, OutputTarget,
    DEFAULT_LEVEL,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
