//! streamhandle - copy a stream between plain and compressed files
//!
//! Reads a file (any supported compression, detected automatically) or standard
//! input and writes it to a file under the chosen compression, or to standard
//! output.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use streamhandle::{
    directory_exists, CompressionType, InputHandle, InputSource, OutputHandle, OutputTarget,
};

fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("streamhandle")
        .version(streamhandle::VERSION)
        .about("Copy a stream between plain and compressed files")
        .arg(
            Arg::new("input")
                .help("File to read (standard input when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("File to write (standard output when omitted)"),
        )
        .arg(
            Arg::new("compression")
                .short('z')
                .long("compression")
                .help("Output compression (inferred from the output extension by default)")
                .value_parser(["none", "gzip", "bzip2", "xz", "zstd"]),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .help("Compression level")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("count-lines")
                .long("count-lines")
                .help("Print the number of input lines to stderr before copying")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let source = matches
        .get_one::<String>("input")
        .map(|path| InputSource::Path(PathBuf::from(path)))
        .unwrap_or_default();
    let mut input = InputHandle::new(source)?;

    if matches.get_flag("count-lines") {
        let lines = input
            .count_lines()
            .context("--count-lines requires a file input")?;
        eprintln!("{}: {} lines", input.file_name(), lines);
    }

    let mut output = OutputHandle::new(output_target(&matches)?)?;

    let bytes = std::io::copy(input.stream(), output.stream()).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            input.file_name(),
            output.file_name()
        )
    })?;
    output.close()?;

    log::info!("copied {} bytes from {}", bytes, input.file_name());
    Ok(())
}

fn output_target(matches: &ArgMatches) -> Result<OutputTarget> {
    let kind = matches
        .get_one::<String>("compression")
        .map(|name| name.parse::<CompressionType>())
        .transpose()?;

    let Some(path) = matches.get_one::<String>("output").map(PathBuf::from) else {
        if kind.is_some_and(|kind| kind.is_compressed()) {
            bail!("Compressed output requires --output");
        }
        return Ok(OutputTarget::Stdout);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        directory_exists(parent)?;
    }

    let (default_kind, default_level) = output_defaults()?;
    let kind = kind.unwrap_or_else(|| match CompressionType::from_path(&path) {
        CompressionType::None => default_kind,
        inferred => inferred,
    });
    let level = matches
        .get_one::<u32>("level")
        .copied()
        .unwrap_or(default_level);

    Ok(OutputTarget::Compressed { path, kind, level })
}

#[cfg(feature = "config")]
fn output_defaults() -> Result<(CompressionType, u32)> {
    let config = streamhandle::config::StreamConfig::load_default()?;
    Ok((config.compression, config.level))
}

#[cfg(not(feature = "config"))]
fn output_defaults() -> Result<(CompressionType, u32)> {
    Ok((CompressionType::None, streamhandle::DEFAULT_LEVEL))
}
