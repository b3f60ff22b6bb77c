//! Token and line scanning over buffered readers.
//!
//! These work directly on the reader's internal buffer through
//! `fill_buf`/`consume`, so nothing past the scanned token or line is consumed.

use std::io::{self, BufRead};

/// Count newline-terminated lines in the remainder of `reader`.
///
/// A trailing run of bytes without a final `\n` counts as one more line. An
/// empty remainder counts as zero.
pub fn count_lines<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<u64> {
    let mut lines = 0u64;
    let mut last_byte = None;

    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            break;
        }
        lines += memchr::memchr_iter(b'\n', buf).count() as u64;
        last_byte = buf.last().copied();
        let len = buf.len();
        reader.consume(len);
    }

    if matches!(last_byte, Some(byte) if byte != b'\n') {
        lines += 1;
    }
    Ok(lines)
}

/// Read the next whitespace-delimited token.
///
/// Leading ASCII whitespace is skipped; the delimiter after the token is left
/// in the reader. Returns `None` when only whitespace (or nothing) remains.
pub fn next_token<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    skip_whitespace(reader)?;

    let mut token = Vec::new();
    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            break;
        }
        match buf.iter().position(u8::is_ascii_whitespace) {
            Some(end) => {
                token.extend_from_slice(&buf[..end]);
                reader.consume(end);
                break;
            }
            None => {
                token.extend_from_slice(buf);
                let len = buf.len();
                reader.consume(len);
            }
        }
    }

    Ok(if token.is_empty() { None } else { Some(token) })
}

/// Read the next line without its `\n` or `\r\n` terminator.
pub fn next_line<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

fn skip_whitespace<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(start) => {
                reader.consume(start);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}
