//! Chunked partial-file reads.
//!
//! `read_head` and `read_tail` work in fixed-size chunks so memory stays
//! bounded no matter how large the file is. `read_range` and `read_full`
//! load the whole file, since arbitrary line-range access needs every line
//! boundary. File handles are scoped to each function and released on every
//! exit path by drop.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 1024;

pub(super) fn read_full(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::InvalidData => Error::InvalidUtf8(path.to_path_buf()),
        _ => Error::io_path("read", path, err),
    })
}

/// Reads the first `lines_wanted` lines, scanning forward chunk by chunk.
///
/// A chunk boundary can fall mid-line, so only the buffer content before its
/// last newline is split into lines; the remainder carries over to the next
/// chunk. A non-empty trailing partial line at end-of-file counts as the
/// final line.
pub(super) fn read_head(path: &Path, lines_wanted: usize) -> Result<String> {
    let mut file = File::open(path).map_err(|err| Error::io_path("open", path, err))?;
    let mut lines: Vec<String> = Vec::new();
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    while lines.len() < lines_wanted {
        let read = file
            .read(&mut chunk)
            .map_err(|err| Error::io_path("read", path, err))?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        if let Some(last_newline) = buffer.iter().rposition(|byte| *byte == b'\n') {
            for line in buffer[..last_newline].split(|byte| *byte == b'\n') {
                lines.push(decode_line(path, line)?);
                if lines.len() >= lines_wanted {
                    break;
                }
            }
            buffer.drain(..=last_newline);
        }
    }

    if !buffer.is_empty() && lines.len() < lines_wanted {
        lines.push(decode_line(path, &buffer)?);
    }
    Ok(lines.join("\n"))
}

/// Reads the last `lines_wanted` lines, scanning backward chunk by chunk.
///
/// The first fragment of each chunk may be the back half of a line straddling
/// the chunk boundary; it carries over as a prefix for the next (earlier)
/// chunk, except when the read reached offset 0 and the fragment is a genuine
/// complete line. CRLF is normalized to LF. Lines accumulate front-first so
/// the final order is top-to-bottom.
pub(super) fn read_tail(path: &Path, lines_wanted: usize) -> Result<String> {
    let mut file = File::open(path).map_err(|err| Error::io_path("open", path, err))?;
    let size = file
        .metadata()
        .map_err(|err| Error::io_path("metadata", path, err))?
        .len();
    if size == 0 {
        return Ok(String::new());
    }

    let mut lines: VecDeque<String> = VecDeque::new();
    let mut position = size;
    let mut carry: Vec<u8> = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    while position > 0 && lines.len() < lines_wanted {
        let take = position.min(CHUNK_SIZE as u64) as usize;
        position -= take as u64;
        file.seek(SeekFrom::Start(position))
            .map_err(|err| Error::io_path("seek", path, err))?;
        file.read_exact(&mut chunk[..take])
            .map_err(|err| Error::io_path("read", path, err))?;

        let mut text = chunk[..take].to_vec();
        text.extend_from_slice(&carry);
        let text = normalize_crlf(&text);

        let mut parts: Vec<&[u8]> = text.split(|byte| *byte == b'\n').collect();
        if position > 0 {
            carry = parts.remove(0).to_vec();
        } else {
            carry.clear();
        }

        for part in parts.iter().rev() {
            if lines.len() >= lines_wanted {
                break;
            }
            lines.push_front(decode_line(path, part)?);
        }
    }

    Ok(lines.into_iter().collect::<Vec<_>>().join("\n"))
}

/// Returns lines `start_line..=end_line` (1-based, inclusive), clamped to the
/// file's line count. CRLF is normalized to LF.
pub(super) fn read_range(path: &Path, start_line: u64, end_line: u64) -> Result<String> {
    let content = read_full(path)?;
    let content = content.replace("\r\n", "\n");
    let lines: Vec<&str> = content.split('\n').collect();
    let start = usize::try_from(start_line.max(1) - 1).unwrap_or(usize::MAX);
    let end = usize::try_from(end_line)
        .unwrap_or(lines.len())
        .min(lines.len());
    if start >= end {
        return Ok(String::new());
    }
    Ok(lines[start..end].join("\n"))
}

fn decode_line(path: &Path, bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8(path.to_path_buf()))
}

fn normalize_crlf(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().peekable();
    while let Some(&byte) = iter.next() {
        if byte == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.txt");
        std::fs::write(&path, content).expect("write");
        (dir, path)
    }

    #[test]
    fn head_returns_first_lines() {
        let (_dir, path) = temp_file("one\ntwo\nthree\nfour\nfive\n");
        assert_eq!(read_head(&path, 3).unwrap(), "one\ntwo\nthree");
    }

    #[test]
    fn head_includes_trailing_partial_line() {
        let (_dir, path) = temp_file("one\ntwo\nlast-no-newline");
        assert_eq!(read_head(&path, 5).unwrap(), "one\ntwo\nlast-no-newline");
    }

    #[test]
    fn head_spans_chunk_boundaries() {
        let line = "x".repeat(700);
        let content = format!("{line}\n{line}\n{line}\n");
        let (_dir, path) = temp_file(&content);
        assert_eq!(read_head(&path, 2).unwrap(), format!("{line}\n{line}"));
    }

    #[test]
    fn tail_returns_last_lines() {
        let (_dir, path) = temp_file("one\ntwo\nthree\nfour\nfive");
        assert_eq!(read_tail(&path, 3).unwrap(), "three\nfour\nfive");
    }

    #[test]
    fn tail_of_empty_file_is_empty() {
        let (_dir, path) = temp_file("");
        assert_eq!(read_tail(&path, 10).unwrap(), "");
    }

    #[test]
    fn tail_normalizes_crlf() {
        let (_dir, path) = temp_file("one\r\ntwo\r\nthree");
        assert_eq!(read_tail(&path, 2).unwrap(), "two\nthree");
    }

    #[test]
    fn tail_spans_chunk_boundaries() {
        let lines: Vec<String> = (0..200).map(|i| format!("line-{i:04}")).collect();
        let content = lines.join("\n");
        let (_dir, path) = temp_file(&content);
        assert_eq!(
            read_tail(&path, 5).unwrap(),
            lines[195..].join("\n"),
            "tail across multiple backward chunks"
        );
    }

    #[test]
    fn range_is_one_based_inclusive() {
        let (_dir, path) = temp_file("one\ntwo\nthree\nfour\nfive");
        assert_eq!(read_range(&path, 2, 4).unwrap(), "two\nthree\nfour");
    }

    #[test]
    fn range_clamps_to_file_bounds() {
        let (_dir, path) = temp_file("one\ntwo\nthree");
        assert_eq!(read_range(&path, 1, 100).unwrap(), "one\ntwo\nthree");
        assert_eq!(read_range(&path, 10, 20).unwrap(), "");
    }
}
