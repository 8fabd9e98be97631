use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{Context, io};

#[derive(Debug, Clone, Copy)]
enum ReadMode {
    Full,
    Head(usize),
    Tail(usize),
    LineRange { start_line: u64, end_line: u64 },
}

/// At most one of `head`, `tail`, or the `start_line`/`end_line` pair may be
/// set; `start_line` and `end_line` must be supplied together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    pub path: String,
    #[serde(default)]
    pub head: Option<u64>,
    #[serde(default)]
    pub tail: Option<u64>,
    #[serde(default)]
    pub start_line: Option<u64>,
    #[serde(default)]
    pub end_line: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    pub path: PathBuf,
    pub content: String,
}

pub fn read_file(ctx: &Context, request: ReadRequest) -> Result<ReadResponse> {
    let mode = parse_read_mode(&request)?;
    let path = ctx.validate_path(&request.path)?;

    let content = match mode {
        ReadMode::Full => io::read_full(&path)?,
        ReadMode::Head(lines) => io::read_head(&path, lines)?,
        ReadMode::Tail(lines) => io::read_tail(&path, lines)?,
        ReadMode::LineRange {
            start_line,
            end_line,
        } => io::read_range(&path, start_line, end_line)?,
    };

    Ok(ReadResponse { path, content })
}

fn parse_read_mode(request: &ReadRequest) -> Result<ReadMode> {
    let range_active = request.start_line.is_some() || request.end_line.is_some();
    let active_modes = [request.head.is_some(), request.tail.is_some(), range_active]
        .into_iter()
        .filter(|active| *active)
        .count();
    if active_modes > 1 {
        return Err(Error::InvalidRequest(
            "cannot combine head, tail, and start_line/end_line".to_string(),
        ));
    }

    match (request.start_line, request.end_line) {
        (Some(start_line), Some(end_line)) => {
            if start_line == 0 || end_line == 0 || start_line > end_line {
                return Err(Error::InvalidRequest(format!(
                    "invalid line range: {start_line}..{end_line}"
                )));
            }
            return Ok(ReadMode::LineRange {
                start_line,
                end_line,
            });
        }
        (None, None) => {}
        _ => {
            return Err(Error::InvalidRequest(
                "start_line and end_line must be provided together".to_string(),
            ));
        }
    }

    if let Some(lines) = request.head {
        return Ok(ReadMode::Head(usize::try_from(lines).unwrap_or(usize::MAX)));
    }
    if let Some(lines) = request.tail {
        return Ok(ReadMode::Tail(usize::try_from(lines).unwrap_or(usize::MAX)));
    }
    Ok(ReadMode::Full)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        head: Option<u64>,
        tail: Option<u64>,
        start_line: Option<u64>,
        end_line: Option<u64>,
    ) -> ReadRequest {
        ReadRequest {
            path: "ignored".to_string(),
            head,
            tail,
            start_line,
            end_line,
        }
    }

    #[test]
    fn modes_are_mutually_exclusive() {
        assert!(parse_read_mode(&request(Some(1), Some(1), None, None)).is_err());
        assert!(parse_read_mode(&request(Some(1), None, Some(1), Some(2))).is_err());
        assert!(parse_read_mode(&request(None, Some(1), Some(1), Some(2))).is_err());
    }

    #[test]
    fn range_endpoints_come_together() {
        assert!(parse_read_mode(&request(None, None, Some(1), None)).is_err());
        assert!(parse_read_mode(&request(None, None, None, Some(3))).is_err());
    }

    #[test]
    fn zero_and_inverted_ranges_are_rejected() {
        assert!(parse_read_mode(&request(None, None, Some(0), Some(3))).is_err());
        assert!(parse_read_mode(&request(None, None, Some(4), Some(2))).is_err());
    }

    #[test]
    fn no_flags_means_full_read() {
        assert!(matches!(
            parse_read_mode(&request(None, None, None, None)),
            Ok(ReadMode::Full)
        ));
    }
}
