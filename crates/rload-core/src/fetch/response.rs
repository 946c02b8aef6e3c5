//! HTTP/1.1 response head parsing: status line, header block, encoding check.

use crate::error::{FetchError, FetchErrorKind};
use std::collections::HashMap;
use std::io::{BufRead, Read};

/// Headers whose presence means the body would need decoding we do not do.
const REJECTED_ENCODING_HEADERS: [&str; 2] = ["transfer-encoding", "content-encoding"];

/// `HTTP/1.1 200 OK` split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine {
    pub version: String,
    pub status_code: u16,
    /// May contain spaces (e.g. `Not Found`).
    pub reason: String,
}

/// Status line plus headers keyed by lowercased name.
#[derive(Debug, Clone)]
pub(crate) struct ResponseHead {
    pub status: StatusLine,
    pub headers: HashMap<String, String>,
}

impl ResponseHead {
    /// Case-insensitive header lookup.
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Refuse chunked or compressed bodies instead of returning garbled text.
    pub(crate) fn ensure_identity_encoding(&self) -> Result<(), FetchError> {
        for name in REJECTED_ENCODING_HEADERS {
            if let Some(value) = self.header(name) {
                return Err(FetchError::new(
                    FetchErrorKind::UnsupportedEncoding,
                    format!("{}: {}", name, value),
                ));
            }
        }
        Ok(())
    }
}

fn malformed(detail: impl Into<String>) -> FetchError {
    FetchError::new(FetchErrorKind::MalformedResponse, detail)
}

pub(crate) fn parse_status_line(line: &str) -> Result<StatusLine, FetchError> {
    let parts: Vec<&str> = line.splitn(3, ' ').collect();
    if parts.len() != 3 {
        return Err(malformed(format!("invalid status line: {:?}", line)));
    }
    let status_code = parts[1]
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid status code: {:?}", parts[1])))?;
    Ok(StatusLine {
        version: parts[0].to_string(),
        status_code,
        reason: parts[2].trim().to_string(),
    })
}

/// `Name: value` → (`name`, `value`), name lowercased and value trimmed.
pub(crate) fn parse_header_line(line: &str) -> Result<(String, String), FetchError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| malformed(format!("invalid header line: {:?}", line)))?;
    Ok((name.trim().to_ascii_lowercase(), value.trim().to_string()))
}

/// Read one line, without its CRLF (or bare LF). `None` at end of stream.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, FetchError> {
    let mut buf = Vec::new();
    let n = reader
        .read_until(b'\n', &mut buf)
        .map_err(|e| FetchError::from_io("read response head", &e))?;
    if n == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| malformed("response head is not valid UTF-8"))
}

/// Read the status line and headers up to (and consuming) the empty line.
///
/// Duplicate header names overwrite earlier values.
pub(crate) fn read_head<R: BufRead>(reader: &mut R) -> Result<ResponseHead, FetchError> {
    let status_line = read_line(reader)?.ok_or_else(|| malformed("empty response"))?;
    let status = parse_status_line(&status_line)?;

    let mut headers = HashMap::new();
    loop {
        let line = read_line(reader)?
            .ok_or_else(|| malformed("connection closed before end of headers"))?;
        if line.is_empty() {
            break;
        }
        let (name, value) = parse_header_line(&line)?;
        headers.insert(name, value);
    }

    Ok(ResponseHead { status, headers })
}

/// Read everything left on the stream until the peer closes it.
pub(crate) fn read_body<R: Read>(reader: &mut R) -> Result<String, FetchError> {
    let mut body = Vec::new();
    reader
        .read_to_end(&mut body)
        .map_err(|e| FetchError::from_io("read response body", &e))?;
    tracing::trace!("read {} body bytes", body.len());
    String::from_utf8(body).map_err(|e| malformed(format!("body is not valid UTF-8: {}", e)))
}
