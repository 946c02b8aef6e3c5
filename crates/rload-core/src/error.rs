//! Error types for URI parsing and fetching.
//!
//! Parse failures and fetch failures are separate types: a `MalformedUriError`
//! never reaches the fetch layer, and a `FetchError` always carries the kind of
//! failure so callers (and the retry classifier) can branch on it.

use std::fmt;
use std::io;

/// Why a URI was rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedUriReason {
    /// No `scheme:` prefix at all.
    MissingScheme,
    /// A scheme other than http, https, file or data.
    UnsupportedScheme,
    /// `http`/`https`/`file` without the `://` authority separator.
    MissingAuthority,
    /// Network scheme with nothing between `://` and the first `/`.
    EmptyHost,
}

impl fmt::Display for MalformedUriReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MalformedUriReason::MissingScheme => "missing scheme",
            MalformedUriReason::UnsupportedScheme => "unsupported scheme",
            MalformedUriReason::MissingAuthority => "expected '://' after scheme",
            MalformedUriReason::EmptyHost => "empty host",
        };
        f.write_str(s)
    }
}

/// Input could not be turned into a `ResourceDescriptor`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed URI {uri:?}: {reason}")]
pub struct MalformedUriError {
    pub uri: String,
    pub reason: MalformedUriReason,
}

impl MalformedUriError {
    pub(crate) fn new(uri: &str, reason: MalformedUriReason) -> Self {
        Self {
            uri: uri.to_string(),
            reason,
        }
    }
}

/// Category of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    ConnectionRefused,
    DnsFailure,
    Timeout,
    TlsFailure,
    /// Response declared `transfer-encoding` or `content-encoding`.
    UnsupportedEncoding,
    /// Status line, header block or body could not be understood.
    MalformedResponse,
    IoFailure,
    /// `data:` payload is not text/plain or text/html.
    UnsupportedMediaType,
    /// `data:` payload is not valid base64, or decodes to non-UTF-8 bytes.
    MalformedData,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchErrorKind::ConnectionRefused => "connection refused",
            FetchErrorKind::DnsFailure => "DNS failure",
            FetchErrorKind::Timeout => "timed out",
            FetchErrorKind::TlsFailure => "TLS failure",
            FetchErrorKind::UnsupportedEncoding => "unsupported encoding",
            FetchErrorKind::MalformedResponse => "malformed response",
            FetchErrorKind::IoFailure => "I/O failure",
            FetchErrorKind::UnsupportedMediaType => "unsupported media type",
            FetchErrorKind::MalformedData => "malformed data payload",
        };
        f.write_str(s)
    }
}

/// A failed fetch: what went wrong and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub detail: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Map a socket or file error to a kind, prefixing `context` to the detail.
    pub(crate) fn from_io(context: &str, err: &io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::ConnectionRefused => FetchErrorKind::ConnectionRefused,
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => FetchErrorKind::Timeout,
            _ => FetchErrorKind::IoFailure,
        };
        Self::new(kind, format!("{}: {}", context, err))
    }
}
