//! URI parsing into an immutable resource descriptor.
//!
//! Pure string handling, no I/O. The descriptor is a sum type over the three
//! transports so each variant only carries the fields its fetch strategy needs:
//! a network target has a host and port, a file has a path, and an inline
//! `data:` resource keeps its raw payload until fetch time.

mod scheme;

pub use scheme::{Scheme, TransportKind};

use crate::error::{MalformedUriError, MalformedUriReason};
use serde::Serialize;
use std::fmt;

/// Path used when a network or file URI has nothing after the host.
const ROOT_PATH: &str = "/";

/// `http` or `https` resource: connect to `host:port` and `GET path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkResource {
    scheme: Scheme,
    host: String,
    port: u16,
    path: String,
}

impl NetworkResource {
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Request target, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True for `https`.
    pub fn is_tls(&self) -> bool {
        self.scheme == Scheme::Https
    }
}

/// `file` resource: a local path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResource {
    path: String,
}

impl FileResource {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// `data` resource: everything after `data:`, parsed lazily by the fetch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineResource {
    payload: String,
}

impl InlineResource {
    /// Raw `<mediatype>[;base64],<data>` text.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Parsed form of a URI. Built once per load by [`parse`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum ResourceDescriptor {
    Network(NetworkResource),
    Filesystem(FileResource),
    Inline(InlineResource),
}

impl ResourceDescriptor {
    pub fn scheme(&self) -> Scheme {
        match self {
            ResourceDescriptor::Network(n) => n.scheme,
            ResourceDescriptor::Filesystem(_) => Scheme::File,
            ResourceDescriptor::Inline(_) => Scheme::Data,
        }
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.scheme().transport_kind()
    }

    /// Host for network resources.
    pub fn host(&self) -> Option<&str> {
        match self {
            ResourceDescriptor::Network(n) => Some(&n.host),
            _ => None,
        }
    }

    /// Port for network resources.
    pub fn port(&self) -> Option<u16> {
        match self {
            ResourceDescriptor::Network(n) => Some(n.port),
            _ => None,
        }
    }

    /// Request path, file path, or raw data payload depending on the variant.
    pub fn path(&self) -> &str {
        match self {
            ResourceDescriptor::Network(n) => &n.path,
            ResourceDescriptor::Filesystem(f) => &f.path,
            ResourceDescriptor::Inline(d) => &d.payload,
        }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceDescriptor::Network(n) => {
                write!(f, "{}://{}:{}{}", n.scheme, n.host, n.port, n.path)
            }
            ResourceDescriptor::Filesystem(file) => write!(f, "file://{}", file.path),
            ResourceDescriptor::Inline(d) => write!(f, "data:{}", d.payload),
        }
    }
}

/// Parse `uri` into a descriptor.
///
/// `data:` has no authority section, so its remainder is kept verbatim. The
/// other schemes require `://`, then take the host up to the first `/` and the
/// path from that `/` on (defaulting to `/`).
///
/// # Examples
///
/// - `parse("http://example.com")` → network, host `example.com`, port 80, path `/`
/// - `parse("data:text/plain,hi")` → inline, payload `text/plain,hi`
/// - `parse("ftp://host/x")` → `MalformedUriError` (unsupported scheme)
pub fn parse(uri: &str) -> Result<ResourceDescriptor, MalformedUriError> {
    let (scheme_name, rest) = uri
        .split_once(':')
        .ok_or_else(|| MalformedUriError::new(uri, MalformedUriReason::MissingScheme))?;
    if scheme_name.is_empty() {
        return Err(MalformedUriError::new(uri, MalformedUriReason::MissingScheme));
    }
    let scheme = Scheme::from_name(scheme_name)
        .ok_or_else(|| MalformedUriError::new(uri, MalformedUriReason::UnsupportedScheme))?;

    if scheme == Scheme::Data {
        return Ok(ResourceDescriptor::Inline(InlineResource {
            payload: rest.to_string(),
        }));
    }

    let authority_and_path = rest
        .strip_prefix("//")
        .ok_or_else(|| MalformedUriError::new(uri, MalformedUriReason::MissingAuthority))?;
    let (host, path) = match authority_and_path.find('/') {
        Some(i) => authority_and_path.split_at(i),
        None => (authority_and_path, ROOT_PATH),
    };

    match scheme.default_port() {
        Some(port) => {
            if host.is_empty() {
                return Err(MalformedUriError::new(uri, MalformedUriReason::EmptyHost));
            }
            Ok(ResourceDescriptor::Network(NetworkResource {
                scheme,
                host: host.to_string(),
                port,
                path: path.to_string(),
            }))
        }
        // file:// ignores the authority (usually empty or "localhost").
        None => Ok(ResourceDescriptor::Filesystem(FileResource {
            path: path.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_host_only_defaults_path() {
        let d = parse("http://example.com").unwrap();
        assert_eq!(d.scheme(), Scheme::Http);
        assert_eq!(d.transport_kind(), TransportKind::Network);
        assert_eq!(d.host(), Some("example.com"));
        assert_eq!(d.port(), Some(80));
        assert_eq!(d.path(), "/");
    }

    #[test]
    fn http_host_and_path() {
        let d = parse("http://example.com/a/b").unwrap();
        assert_eq!(d.host(), Some("example.com"));
        assert_eq!(d.path(), "/a/b");
    }

    #[test]
    fn https_uses_443_and_keeps_query() {
        let d = parse("https://example.org/index.html?q=1").unwrap();
        match &d {
            ResourceDescriptor::Network(n) => {
                assert!(n.is_tls());
                assert_eq!(n.port(), 443);
                assert_eq!(n.path(), "/index.html?q=1");
            }
            other => panic!("expected network descriptor, got {:?}", other),
        }
    }

    #[test]
    fn scheme_is_case_insensitive_and_normalized() {
        let d = parse("HTTPS://Example.com/").unwrap();
        assert_eq!(d.scheme(), Scheme::Https);
        assert_eq!(d.scheme().as_str(), "https");
        assert_eq!(d.host(), Some("Example.com"));
    }

    #[test]
    fn file_uri_is_filesystem() {
        let d = parse("file:///tmp/sample.txt").unwrap();
        assert_eq!(d.transport_kind(), TransportKind::Filesystem);
        assert_eq!(d.path(), "/tmp/sample.txt");
        assert_eq!(d.host(), None);
        assert_eq!(d.port(), None);
    }

    #[test]
    fn file_uri_with_localhost_authority() {
        let d = parse("file://localhost/etc/hosts").unwrap();
        assert_eq!(d.path(), "/etc/hosts");
        assert_eq!(d.host(), None);
    }

    #[test]
    fn data_uri_keeps_payload_verbatim() {
        let d = parse("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(d.transport_kind(), TransportKind::Inline);
        assert_eq!(d.path(), "text/plain;base64,aGVsbG8=");
        assert_eq!(d.host(), None);

        let d = parse("DATA:,").unwrap();
        assert_eq!(d.scheme(), Scheme::Data);
        assert_eq!(d.path(), ",");
    }

    #[test]
    fn unsupported_scheme_fails() {
        let e = parse("ftp://host/path").unwrap_err();
        assert_eq!(e.reason, MalformedUriReason::UnsupportedScheme);
        assert_eq!(e.uri, "ftp://host/path");
    }

    #[test]
    fn missing_scheme_fails() {
        assert_eq!(
            parse("example.com/index.html").unwrap_err().reason,
            MalformedUriReason::MissingScheme
        );
        assert_eq!(
            parse("://example.com").unwrap_err().reason,
            MalformedUriReason::MissingScheme
        );
    }

    #[test]
    fn network_scheme_needs_authority_and_host() {
        assert_eq!(
            parse("http:example.com").unwrap_err().reason,
            MalformedUriReason::MissingAuthority
        );
        assert_eq!(
            parse("http:///path").unwrap_err().reason,
            MalformedUriReason::EmptyHost
        );
        assert_eq!(
            parse("https://").unwrap_err().reason,
            MalformedUriReason::EmptyHost
        );
    }

    #[test]
    fn display_round_trips_to_a_readable_form() {
        assert_eq!(
            parse("http://example.com").unwrap().to_string(),
            "http://example.com:80/"
        );
        assert_eq!(parse("data:,x").unwrap().to_string(), "data:,x");
    }
}
