//! Transport for the network strategy: TCP connect, optional TLS, scoped close.
//!
//! The fetch layer only sees a [`Connector`], so tests can hand it in-memory
//! streams instead of sockets.

use crate::error::{FetchError, FetchErrorKind};
use crate::fetch::FetchOptions;
use crate::uri::NetworkResource;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

/// A byte stream the request is written to and the response is read from.
pub trait Stream: Read + Write {}

impl<T: Read + Write> Stream for T {}

/// Opens a ready-to-use stream (TLS already negotiated for `https`) to a network resource.
///
/// The returned stream is dropped by the caller on every exit path; dropping it
/// must release the underlying connection.
pub trait Connector {
    fn connect(&self, target: &NetworkResource) -> Result<Box<dyn Stream>, FetchError>;
}

/// Real sockets: DNS lookup, TCP connect, and native-tls with the system trust store.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    options: FetchOptions,
    /// Host name -> address used instead of DNS (like curl's `--resolve`).
    overrides: Vec<(String, SocketAddr)>,
}

impl TcpConnector {
    pub fn new(options: FetchOptions) -> Self {
        Self {
            options,
            overrides: Vec::new(),
        }
    }

    /// Connect to `addr` whenever a resource names `host`, skipping DNS.
    /// The `Host` header and TLS server name still use `host`.
    pub fn resolve_override(mut self, host: impl Into<String>, addr: SocketAddr) -> Self {
        self.overrides.push((host.into(), addr));
        self
    }

    fn resolve(&self, host: &str, port: u16) -> Result<Vec<SocketAddr>, FetchError> {
        if let Some((_, addr)) = self
            .overrides
            .iter()
            .find(|(h, _)| h.eq_ignore_ascii_case(host))
        {
            tracing::debug!("{} resolved by override to {}", host, addr);
            return Ok(vec![*addr]);
        }
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| {
                FetchError::new(FetchErrorKind::DnsFailure, format!("resolve {}: {}", host, e))
            })?
            .collect();
        if addrs.is_empty() {
            return Err(FetchError::new(
                FetchErrorKind::DnsFailure,
                format!("resolve {}: no addresses", host),
            ));
        }
        Ok(addrs)
    }

    fn connect_tcp(&self, host: &str, port: u16) -> Result<TcpStream, FetchError> {
        let addrs = self.resolve(host, port)?;
        let mut last_err: Option<io::Error> = None;
        for addr in &addrs {
            let attempt = match self.options.connect_timeout {
                Some(t) => TcpStream::connect_timeout(addr, t),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    tracing::debug!("connected to {} ({})", host, addr);
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!("connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }
        let err = last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::ConnectionRefused));
        Err(FetchError::from_io(&format!("connect {}:{}", host, port), &err))
    }
}

impl Connector for TcpConnector {
    fn connect(&self, target: &NetworkResource) -> Result<Box<dyn Stream>, FetchError> {
        let tcp = self.connect_tcp(target.host(), target.port())?;
        tcp.set_read_timeout(self.options.read_timeout)
            .and_then(|_| tcp.set_write_timeout(self.options.read_timeout))
            .map_err(|e| FetchError::from_io("configure socket", &e))?;

        if !target.is_tls() {
            return Ok(Box::new(Connection::Plain(tcp)));
        }

        let tls = native_tls::TlsConnector::new()
            .map_err(|e| FetchError::new(FetchErrorKind::TlsFailure, format!("TLS setup: {}", e)))?;
        let stream = tls.connect(target.host(), tcp).map_err(|e| {
            FetchError::new(
                FetchErrorKind::TlsFailure,
                format!("TLS handshake with {}: {}", target.host(), e),
            )
        })?;
        tracing::debug!("TLS established with {}", target.host());
        Ok(Box::new(Connection::Tls(Box::new(stream))))
    }
}

/// One request's connection. Closed when dropped.
enum Connection {
    Plain(TcpStream),
    Tls(Box<native_tls::TlsStream<TcpStream>>),
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Connection::Plain(s) => s.read(buf),
            Connection::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Connection::Plain(s) => s.write(buf),
            Connection::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Connection::Plain(s) => s.flush(),
            Connection::Tls(s) => s.flush(),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Errors are irrelevant here: the peer may already have closed.
        let tcp = match self {
            Connection::Plain(s) => &*s,
            Connection::Tls(s) => {
                let _ = s.shutdown();
                s.get_ref()
            }
        };
        let _ = tcp.shutdown(Shutdown::Both);
        tracing::trace!("connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uri::{self, ResourceDescriptor};
    use std::net::TcpListener;

    fn network(uri: &str) -> NetworkResource {
        match uri::parse(uri).unwrap() {
            ResourceDescriptor::Network(n) => n,
            other => panic!("expected network descriptor, got {:?}", other),
        }
    }

    #[test]
    fn refused_port_maps_to_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let port = {
            let l = TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let target = network("http://refused.test/");
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let err = TcpConnector::default()
            .resolve_override("refused.test", addr)
            .connect(&target)
            .err()
            .unwrap();
        assert_eq!(err.kind, FetchErrorKind::ConnectionRefused);
    }

    #[test]
    fn override_is_used_for_plain_http() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let target = network("http://Override.Test/x");
        let stream = TcpConnector::default()
            .resolve_override("override.test", addr)
            .connect(&target);
        assert!(stream.is_ok());
        assert!(listener.accept().is_ok());
    }

    #[test]
    fn unresolvable_host_maps_to_dns_failure() {
        let target = network("http://does-not-exist.invalid/");
        let err = TcpConnector::default().connect(&target).err().unwrap();
        assert_eq!(err.kind, FetchErrorKind::DnsFailure);
    }
}
