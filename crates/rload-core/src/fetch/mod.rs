//! Fetch dispatcher: one strategy per transport, selected by an exhaustive match.
//!
//! Every fetch is a single blocking call. Network fetches open a fresh
//! connection, send one `GET`, read to EOF and close; nothing is cached or
//! reused between calls.

mod connector;
mod data;
mod file;
mod network;
mod response;

pub use connector::{Connector, Stream, TcpConnector};
pub use data::{DataPayload, DEFAULT_MEDIA_TYPE};

use crate::error::FetchError;
use crate::uri::ResourceDescriptor;
use std::time::Duration;

/// Socket deadlines. `None` leaves the operating system default (no deadline).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    /// Applied to every read and write on the connection.
    pub read_timeout: Option<Duration>,
}

/// Fetches descriptors through a [`Connector`].
#[derive(Debug, Clone, Default)]
pub struct Fetcher<C = TcpConnector> {
    connector: C,
}

impl Fetcher<TcpConnector> {
    pub fn new(options: FetchOptions) -> Self {
        Self {
            connector: TcpConnector::new(options),
        }
    }
}

impl<C: Connector> Fetcher<C> {
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    /// Retrieve the resource and return its body as text.
    ///
    /// `extra_headers` are only used by network resources; each is a complete
    /// `Name: value` line sent after `Host` and `Connection`.
    pub fn fetch(
        &self,
        descriptor: &ResourceDescriptor,
        extra_headers: &[String],
    ) -> Result<String, FetchError> {
        tracing::debug!("fetching {} via {:?}", descriptor, descriptor.transport_kind());
        match descriptor {
            ResourceDescriptor::Network(target) => {
                network::fetch_network(&self.connector, target, extra_headers)
            }
            ResourceDescriptor::Filesystem(file) => file::fetch_file(file),
            ResourceDescriptor::Inline(inline) => data::fetch_inline(inline.payload()),
        }
    }
}

/// Fetch with real sockets and no deadlines.
pub fn fetch(descriptor: &ResourceDescriptor, extra_headers: &[String]) -> Result<String, FetchError> {
    Fetcher::new(FetchOptions::default()).fetch(descriptor, extra_headers)
}
