//! `http`/`https` strategy: one GET over a fresh connection, body read to EOF.

use super::connector::Connector;
use super::response;
use crate::error::FetchError;
use crate::uri::NetworkResource;
use std::io::{BufReader, Write};

/// Build the request text. Caller headers follow `Host` and `Connection`
/// verbatim, in order, with no validation or deduplication.
pub(crate) fn build_request(target: &NetworkResource, extra_headers: &[String]) -> String {
    let mut request = format!("GET {} HTTP/1.1\r\n", target.path());
    request.push_str(&format!("Host: {}\r\n", target.host()));
    request.push_str("Connection: close\r\n");
    for header in extra_headers {
        request.push_str(header);
        request.push_str("\r\n");
    }
    request.push_str("\r\n");
    request
}

pub(crate) fn fetch_network<C: Connector + ?Sized>(
    connector: &C,
    target: &NetworkResource,
    extra_headers: &[String],
) -> Result<String, FetchError> {
    // Dropping the stream closes it, whichever way this function returns.
    let mut stream = connector.connect(target)?;

    let request = build_request(target, extra_headers);
    stream
        .write_all(request.as_bytes())
        .and_then(|_| stream.flush())
        .map_err(|e| FetchError::from_io("send request", &e))?;
    tracing::debug!("sent GET {} to {}", target.path(), target.host());

    let mut reader = BufReader::new(stream);
    let head = response::read_head(&mut reader)?;
    tracing::debug!(
        "{} {} {} ({} headers)",
        head.status.version,
        head.status.status_code,
        head.status.reason,
        head.headers.len()
    );
    if !(200..300).contains(&head.status.status_code) {
        tracing::warn!(
            "{} answered {} {}; returning body anyway",
            target.host(),
            head.status.status_code,
            head.status.reason
        );
    }
    head.ensure_identity_encoding()?;

    response::read_body(&mut reader)
}
