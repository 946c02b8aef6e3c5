//! Resource loading: parse a URI, then fetch its body as text over http,
//! https, the local filesystem, or an inline `data:` payload.

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod retry;
pub mod uri;

pub use error::{FetchError, FetchErrorKind, MalformedUriError, MalformedUriReason};
pub use fetch::{fetch, FetchOptions, Fetcher};
pub use uri::{parse, ResourceDescriptor, Scheme, TransportKind};
