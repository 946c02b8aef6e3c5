//! Classify fetch errors into retry policy error kinds.

use crate::error::{FetchError, FetchErrorKind};
use crate::retry::policy::ErrorKind;

pub fn classify(e: &FetchError) -> ErrorKind {
    match e.kind {
        FetchErrorKind::Timeout => ErrorKind::Timeout,
        FetchErrorKind::ConnectionRefused | FetchErrorKind::DnsFailure => ErrorKind::Connection,
        FetchErrorKind::TlsFailure
        | FetchErrorKind::UnsupportedEncoding
        | FetchErrorKind::MalformedResponse
        | FetchErrorKind::IoFailure
        | FetchErrorKind::UnsupportedMediaType
        | FetchErrorKind::MalformedData => ErrorKind::Other,
    }
}
