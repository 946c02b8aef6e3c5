//! `data` strategy: `[<mediatype>][;base64],<data>` decoded to text.
//!
//! Only text/plain and text/html are surfaced. Non-base64 data is returned
//! exactly as written; percent-escapes are not decoded.

use crate::error::{FetchError, FetchErrorKind};
use base64::Engine;

/// Media type assumed when the URI leaves it out.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain;charset=US-ASCII";

const BASE64_MARKER: &str = ";base64";

/// Media type prefixes that may be returned as text. Parameters after the prefix are allowed.
const TEXT_MEDIA_PREFIXES: [&str; 2] = ["text/plain", "text/html"];

/// A `data:` payload split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPayload {
    pub media_type: String,
    pub is_base64: bool,
    pub raw_data: String,
}

impl DataPayload {
    /// Split at the first comma. Without a comma the whole payload is the media spec.
    pub fn parse(payload: &str) -> Self {
        let (media_spec, raw_data) = payload.split_once(',').unwrap_or((payload, ""));
        let (media_spec, is_base64) = match media_spec.strip_suffix(BASE64_MARKER) {
            Some(stripped) => (stripped, true),
            None => (media_spec, false),
        };
        let media_type = if media_spec.is_empty() {
            DEFAULT_MEDIA_TYPE
        } else {
            media_spec
        };
        Self {
            media_type: media_type.to_string(),
            is_base64,
            raw_data: raw_data.to_string(),
        }
    }

    pub fn is_text(&self) -> bool {
        TEXT_MEDIA_PREFIXES
            .iter()
            .any(|prefix| self.media_type.starts_with(prefix))
    }

    /// Text content of the payload.
    pub fn decode(&self) -> Result<String, FetchError> {
        if !self.is_text() {
            return Err(FetchError::new(
                FetchErrorKind::UnsupportedMediaType,
                self.media_type.clone(),
            ));
        }
        if !self.is_base64 {
            return Ok(self.raw_data.clone());
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&self.raw_data)
            .map_err(|e| {
                FetchError::new(FetchErrorKind::MalformedData, format!("invalid base64: {}", e))
            })?;
        String::from_utf8(bytes).map_err(|_| {
            FetchError::new(
                FetchErrorKind::MalformedData,
                "base64 payload is not valid UTF-8",
            )
        })
    }
}

pub(crate) fn fetch_inline(payload: &str) -> Result<String, FetchError> {
    let data = DataPayload::parse(payload);
    tracing::debug!(
        "data payload: {} (base64: {}, {} bytes)",
        data.media_type,
        data.is_base64,
        data.raw_data.len()
    );
    data.decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let p = DataPayload::parse("text/plain,hello%20world");
        assert_eq!(p.media_type, "text/plain");
        assert!(!p.is_base64);
        assert_eq!(p.raw_data, "hello%20world");
    }

    #[test]
    fn parse_base64_strips_marker() {
        let p = DataPayload::parse("text/html;charset=utf-8;base64,PGI+aGk8L2I+");
        assert_eq!(p.media_type, "text/html;charset=utf-8");
        assert!(p.is_base64);
        assert_eq!(p.raw_data, "PGI+aGk8L2I+");
    }

    #[test]
    fn parse_defaults_media_type() {
        let p = DataPayload::parse(",x");
        assert_eq!(p.media_type, DEFAULT_MEDIA_TYPE);
        assert_eq!(p.raw_data, "x");

        let p = DataPayload::parse(";base64,aGk=");
        assert_eq!(p.media_type, DEFAULT_MEDIA_TYPE);
        assert!(p.is_base64);
    }

    #[test]
    fn parse_without_comma() {
        let p = DataPayload::parse("text/plain");
        assert_eq!(p.media_type, "text/plain");
        assert_eq!(p.raw_data, "");
    }

    #[test]
    fn parse_splits_on_first_comma_only() {
        let p = DataPayload::parse("text/plain,a,b,c");
        assert_eq!(p.raw_data, "a,b,c");
    }

    #[test]
    fn percent_escapes_are_not_decoded() {
        assert_eq!(fetch_inline("text/plain,hello%20world").unwrap(), "hello%20world");
    }

    #[test]
    fn base64_text_is_decoded() {
        assert_eq!(fetch_inline("text/plain;base64,aGVsbG8=").unwrap(), "hello");
        assert_eq!(fetch_inline("text/html;base64,PGI+aGk8L2I+").unwrap(), "<b>hi</b>");
    }

    #[test]
    fn empty_data_is_valid() {
        assert_eq!(fetch_inline("text/plain,").unwrap(), "");
        assert_eq!(fetch_inline("").unwrap(), "");
    }

    #[test]
    fn permissive_text_prefix_match() {
        assert_eq!(fetch_inline("text/plain;weird=1,ok").unwrap(), "ok");
    }

    #[test]
    fn binary_media_type_is_unsupported() {
        let e = fetch_inline("image/png;base64,AAAA").unwrap_err();
        assert_eq!(e.kind, FetchErrorKind::UnsupportedMediaType);
        assert_eq!(e.detail, "image/png");
    }

    #[test]
    fn bad_base64_is_malformed_data() {
        let e = fetch_inline("text/plain;base64,@@@").unwrap_err();
        assert_eq!(e.kind, FetchErrorKind::MalformedData);
        // 0xff 0xfe is not UTF-8.
        let e = fetch_inline("text/plain;base64,//4=").unwrap_err();
        assert_eq!(e.kind, FetchErrorKind::MalformedData);
    }
}
