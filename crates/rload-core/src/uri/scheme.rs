//! Supported URI schemes and the transport each one maps to.

use serde::Serialize;
use std::fmt;

/// One of the four schemes the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    File,
    Data,
}

/// Fetch strategy category. Always derived from a `Scheme`, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Network,
    Filesystem,
    Inline,
}

impl Scheme {
    /// Case-insensitive lookup. Returns `None` for anything unsupported (e.g. `ftp`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            "file" => Some(Scheme::File),
            "data" => Some(Scheme::Data),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::File => "file",
            Scheme::Data => "data",
        }
    }

    pub fn transport_kind(&self) -> TransportKind {
        match self {
            Scheme::Http | Scheme::Https => TransportKind::Network,
            Scheme::File => TransportKind::Filesystem,
            Scheme::Data => TransportKind::Inline,
        }
    }

    /// Well-known port for network schemes; `None` for file and data.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Scheme::Http => Some(80),
            Scheme::Https => Some(443),
            Scheme::File | Scheme::Data => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
