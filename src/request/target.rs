//! Minimal URL splitting for the transport layer.
//!
//! Only plain `http://` URLs are understood; TLS is out of scope for this
//! tool, so any other scheme is rejected when the request is built.

use super::{SpecError, Value, clip};
use core::fmt::Write;
use heapless::String;

/// Maximum length of a host name in bytes.
pub const MAX_HOST_LEN: usize = 128;
/// Maximum length of a path (including query) in bytes.
pub const MAX_PATH_LEN: usize = 384;
/// Maximum length of a `host:port` remote: a full-length host, a colon,
/// and up to five port digits.
pub const MAX_REMOTE_LEN: usize = MAX_HOST_LEN + 6;

/// Where a request goes on the wire: host, port, and origin-form path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host name or address literal.
    pub host: String<MAX_HOST_LEN>,
    /// TCP port, defaulting to 80.
    pub port: u16,
    /// Path plus query, always starting with `/`.
    pub path: String<MAX_PATH_LEN>,
}

impl Target {
    /// Split an `http://host[:port]/path?query` URL.
    ///
    /// # Errors
    ///
    /// [`SpecError::InvalidUrl`] for a non-`http` scheme, an empty host, an
    /// unparsable port, or a component exceeding its size bound.
    pub fn parse(url: &str) -> Result<Self, SpecError> {
        let invalid = || SpecError::InvalidUrl(clip(url));

        let rest = url.strip_prefix("http://").ok_or_else(invalid)?;

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };
        if authority.is_empty() {
            return Err(invalid());
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
            None => (authority, 80),
        };
        if host.is_empty() {
            return Err(invalid());
        }

        Ok(Target {
            host: String::try_from(host).map_err(|_| invalid())?,
            port,
            path: String::try_from(path).map_err(|_| invalid())?,
        })
    }

    /// The `host:port` address the transport connects to.
    pub fn remote(&self) -> String<MAX_REMOTE_LEN> {
        let mut remote = String::new();
        // Sized so a full-length host plus any port fits.
        write!(remote, "{}:{}", self.host, self.port).ok();
        remote
    }

    /// The value of the `Host` header: the port is omitted when it is 80.
    pub fn host_header(&self) -> Value {
        let mut value = Value::new();
        if self.port == 80 {
            value.push_str(&self.host).ok();
        } else {
            write!(value, "{}:{}", self.host, self.port).ok();
        }
        value
    }
}
