//! Request specification layer.
//!
//! Turns the tool's four textual inputs into an immutable [`Spec`]: the
//! `--body` and `--headers` flags share one informal grammar,
//! `{key1:value1,key2:value2}`, where the braces are optional, whitespace
//! around tokens is trimmed, and there is no escaping of `:` or `,` inside
//! values. Every comma-separated segment must split into exactly two
//! colon-separated tokens; anything else stops the run before any network
//! I/O happens.
//!
//! The body mapping is held key-sorted with duplicate keys replacing earlier
//! ones, so its JSON encoding is deterministic. The header list keeps input
//! order and lets duplicate names accumulate, since headers are added to the
//! outgoing request rather than set.

use crate::network::http::Method;
use heapless::{String, Vec};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub mod target;

/// Maximum number of key-value pairs per mapping.
pub const MAX_PAIRS: usize = 16;
/// Maximum length of a key in bytes.
pub const MAX_KEY_LEN: usize = 64;
/// Maximum length of a value in bytes.
pub const MAX_VALUE_LEN: usize = 256;
/// Maximum length of the URL in bytes.
pub const MAX_URL_LEN: usize = 512;
/// Maximum size of the JSON-encoded body.
pub const MAX_BODY_JSON_LEN: usize = 6144;
/// Maximum length of the literal text carried inside an error.
pub const MAX_DIAG_LEN: usize = 128;

/// A key in a body or header mapping.
pub type Key = String<MAX_KEY_LEN>;
/// A value in a body or header mapping.
pub type Value = String<MAX_VALUE_LEN>;
/// Literal input text carried inside an error, clipped to [`MAX_DIAG_LEN`].
pub type Diag = String<MAX_DIAG_LEN>;

/// One parsed key-value pair. Values are always strings; there is no
/// nesting and no type coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// The key, trimmed of surrounding whitespace.
    pub key: Key,
    /// The value, trimmed of surrounding whitespace.
    pub value: Value,
}

/// The ordered header list parsed from `--headers`. Duplicate names are kept.
pub type HeaderList = Vec<Pair, MAX_PAIRS>;

/// Why a request specification could not be built.
///
/// The `Display` output of each variant is the exact diagnostic line the
/// tool prints before stopping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A segment did not split into exactly two colon-separated tokens.
    /// Carries the segment's literal text.
    InvalidPair(Diag),
    /// The method was not GET, POST, PUT, or DELETE (case-insensitive).
    UnsupportedMethod(Diag),
    /// A mapping had more than [`MAX_PAIRS`] segments.
    TooManyPairs,
    /// A key or value exceeded its size bound. Carries the segment's text.
    PairTooLong(Diag),
    /// The URL was not a usable `http://host[:port]/path` address.
    InvalidUrl(Diag),
    /// The body mapping did not fit in the JSON buffer.
    EncodeError,
}

impl core::fmt::Display for SpecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SpecError::InvalidPair(segment) => write!(f, "Invalid key-value pair: {segment}"),
            SpecError::UnsupportedMethod(method) => {
                write!(f, "Unsupported HTTP method: {method}")
            }
            SpecError::TooManyPairs => {
                write!(f, "Too many key-value pairs (limit is {MAX_PAIRS})")
            }
            SpecError::PairTooLong(segment) => write!(f, "Key-value pair too long: {segment}"),
            SpecError::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            SpecError::EncodeError => write!(f, "Error encoding request body"),
        }
    }
}

/// Clip input text for inclusion in an error, keeping whole characters.
pub(crate) fn clip<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Parse a `{key1:value1,key2:value2}` string into pairs.
///
/// One leading `{` and one trailing `}` are stripped when present. The rest
/// is split on `,`, each segment is split on `:`, and both tokens are
/// trimmed. An empty input parses to an empty list without validation.
///
/// # Errors
///
/// [`SpecError::InvalidPair`] when a segment has anything other than exactly
/// one `:`, [`SpecError::PairTooLong`] / [`SpecError::TooManyPairs`] when a
/// size bound is exceeded.
pub fn parse_pairs(input: &str) -> Result<Vec<Pair, MAX_PAIRS>, SpecError> {
    let mut pairs = Vec::new();
    if input.is_empty() {
        return Ok(pairs);
    }

    let inner = input.strip_prefix('{').unwrap_or(input);
    let inner = inner.strip_suffix('}').unwrap_or(inner);

    for segment in inner.split(',') {
        let mut tokens = segment.split(':');
        let (Some(key), Some(value), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(SpecError::InvalidPair(clip(segment)));
        };
        let key = Key::try_from(key.trim()).map_err(|_| SpecError::PairTooLong(clip(segment)))?;
        let value =
            Value::try_from(value.trim()).map_err(|_| SpecError::PairTooLong(clip(segment)))?;
        pairs
            .push(Pair { key, value })
            .map_err(|_| SpecError::TooManyPairs)?;
    }

    Ok(pairs)
}

/// The flat string-to-string body mapping.
///
/// Entries are kept sorted by key and duplicate keys replace earlier ones,
/// so [`BodyMap::to_json`] always produces the same compact object for the
/// same mapping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BodyMap {
    entries: Vec<Pair, MAX_PAIRS>,
}

impl BodyMap {
    /// Build a mapping from parsed pairs. Later duplicates win.
    pub fn from_pairs(pairs: &[Pair]) -> Self {
        let mut map = BodyMap {
            entries: Vec::new(),
        };
        for pair in pairs {
            map.insert(pair.clone());
        }
        map
    }

    fn insert(&mut self, pair: Pair) {
        match self
            .entries
            .binary_search_by(|entry| entry.key.as_str().cmp(pair.key.as_str()))
        {
            Ok(i) => self.entries[i].value = pair.value,
            // Capacity matches the parsed pair list, so the insert cannot fail.
            Err(i) => {
                self.entries.insert(i, pair).ok();
            }
        }
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|entry| entry.key.as_str().cmp(key))
            .ok()
            .map(|i| self.entries[i].value.as_str())
    }

    /// Serialize the mapping to a compact JSON object.
    pub fn to_json(&self) -> Result<Vec<u8, MAX_BODY_JSON_LEN>, SpecError> {
        let mut buf = [0u8; MAX_BODY_JSON_LEN];
        let len = serde_json_core::to_slice(self, &mut buf).map_err(|_| SpecError::EncodeError)?;
        Vec::from_slice(&buf[..len]).map_err(|_| SpecError::EncodeError)
    }
}

impl Serialize for BodyMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for pair in &self.entries {
            map.serialize_entry(pair.key.as_str(), pair.value.as_str())?;
        }
        map.end()
    }
}

/// The immutable request specification, constructed once per invocation.
#[derive(Debug)]
pub struct Spec {
    /// The target URL, verbatim.
    pub url: String<MAX_URL_LEN>,
    /// The dispatched method.
    pub method: Method,
    /// The parsed body mapping. Always parsed and validated, even for
    /// methods that never attach it.
    pub body: BodyMap,
    /// The parsed header list, in input order.
    pub headers: HeaderList,
}

impl Spec {
    /// Build a specification from the four textual inputs.
    ///
    /// The body is parsed first, then the method is dispatched, then the
    /// headers are parsed; the first failure wins. No network I/O happens
    /// here.
    pub fn build(url: &str, method: &str, body: &str, headers: &str) -> Result<Self, SpecError> {
        let body_pairs = parse_pairs(body)?;
        let method =
            Method::parse(method).ok_or_else(|| SpecError::UnsupportedMethod(clip(method)))?;
        let headers = parse_pairs(headers)?;
        let url = String::try_from(url).map_err(|_| SpecError::InvalidUrl(clip(url)))?;

        Ok(Spec {
            url,
            method,
            body: BodyMap::from_pairs(&body_pairs),
            headers,
        })
    }
}
