//! # httpfetch - command-line HTTP request runner
//!
//! A small utility that builds one HTTP request from four textual inputs
//! (URL, method, body, headers), sends it over a plain TCP connection, and
//! prints the response body to standard output line by line.
//!
//! The crate is split into a transport-agnostic core and a thin `std` layer:
//!
//! - [`network`] defines synchronous connection traits and a lightweight
//!   HTTP/1.1 client that works over anything implementing
//!   [`network::Connection`], with fixed-size buffers throughout.
//! - [`request`] parses the informal `{key1:value1,key2:value2}` grammar used
//!   by the `--body` and `--headers` flags into a request specification, and
//!   JSON-encodes the body mapping.
//! - [`runner`] (behind the `std` feature, enabled by default) wires the two
//!   together: a `TcpStream`-backed connection, the linear
//!   parse/build/send/print flow, and the diagnostics the tool prints when a
//!   step fails.
//!
//! ## Usage
//!
//! ```text
//! httpfetch --url http://httpbin.org/post --method POST --body "{name:neo}"
//! ```
//!
//! The tool echoes its inputs, prints `Response Body:`, then the raw response
//! lines. Every failure is reported as a printed diagnostic; the process exit
//! status does not distinguish success from failure.
//!
//! ## Library example
//!
//! ```rust
//! use httpfetch::request::Spec;
//!
//! let spec = Spec::build(
//!     "http://example.test/echo",
//!     "post",
//!     "{name:neo}",
//!     "{X-Test:1}",
//! )
//! .unwrap();
//!
//! assert_eq!(spec.body.get("name"), Some("neo"));
//! ```
//!
//! ## Optional Features
//!
//! - `std`: enable the runner, TCP transport, and CLI surface (default)
//! - `defmt`: enable defmt formatting of network errors for embedded use

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Connection traits and the HTTP/1.1 wire client.
///
/// Everything in this module is transport-agnostic: the client talks to any
/// type implementing [`network::Connection`](crate::network::Connection).
pub mod network;

/// Request specification layer: pair grammar, body mapping, URL splitting.
pub mod request;

/// The sequential request runner and its TCP transport (std only).
#[cfg(feature = "std")]
pub mod runner;
