//! HTTP/1.1 protocol implementation.
//!
//! A lightweight HTTP client that focuses on simplicity and predictable
//! memory usage: the request is serialized into a fixed-size buffer, the
//! response is read with a fixed-size buffer, and the body is bounded by
//! [`client::MAX_RESPONSE_BODY_LEN`].
//!
//! # Features
//!
//! - HTTP/1.1 request line, headers, and `Content-Length` framed bodies
//! - Synchronous request/response model
//! - GET, POST, PUT, and DELETE method support
//! - Duplicate headers are sent in the order they were added
//!
//! # Usage
//!
//! The main entry point is the [`client::Client`] which works with any
//! connection type implementing the [`crate::network::Connection`] trait.
//!
//! ```rust,no_run
//! use httpfetch::network::http::{Client, Method, Request};
//! # use httpfetch::network::Connection;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl httpfetch::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl httpfetch::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> { Ok(0) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl httpfetch::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let connection = MockConnection;
//! let mut client = Client::new(connection);
//!
//! let request = Request {
//!     method: Method::Get,
//!     path: "/api/status",
//!     headers: heapless::Vec::new(),
//!     body: None,
//! };
//!
//! // let response = client.request(&request)?;
//! ```

/// HTTP client implementation and supporting types.
pub mod client;

pub use client::{Client, Header, Method, Request, Response};
