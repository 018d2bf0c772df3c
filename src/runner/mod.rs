//! The sequential request runner.
//!
//! One invocation is one linear pass: echo the inputs, parse and validate
//! them, build the request, send it, print the response body line by line,
//! and release the connection. There are no retries and no branching back;
//! the first failure prints a diagnostic line and ends the run.
//!
//! All output, diagnostics included, goes to the writer handed to [`run`].
//! Failures are reported only as printed text; callers are expected to exit
//! successfully either way.

pub mod transport;

use crate::network::Connect;
use crate::network::error::Error as NetError;
use crate::network::http::client::MAX_HEADERS;
use crate::network::http::{Client, Header, Request};
use crate::request::Spec;
use crate::request::target::Target;
use heapless::Vec;
use std::io::{self, Write};

/// The four textual inputs, exactly as given on the command line.
#[derive(Debug, Clone)]
pub struct Options {
    /// Target URL.
    pub url: String,
    /// HTTP method name, matched case-insensitively.
    pub method: String,
    /// Body mapping in `{key1:value1,key2:value2}` form, or empty.
    pub body: String,
    /// Header mapping in the same form, or empty.
    pub headers: String,
}

/// Run one request and write everything the tool prints to `out`.
///
/// The only `Err` this returns is a failure to write to `out` itself; every
/// domain failure is reported as a printed diagnostic followed by a normal
/// return.
pub fn run<W: Write>(options: &Options, out: &mut W) -> io::Result<()> {
    writeln!(out, "URL: {}", options.url)?;
    writeln!(out, "Method: {}", options.method)?;
    writeln!(out, "Body: {}", options.body)?;
    writeln!(out, "Headers: {}", options.headers)?;

    // Parse and validate. Nothing touches the network before this succeeds.
    let spec = match Spec::build(&options.url, &options.method, &options.body, &options.headers) {
        Ok(spec) => spec,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
    };

    // GET and DELETE validate the body above but never attach it.
    let payload = if spec.method.allows_body() && !spec.body.is_empty() {
        match spec.body.to_json() {
            Ok(json) => Some(json),
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(());
            }
        }
    } else {
        None
    };

    let target = match Target::parse(&spec.url) {
        Ok(target) => target,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
    };

    // Host first, then the parsed headers in input order. Duplicate names
    // accumulate rather than overwrite.
    let mut headers: Vec<Header, MAX_HEADERS> = Vec::new();
    let host = Header {
        name: heapless::String::try_from("Host").unwrap_or_default(),
        value: target.host_header(),
    };
    headers.push(host).ok();
    for pair in &spec.headers {
        let header = Header {
            name: pair.key.clone(),
            value: pair.value.clone(),
        };
        headers.push(header).ok();
    }

    let request = Request {
        method: spec.method,
        path: target.path.as_str(),
        headers,
        body: payload.as_deref(),
    };

    let connection = match transport::TcpTransport.connect(&target.remote()) {
        Ok(connection) => connection,
        Err(err) => {
            writeln!(out, "Error sending request: {err}")?;
            return Ok(());
        }
    };

    let mut client = Client::new(connection);
    let result = client.request(&request);
    // The connection is released whatever the outcome was.
    let _ = client.close();

    match result {
        Ok(response) => {
            writeln!(out, "Response Body:")?;
            for line in String::from_utf8_lossy(&response.body).lines() {
                writeln!(out, "{line}")?;
            }
        }
        Err(err) => match err {
            NetError::WriteError | NetError::ConnectionRefused | NetError::InvalidAddress => {
                writeln!(out, "Error sending request: {err}")?;
            }
            _ => {
                writeln!(out, "Error reading response: {err}")?;
            }
        },
    }

    Ok(())
}
