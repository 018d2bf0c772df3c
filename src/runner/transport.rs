//! `TcpStream`-backed implementation of the connection traits.
//!
//! This is the default-configured transport: no custom timeout, no proxy,
//! no TLS. It maps `std::io` errors onto the portable network error enum.

use crate::network::error::Error;
use crate::network::{Close, Connect, Connection, Read, Write};
use std::io::{ErrorKind, Read as StdRead, Write as StdWrite};
use std::net::{Shutdown, TcpStream};

/// A plain TCP connection.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

/// Connector for plain TCP, taking `host:port` remotes.
#[derive(Debug, Clone, Copy)]
pub struct TcpTransport;

impl Connect for TcpTransport {
    type Connection = TcpConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let stream = TcpStream::connect(remote).map_err(|e| match e.kind() {
            ErrorKind::ConnectionRefused => Error::ConnectionRefused,
            ErrorKind::TimedOut => Error::Timeout,
            _ => Error::InvalidAddress,
        })?;
        Ok(TcpConnection { stream })
    }
}

impl Read for TcpConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| {
            if e.kind() == ErrorKind::WouldBlock {
                Error::Timeout
            } else {
                Error::ReadError
            }
        })
    }
}

impl Write for TcpConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|_| Error::WriteError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        // Dropping the stream releases the socket even if shutdown is refused.
        let _ = self.stream.shutdown(Shutdown::Both);
        Ok(())
    }
}

impl Connection for TcpConnection {}
