//! One-shot message exchange with the polydown server.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::PdcError;

/// Something that can deliver a wire message and return the reply.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Send `message` and return the reply, one entry per line.
    ///
    /// # Errors
    ///
    /// Returns [`PdcError::ConnectionRefused`] if no server is listening, or
    /// [`PdcError::Io`] for any other socket failure.
    fn exchange(&self, message: &str) -> Result<Vec<String>, PdcError>;
}

/// TCP transport: connect, send, read the reply, close.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpTransport {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    fn connect(&self) -> Result<TcpStream, PdcError> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port).to_socket_addrs()?.collect();

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "connection attempt failed");
                    last_err = Some(e);
                },
            }
        }

        Err(match last_err {
            Some(e) if e.kind() == ErrorKind::ConnectionRefused => {
                PdcError::ConnectionRefused(format!("{}:{}", self.host, self.port))
            },
            Some(e) => PdcError::Io(e),
            None => PdcError::ConnectionRefused(format!(
                "{}:{} did not resolve",
                self.host, self.port
            )),
        })
    }
}

impl Transport for TcpTransport {
    fn exchange(&self, message: &str) -> Result<Vec<String>, PdcError> {
        let mut stream = self.connect()?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        tracing::debug!(host = %self.host, port = self.port, wire = message, "sending");
        stream.write_all(message.as_bytes())?;
        stream.flush()?;
        // The server may hold the connection open; the half-close lets it see
        // the end of the request.
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            tracing::debug!(error = %e, "half-close failed");
        }

        let mut reply = Vec::new();
        let mut buf = [0_u8; 1024];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => reply.extend_from_slice(&buf[..n]),
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    tracing::debug!("read timed out, treating reply as complete");
                    break;
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => return Err(e.into()),
            }
        }

        Ok(decode_reply(&String::from_utf8_lossy(&reply)))
    }
}

/// Split a server reply into lines.
///
/// The server escapes line breaks as a literal backslash followed by `n`.
#[must_use]
pub fn decode_reply(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.replace("\\n", "\n")
        .trim_end_matches('\n')
        .lines()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    #[test]
    fn test_decode_reply() {
        assert!(decode_reply("").is_empty());
        assert_eq!(decode_reply("ok"), vec!["ok"]);
        assert_eq!(
            decode_reply("0: timer 5s\\n1: alarm 17:00\\n"),
            vec!["0: timer 5s", "1: alarm 17:00"]
        );
    }

    #[test]
    fn test_exchange_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut received = String::new();
            socket.read_to_string(&mut received).unwrap();
            socket.write_all(b"index 0\\npid 1234").unwrap();
            received
        });

        let transport = TcpTransport::new("127.0.0.1", port, Duration::from_secs(2));
        let reply = transport.exchange("0 0 5").unwrap();

        assert_eq!(server.join().unwrap(), "0 0 5");
        assert_eq!(reply, vec!["index 0", "pid 1234"]);
    }

    #[test]
    fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let transport = TcpTransport::new("127.0.0.1", port, Duration::from_millis(500));
        let err = transport.exchange("1").unwrap_err();
        assert!(matches!(err, PdcError::ConnectionRefused(_)), "{err:?}");
    }
}
