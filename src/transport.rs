// ABOUTME: Provides the transport seam between the client and a router
// ABOUTME: Implements per-call TCP connections with a bounded request deadline

use bytes::{Bytes, BytesMut};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, trace, warn};

use crate::codec::TERMINATOR;

/// TCP port routers listen on for this protocol.
pub const DEFAULT_PORT: u16 = 50000;

/// Deadline applied to a whole transport call when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One-shot frame exchange with a router.
///
/// Every call owns its connection for the duration of that call only:
/// connect, send, optionally receive, release. Implementations never pool or
/// reuse sockets, which keeps concurrent calls independent. Both operations
/// are fallible and callers must not assume a send was applied by the router.
pub trait Transport {
    /// Sends one request frame and reads bytes until the reply terminator
    /// arrives, returning everything read.
    async fn request(&self, frame: &str) -> io::Result<Bytes>;

    /// Sends one frame and returns without reading anything.
    async fn send(&self, frame: &str) -> io::Result<()>;
}

/// [`Transport`] over TCP.
///
/// `request` runs connect + write + read-to-terminator under one deadline and
/// maps expiry to [`io::ErrorKind::TimedOut`]. `send` runs connect + write
/// under the same deadline; it has no read phase, so a quiet router cannot
/// stall it.
///
/// # Example
///
/// ```no_run
/// use helvarnet::transport::{TcpTransport, DEFAULT_PORT};
/// use std::net::{Ipv4Addr, SocketAddr};
/// use std::time::Duration;
///
/// let addr = SocketAddr::from((Ipv4Addr::new(10, 254, 1, 2), DEFAULT_PORT));
/// let transport = TcpTransport::new(addr).with_timeout(Duration::from_secs(2));
/// # let _ = transport;
/// ```
#[derive(Debug, Clone)]
pub struct TcpTransport {
    addr: SocketAddr,
    timeout: Duration,
}

impl TcpTransport {
    pub fn new(addr: SocketAddr) -> Self {
        TcpTransport {
            addr,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The router endpoint this transport dials.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn connect(&self) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(self.addr).await?;
        if let Err(error) = stream.set_nodelay(true) {
            warn!(addr = %self.addr, %error, "failed to set TCP_NODELAY");
        }
        Ok(stream)
    }

    async fn under_deadline<F, T>(&self, operation: F) -> io::Result<T>
    where
        F: Future<Output = io::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no response from {} within {:?}", self.addr, self.timeout),
            )),
        }
    }
}

impl Transport for TcpTransport {
    async fn request(&self, frame: &str) -> io::Result<Bytes> {
        debug!(addr = %self.addr, frame = %frame, "sending request");
        self.under_deadline(async {
            let mut stream = self.connect().await?;
            stream.write_all(frame.as_bytes()).await?;
            stream.flush().await?;

            let mut buffer = BytesMut::with_capacity(1024);
            loop {
                if buffer.contains(&(TERMINATOR as u8)) {
                    break;
                }
                let n = stream.read_buf(&mut buffer).await?;
                if n == 0 {
                    if buffer.is_empty() {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "connection closed before any reply byte",
                        ));
                    }
                    // Partial frame; hand it back and let decoding report it.
                    break;
                }
            }

            trace!(addr = %self.addr, bytes = buffer.len(), "reply received");
            Ok(buffer.freeze())
        })
        .await
    }

    async fn send(&self, frame: &str) -> io::Result<()> {
        debug!(addr = %self.addr, frame = %frame, "sending fire-and-forget");
        self.under_deadline(async {
            let mut stream = self.connect().await?;
            stream.write_all(frame.as_bytes()).await?;
            stream.flush().await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn transport_for(listener: &TcpListener) -> TcpTransport {
        TcpTransport::new(listener.local_addr().unwrap())
            .with_timeout(Duration::from_millis(500))
    }

    #[tokio::test]
    async fn request_reads_until_terminator() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let transport = transport_for(&listener);

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 256];
            let n = sock.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b">V:1,C:101#");

            // Reply split across two writes; the client must reassemble.
            sock.write_all(b"?V:1,C:101=1,").await.unwrap();
            sock.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            sock.write_all(b"2,253#").await.unwrap();
        });

        let reply = transport.request(">V:1,C:101#").await.unwrap();
        assert_eq!(&reply[..], b"?V:1,C:101=1,2,253#");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn request_times_out_when_router_stays_silent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let transport = TcpTransport::new(listener.local_addr().unwrap())
            .with_timeout(Duration::from_millis(50));

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 256];
            let _ = sock.read(&mut buf).await.unwrap();
            // Hold the socket open without answering.
            tokio::time::sleep(Duration::from_millis(200)).await;
        });

        let err = transport.request(">V:1,C:114,@:1.2.1.1#").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn request_fails_when_connection_is_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = TcpTransport::new(addr).with_timeout(Duration::from_millis(500));
        let err = transport.request(">V:1,C:101#").await.unwrap_err();
        assert_ne!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn request_surfaces_close_before_any_byte() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let transport = transport_for(&listener);

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 256];
            let _ = sock.read(&mut buf).await.unwrap();
            drop(sock);
        });

        let err = transport.request(">V:1,C:185#").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn request_returns_partial_bytes_on_early_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let transport = transport_for(&listener);

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 256];
            let _ = sock.read(&mut buf).await.unwrap();
            sock.write_all(b"?V:1,C:185=169").await.unwrap();
            sock.flush().await.unwrap();
        });

        let reply = transport.request(">V:1,C:185#").await.unwrap();
        assert_eq!(&reply[..], b"?V:1,C:185=169");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn send_writes_frame_and_reads_nothing() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let transport = transport_for(&listener);

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            sock.read_to_end(&mut received).await.unwrap();
            received
        });

        transport.send(">V:1,C:11,G:1,B:1,S:1,F:300#").await.unwrap();
        let received = server.await.unwrap();
        assert_eq!(&received[..], b">V:1,C:11,G:1,B:1,S:1,F:300#");
    }
}
