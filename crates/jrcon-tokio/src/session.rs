use std::{io, time::Duration};

use socket2::{SockRef, TcpKeepalive};
use tokio::{
    io::{
        AsyncRead,
        AsyncReadExt,
        AsyncWrite,
        AsyncWriteExt,
    },
    net::TcpStream,
    time::timeout,
};

use crate::errors::RconError;

/// Default size of a single socket read. A shorter read marks the end of a frame.
pub const READ_CHUNK_SIZE: usize = 256;

/// Result of a zero-wait read on an idle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Live,
    Closed,
}

/// Byte-level I/O over one connection.
///
/// Frames have no length prefix: a frame ends at the first read that returns
/// fewer than `chunk_size` bytes. Servers speaking this protocol flush each
/// message so that its final chunk is short.
#[derive(Debug)]
pub struct Session<S> {
    stream: S,
    chunk_size: usize,
}

impl Session<TcpStream> {
    /// Opens a TCP connection within `connect_timeout` and enables keep-alive probes.
    pub async fn connect(
        address: &str,
        connect_timeout: Duration,
        keepalive_period: Duration,
    ) -> Result<Self, RconError> {
        log::debug!("Connecting to {}", address);
        let stream = timeout(connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| RconError::Connect {
                address: address.to_string(),
                source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
            })?
            .map_err(|source| RconError::Connect { address: address.to_string(), source })?;

        set_keepalive(&stream, keepalive_period).map_err(RconError::Config)?;

        Ok(Session::new(stream))
    }
}

fn set_keepalive(stream: &TcpStream, period: Duration) -> io::Result<()> {
    let keepalive = TcpKeepalive::new().with_time(period);
    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    let keepalive = keepalive.with_interval(period);
    SockRef::from(stream).set_tcp_keepalive(&keepalive)
}

impl<S> Session<S> {
    pub fn new(stream: S) -> Self {
        Session { stream, chunk_size: READ_CHUNK_SIZE }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Session<S> {
    /// Reads one frame. The whole frame, not each chunk, must arrive within `deadline`.
    pub async fn read_frame(&mut self, deadline: Duration) -> Result<Vec<u8>, RconError> {
        log::debug!("Waiting for frame...");
        let frame = timeout(deadline, read_chunked(&mut self.stream, self.chunk_size))
            .await
            .map_err(|_| RconError::Timeout)??;

        log::debug!("Received frame of {} bytes", frame.len());
        Ok(frame)
    }

    /// Writes the whole buffer. Any failure, including the deadline, is a `RconError::Write`.
    pub async fn write_frame(&mut self, frame: &[u8], deadline: Duration) -> Result<(), RconError> {
        let stream = &mut self.stream;
        timeout(deadline, async move {
            stream.write_all(frame).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| RconError::Write(io::Error::new(io::ErrorKind::TimedOut, "write timed out")))?
        .map_err(RconError::Write)?;

        log::debug!("Sent frame of {} bytes", frame.len());
        Ok(())
    }

    /// Reads at most one byte without waiting to tell a closed peer from an idle one.
    ///
    /// A byte that is already buffered gets consumed and discarded, so this is
    /// only meaningful between complete exchanges. The session is left open
    /// either way; releasing it is up to the caller.
    pub async fn probe_liveness(&mut self) -> Liveness {
        let mut one = [0u8; 1];
        match timeout(Duration::ZERO, self.stream.read(&mut one)).await {
            Err(_) => Liveness::Live,
            Ok(Ok(0)) => Liveness::Closed,
            Ok(Ok(_)) => {
                log::debug!("Discarded unsolicited byte while probing connection");
                Liveness::Live
            }
            Ok(Err(e)) => match RconError::from(e) {
                RconError::ConnectionClosed => Liveness::Closed,
                other => {
                    log::debug!("Ignoring error while probing connection: {}", other);
                    Liveness::Live
                }
            },
        }
    }
}

async fn read_chunked<R: AsyncRead + Unpin>(
    reader: &mut R,
    chunk_size: usize,
) -> Result<Vec<u8>, RconError> {
    let mut chunk = vec![0u8; chunk_size];
    let mut frame = Vec::new();

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(RconError::ConnectionClosed);
        }

        frame.extend_from_slice(&chunk[..n]);

        if n < chunk_size {
            return Ok(frame);
        }
    }
}
