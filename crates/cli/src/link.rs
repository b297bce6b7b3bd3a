//! Sensor stream connection
//!
//! The socket is dialled once at startup and then polled without blocking,
//! once per tick.

use std::io::ErrorKind;
use std::time::Duration;

use gyrodrive_errors::StartupError;
use gyrodrive_telemetry_streams::LinkInput;
use tokio::net::TcpStream;
use tracing::{info, warn};

const READ_BUFFER_SIZE: usize = 4096;

/// Open the one outbound connection.
pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, StartupError> {
    let endpoint = format!("{host}:{port}");
    if host.trim().is_empty() {
        return Err(StartupError::invalid_endpoint(endpoint, "host is empty"));
    }
    if port == 0 {
        return Err(StartupError::invalid_endpoint(endpoint, "port must be non-zero"));
    }

    info!(endpoint = %endpoint, "Connecting to sensor stream");
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            if let Err(e) = stream.set_nodelay(true) {
                warn!(error = %e, "Could not disable Nagle on sensor stream");
            }
            info!(endpoint = %endpoint, "Connected");
            Ok(stream)
        }
        Ok(Err(e)) => Err(StartupError::connect_failed(endpoint, e.to_string())),
        Err(_elapsed) => Err(StartupError::connect_timeout(
            endpoint,
            u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}

/// Non-blocking reader over the sensor stream.
///
/// Once the peer closes or a hard error occurs the link stays closed and
/// every later poll reports [`LinkInput::Closed`].
#[derive(Debug)]
pub struct SensorLink {
    stream: Option<TcpStream>,
    buffer: Vec<u8>,
}

impl SensorLink {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream: Some(stream),
            buffer: vec![0; READ_BUFFER_SIZE],
        }
    }

    /// One read attempt; never waits for data.
    pub fn poll(&mut self) -> LinkInput<'_> {
        let Some(stream) = &self.stream else {
            return LinkInput::Closed;
        };

        match stream.try_read(&mut self.buffer) {
            Ok(0) => {
                warn!("Sensor stream closed by peer");
                self.stream = None;
                LinkInput::Closed
            }
            Ok(n) => LinkInput::Bytes(self.buffer.get(..n).unwrap_or_default()),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                LinkInput::Idle
            }
            Err(e) => {
                warn!(error = %e, "Sensor stream read failed");
                self.stream = None;
                LinkInput::Closed
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_refused_is_startup_error() -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        drop(listener);

        let result = connect("127.0.0.1", port, Duration::from_secs(2)).await;
        assert!(matches!(result, Err(StartupError::ConnectFailed { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_host_rejected() {
        let result = connect(" ", 5555, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(StartupError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_poll_reads_then_reports_close() -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let stream = connect("127.0.0.1", port, Duration::from_secs(2)).await?;
        let (mut peer, _) = listener.accept().await?;
        let mut link = SensorLink::new(stream);

        assert!(matches!(link.poll(), LinkInput::Idle));

        peer.write_all(b"1,2,3\n").await?;
        peer.shutdown().await?;
        drop(peer);

        let mut received = Vec::new();
        let mut closed = false;
        for _ in 0..200 {
            match link.poll() {
                LinkInput::Bytes(bytes) => received.extend_from_slice(bytes),
                LinkInput::Closed => {
                    closed = true;
                    break;
                }
                LinkInput::Idle => tokio::time::sleep(Duration::from_millis(5)).await,
            }
        }

        assert_eq!(received, b"1,2,3\n");
        assert!(closed);
        assert!(!link.is_open());
        assert!(matches!(link.poll(), LinkInput::Closed));
        Ok(())
    }
}
