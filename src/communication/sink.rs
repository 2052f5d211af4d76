//! Telemetry sinks
//!
//! [`UdpTelemetry`] sends each JSON line as one datagram to a fixed peer.
//! [`LogSink`] writes lines to the log when UDP is disabled.

use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Telemetry errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid telemetry address '{0}'")]
    InvalidAddress(String),
    #[error("telemetry I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Destination for telemetry lines
pub trait TelemetrySink {
    /// Publish one line; failures are reported, never retried
    fn publish(&mut self, line: &str) -> Result<(), TelemetryError>;

    /// Short description for log messages
    fn describe(&self) -> String;
}

/// Send-and-forget UDP sink
pub struct UdpTelemetry {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpTelemetry {
    /// Bind an ephemeral local port and connect it to `address`
    ///
    /// The socket is non-blocking: a full send buffer drops the datagram
    /// instead of stalling the dispatcher.
    pub fn connect(address: &str) -> Result<Self, TelemetryError> {
        let peer: SocketAddr = address
            .parse()
            .map_err(|_| TelemetryError::InvalidAddress(address.to_string()))?;
        let local = if peer.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)?;
        socket.connect(peer)?;
        socket.set_nonblocking(true)?;
        Ok(Self { socket, peer })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl TelemetrySink for UdpTelemetry {
    fn publish(&mut self, line: &str) -> Result<(), TelemetryError> {
        self.socket.send(line.as_bytes())?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.peer)
    }
}

/// Sink that writes each line to the log at info level
#[derive(Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn publish(&mut self, line: &str) -> Result<(), TelemetryError> {
        crate::log_info!("{}", line);
        Ok(())
    }

    fn describe(&self) -> String {
        "log".into()
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for Box<S> {
    fn publish(&mut self, line: &str) -> Result<(), TelemetryError> {
        (**self).publish(line)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
