//! TCP-backed client implementation
//!
//! A transport-level implementation of the collaborator traits: opens a raw
//! TCP connection to the server port and hands the stream to test code. No
//! SMB framing happens here; tests drive whatever bytes they need.

use super::{SessionClient, SessionConnection};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::debug;
use uuid::Uuid;

/// Default SMB direct-TCP port
pub const DEFAULT_PORT: u16 = 445;

/// TCP client configuration
#[derive(Debug, Clone)]
pub struct TcpClientConfig {
    /// Client GUID
    pub client_guid: Uuid,
    /// Server port to connect to
    pub port: u16,
    /// Timeout applied to the connect attempt
    pub connect_timeout: Duration,
}

impl Default for TcpClientConfig {
    fn default() -> Self {
        Self {
            client_guid: Uuid::new_v4(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// TCP-backed session client
pub struct TcpClient {
    config: TcpClientConfig,
    released: bool,
}

/// An open TCP connection owned by a [`TcpClient`]
pub struct TcpConnection {
    stream: Option<TcpStream>,
    peer_addr: SocketAddr,
}

#[async_trait]
impl SessionClient for TcpClient {
    type Config = TcpClientConfig;
    type Conn = TcpConnection;

    async fn construct(config: TcpClientConfig) -> Result<Self> {
        if config.port == 0 {
            return Err(Error::InvalidParameter(
                "server port must be non-zero".to_string(),
            ));
        }
        if config.connect_timeout.is_zero() {
            return Err(Error::InvalidParameter(
                "connect timeout must be non-zero".to_string(),
            ));
        }

        debug!(client_guid = %config.client_guid, port = config.port, "client constructed");
        Ok(Self {
            config,
            released: false,
        })
    }

    async fn open_connection(&mut self, host: &str) -> Result<TcpConnection> {
        if self.released {
            return Err(Error::InvalidState(
                "client already released".to_string(),
            ));
        }

        let addr = format!("{}:{}", host, self.config.port);
        let connect = TcpStream::connect(&addr);
        let stream = tokio::time::timeout(self.config.connect_timeout, connect)
            .await
            .map_err(|_| Error::Timeout)??;

        let peer_addr = stream.peer_addr()?;
        debug!(client_guid = %self.config.client_guid, %peer_addr, "connection opened");

        Ok(TcpConnection {
            stream: Some(stream),
            peer_addr,
        })
    }

    async fn release(&mut self) -> Result<()> {
        if !self.released {
            self.released = true;
            debug!(client_guid = %self.config.client_guid, "client released");
        }
        Ok(())
    }
}

impl TcpConnection {
    /// Remote address of the connection
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Get the underlying stream for test traffic
    pub fn stream_mut(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(Error::ConnectionClosed)
    }
}

#[async_trait]
impl SessionConnection for TcpConnection {
    async fn release(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown().await?;
            debug!(peer_addr = %self.peer_addr, "connection released");
        }
        Ok(())
    }
}
