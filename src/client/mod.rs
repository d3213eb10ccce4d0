//! Client and connection collaborator traits
//!
//! The harness consumes the protocol client through this seam: construct a
//! client from a configuration, open a connection from the client, and
//! release each in turn. Implementations own the actual session and
//! transport state.

use crate::error::Result;
use async_trait::async_trait;

pub mod tcp;

/// A session-manager capable of opening connections to a server.
///
/// The configuration type is opaque to the harness; it is passed through
/// unchanged to `construct`.
#[async_trait]
pub trait SessionClient: Send + Sized {
    /// Configuration the client is built from
    type Config: Send;

    /// Connection type opened by this client
    type Conn: SessionConnection;

    /// Construct a client from a configuration
    async fn construct(config: Self::Config) -> Result<Self>;

    /// Open a connection to the given host
    async fn open_connection(&mut self, host: &str) -> Result<Self::Conn>;

    /// Release the client and any resources it holds.
    ///
    /// Must be idempotent: a second call is a no-op and must not report an
    /// error for the repeat.
    async fn release(&mut self) -> Result<()>;
}

/// An active connection opened from a [`SessionClient`].
///
/// A connection's lifetime is strictly nested inside its owning client's:
/// it must be released before the client is.
#[async_trait]
pub trait SessionConnection: Send {
    /// Tear down the connection
    async fn release(&mut self) -> Result<()>;
}
