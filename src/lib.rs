//! Connection lifecycle harness for SMB client integration tests
//!
//! Integration tests against a live SMB server repeat the same shape:
//! build a client, connect to the local server, poke at the connection,
//! tear everything down. This crate owns that shape. [`with_connected_client`]
//! acquires a client and a connection, runs a caller-supplied routine with
//! the live connection, and guarantees connection-before-client release on
//! every exit path.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod harness;

#[cfg(test)]
mod e2e_tests;

pub use client::tcp::{TcpClient, TcpClientConfig, TcpConnection};
pub use client::{SessionClient, SessionConnection};
pub use error::{BoxError, Error, Result};
pub use harness::{with_connected_client, LOOPBACK_HOST};
