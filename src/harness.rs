//! Scoped connection runner
//!
//! Acquires a client from a configuration, opens a connection from it to
//! the loopback server, hands the live connection to a caller-supplied
//! routine, and releases connection then client on every exit path.

use crate::client::{SessionClient, SessionConnection};
use crate::error::{BoxError, Error, Result};
use tracing::debug;

/// Target host for every connection opened by the runner
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Run `routine` against a freshly opened connection.
///
/// Constructs a client of type `C` from `config`, opens a connection to
/// [`LOOPBACK_HOST`], and invokes `routine` exactly once with it. The
/// connection is released before the client, on every exit path: normal
/// return, routine failure, or acquisition failure partway through.
///
/// A failure during construction propagates immediately; nothing was
/// acquired. A failure opening the connection still releases the client.
/// A routine failure surfaces after both releases have run. If a release
/// fails while another error is pending, both are surfaced together as
/// [`Error::TeardownAfterError`].
pub async fn with_connected_client<C, F>(config: C::Config, routine: F) -> Result<()>
where
    C: SessionClient,
    F: AsyncFnOnce(&mut C::Conn) -> std::result::Result<(), BoxError>,
{
    let mut client = C::construct(config).await?;

    let outcome = run_with_connection(&mut client, routine).await;
    let released = client.release().await;
    debug!("client teardown complete");

    merge_teardown(outcome, released)
}

/// Inner scope: connection acquisition, routine invocation, connection release.
async fn run_with_connection<C, F>(client: &mut C, routine: F) -> Result<()>
where
    C: SessionClient,
    F: AsyncFnOnce(&mut C::Conn) -> std::result::Result<(), BoxError>,
{
    let mut conn = client.open_connection(LOOPBACK_HOST).await?;

    let outcome = routine(&mut conn).await.map_err(Error::routine);
    let released = conn.release().await;
    debug!("connection teardown complete");

    merge_teardown(outcome, released)
}

/// Combine the outcome of a scope with the outcome of its release.
///
/// A lone failure propagates as-is. When both fail, the pending error
/// stays primary and the release error rides along, so neither is lost.
fn merge_teardown(pending: Result<()>, release: Result<()>) -> Result<()> {
    match (pending, release) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(err), Ok(())) => Err(err),
        (Ok(()), Err(err)) => Err(err),
        (Err(pending), Err(release)) => Err(Error::TeardownAfterError {
            pending: Box::new(pending),
            release: Box::new(release),
        }),
    }
}
