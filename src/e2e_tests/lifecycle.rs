//! Full lifecycle runs over real TCP connections on 127.0.0.1

#[cfg(test)]
mod tests {
    use crate::client::tcp::{TcpClient, TcpClientConfig};
    use crate::error::Error;
    use crate::harness::with_connected_client;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_lifecycle_against_echo_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await?;
            let mut buf = [0u8; 4];
            stream.read_exact(&mut buf).await?;
            stream.write_all(&buf).await?;

            // Runs until the harness shuts the client side down
            let mut rest = Vec::new();
            stream.read_to_end(&mut rest).await?;
            std::io::Result::Ok(rest.len())
        });

        let config = TcpClientConfig {
            port,
            ..Default::default()
        };
        with_connected_client::<TcpClient, _>(config, async |conn| {
            let stream = conn.stream_mut()?;
            stream.write_all(b"PING").await?;

            let mut buf = [0u8; 4];
            stream.read_exact(&mut buf).await?;
            assert_eq!(&buf, b"PING");
            Ok(())
        })
        .await
        .unwrap();

        // Server saw a clean shutdown with no trailing bytes
        let leftover = server.await.unwrap().unwrap();
        assert_eq!(leftover, 0);
    }

    #[tokio::test]
    async fn test_connection_refused_propagates_and_skips_routine() {
        // Grab a free port, then close it so the connect is refused
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = TcpClientConfig {
            port,
            ..Default::default()
        };
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = invoked.clone();

        let err = with_connected_client::<TcpClient, _>(config, async |_conn| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_routine_error_surfaces_after_teardown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await?;
            let mut rest = Vec::new();
            stream.read_to_end(&mut rest).await?;
            std::io::Result::Ok(())
        });

        let config = TcpClientConfig {
            port,
            ..Default::default()
        };
        let err = with_connected_client::<TcpClient, _>(config, async |_conn| {
            Err("simulated failure".into())
        })
        .await
        .unwrap_err();

        match err {
            Error::Routine(source) => assert_eq!(source.to_string(), "simulated failure"),
            other => panic!("unexpected error: {:?}", other),
        }

        // Connection was torn down, so the server task completes
        server.await.unwrap().unwrap();
    }
}
