//! Test utilities for teslapi-client
//!
//! Runs a mock owner API (and streaming endpoint) on a local port.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::{Result, TeslaClient};

/// Access token installed on the test client
pub const TEST_TOKEN: &str = "test-token";
pub const TEST_CLIENT_ID: &str = "test-id";
pub const TEST_CLIENT_SECRET: &str = "test-secret";

/// A test server that automatically shuts down when dropped
///
/// The client points its portal at the server root and its streaming base
/// at `/stream/`.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: TeslaClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{routing::get, Json, Router};
    /// use teslapi_client::testing::TestServer;
    ///
    /// let router = Router::new().route(
    ///     "/api/1/vehicles",
    ///     get(|| async { Json(serde_json::json!({"response": [], "count": 0})) }),
    /// );
    /// let server = TestServer::start(router).await?;
    /// let vehicles = server.client.vehicles().await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        Self::start_with(router, |config| config).await
    }

    /// Create a new test server, adjusting the client configuration first
    pub async fn start_with<S, F>(router: axum::Router<S>, configure: F) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
        F: FnOnce(ClientConfig) -> ClientConfig,
    {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let base_url = format!("http://{}/", addr);
        let config = ClientConfig::builder(&base_url)
            .streaming_url(format!("{}stream/", base_url))
            .identity(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
            .request_timeout_ms(5_000)
            .connect_timeout_ms(2_000)
            .build();
        let client = TeslaClient::new(configure(config))?.with_token(TEST_TOKEN);

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &TeslaClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Wait for a condition with timeout
pub async fn wait_for<F, Fut>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;

    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_client_points_at_server() {
        let server = TestServer::start(axum::Router::new()).await.unwrap();
        assert_eq!(server.client.base_url().as_str(), server.base_url());
        assert_eq!(
            server.client.streaming_url().unwrap().as_str(),
            format!("{}stream/", server.base_url())
        );
        assert_eq!(server.client().token().unwrap(), TEST_TOKEN);
        server.shutdown().await;
    }
}
