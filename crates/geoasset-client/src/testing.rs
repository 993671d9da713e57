//! Test utilities for geoasset-client
//!
//! [`TestServer`] runs an axum router on an ephemeral local port and hands
//! out a client already pointed at it. The server stops when the value is
//! dropped.

use std::net::SocketAddr;
use std::time::Duration;

use geoasset_core::UploadResponse;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{AssetClient, Result};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);
const TEST_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A router served on `127.0.0.1:<random port>` for the duration of a test
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: AssetClient,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` and build a client for it
    ///
    /// ```ignore
    /// let state = AppState::new(Arc::new(AssetStore::new()));
    /// let server = TestServer::start(create_router(state)).await?;
    /// let assets = server.client.list_assets(None).await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let stopped = async {
                stop_rx.await.ok();
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(stopped)
                .await
            {
                tracing::warn!("Test server exited with error: {}", e);
            }
        });

        let client =
            AssetClient::with_config(&format!("http://{}", addr), TEST_TIMEOUT, TEST_CONNECT_TIMEOUT)?;

        Ok(Self {
            addr,
            client,
            stop_tx: Some(stop_tx),
            task: Some(task),
        })
    }

    /// Base URL of the server, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Upload a JSON document as the asset file for `company_id`
    pub async fn upload_json(&self, company_id: &str, json: &str) -> Result<UploadResponse> {
        self.client
            .upload_assets(company_id, "assets.json", json.as_bytes().to_vec())
            .await
    }

    /// Stop the server and wait for in-flight requests to finish
    pub async fn stop(mut self) {
        self.signal_stop();
        if let Some(task) = self.task.take() {
            task.await.ok();
        }
    }

    fn signal_stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            tx.send(()).ok();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.signal_stop();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
