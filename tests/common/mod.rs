// Test helpers are intentionally partially used
#![allow(dead_code)]

use medicine_api::{build_router, create_noop_metrics, AppState};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

/// A live server on an ephemeral port, plus a handle on its state.
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
    pub state: AppState,
}

impl TestServer {
    // ---
    /// Seeded store, no-op metrics, global (no-op) tracer.
    pub async fn new() -> Self {
        // ---
        Self::with_state(AppState::with_metrics(create_noop_metrics().unwrap())).await
    }

    pub async fn with_state(state: AppState) -> Self {
        // ---
        let app = build_router(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            addr,
            client,
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
