//! Shared utilities for integration testing.

use std::net::SocketAddr;
use tokio::net::TcpListener;

use form_gateway::config::GatewayConfig;
use form_gateway::{HttpServer, Shutdown};

/// Start a gateway on an ephemeral port and return its address.
///
/// The server stops when the returned `Shutdown` is triggered or the test
/// process exits.
pub async fn spawn_gateway(mut config: GatewayConfig) -> (SocketAddr, Shutdown) {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).await;
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Non-pooled client for test stability.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A contact body that passes validation.
#[allow(dead_code)]
pub fn valid_contact_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Nino Beridze",
        "email": "nino@example.com",
        "subject": "general",
        "message": "I would like to learn more about your services."
    })
}
