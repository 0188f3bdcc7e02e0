//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use greeter_form::config::GreeterConfig;
use greeter_form::http::HttpServer;
use greeter_form::lifecycle::Shutdown;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Signal shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger("test finished");
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Start the service with `config`, overriding the bind address with port 0.
pub async fn start_server(mut config: GreeterConfig) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".into();
    let server = HttpServer::new(config);
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// POST a raw url-encoded body and return the page text.
#[allow(dead_code)]
pub async fn submit(server: &TestServer, body: &'static str) -> String {
    client()
        .post(server.url())
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .expect("server unreachable")
        .text()
        .await
        .unwrap()
}
