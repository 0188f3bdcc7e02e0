//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the form handler
//! - Wire up middleware (request ID, tracing, timeout, body limit, headers)
//! - Serve on a bound listener until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{routing::any, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ConfigError, GreeterConfig};
use crate::form::form_handler;
use crate::lifecycle::ShutdownSignal;
use crate::security::headers::security_header_layers;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GreeterConfig>,
    /// Used for the uptime shown in diagnostics.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: GreeterConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// HTTP server for the greeter page.
pub struct HttpServer {
    router: Router,
    config: Arc<GreeterConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GreeterConfig) -> Self {
        let state = AppState::new(config);
        let config = state.config.clone();
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.listener.bind_address.clone();
        TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })
    }

    /// Run the server, accepting connections on the given listener until
    /// shutdown is triggered, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown.recv())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router with all middleware, for driving without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &GreeterConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

    let mut router = Router::new()
        .route("/", any(form_handler))
        .with_state(state)
        .layer(middleware);

    if config.security.enable_headers {
        for layer in security_header_layers() {
            router = router.layer(layer);
        }
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app(config: GreeterConfig) -> Router {
        HttpServer::new(config).into_router()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_form_without_greeting() {
        let response = app(GreeterConfig::default())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let body = body_text(response).await;
        assert!(body.contains("<form method=\"post\""));
        assert!(!body.contains("Hello,"));
        assert!(body.contains("id=\"diagnostics\""));
    }

    #[tokio::test]
    async fn test_post_greets() {
        let response = app(GreeterConfig::default())
            .oneshot(post("name=Ann"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Hello, Ann!"));
        assert!(body.contains("id=\"diagnostics\""));
    }

    #[tokio::test]
    async fn test_post_whitespace_is_validation() {
        let response = app(GreeterConfig::default())
            .oneshot(post("name=++"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains(crate::form::VALIDATION_MESSAGE));
        assert!(!body.contains("Hello,"));
    }

    #[tokio::test]
    async fn test_post_script_is_escaped() {
        let response = app(GreeterConfig::default())
            .oneshot(post("name=%3Cscript%3E"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Hello, &lt;script&gt;!"));
        assert!(!body.contains("<script>"));
    }

    #[tokio::test]
    async fn test_post_repeated_name_greets_last() {
        let response = app(GreeterConfig::default())
            .oneshot(post("name=a&name=Ann"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Hello, Ann!"));
        assert!(!body.contains(crate::form::VALIDATION_MESSAGE));
    }

    #[tokio::test]
    async fn test_post_nul_name_is_validation() {
        let response = app(GreeterConfig::default())
            .oneshot(post("name=%00"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains(crate::form::VALIDATION_MESSAGE));
        assert!(!body.contains('\0'));
    }

    #[tokio::test]
    async fn test_post_wrong_content_type_is_validation() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ann"}"#))
            .unwrap();
        let response = app(GreeterConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(crate::form::VALIDATION_MESSAGE));
    }

    #[tokio::test]
    async fn test_put_renders_plain_form() {
        let request = Request::builder()
            .method("PUT")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Ann"))
            .unwrap();
        let response = app(GreeterConfig::default()).oneshot(request).await.unwrap();
        let body = body_text(response).await;
        assert!(body.contains("<form"));
        assert!(!body.contains("Hello,"));
        assert!(!body.contains(crate::form::VALIDATION_MESSAGE));
        assert!(body.contains("id=\"diagnostics\""));
    }

    #[tokio::test]
    async fn test_request_id_and_security_headers() {
        let response = app(GreeterConfig::default())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_security_headers_can_be_disabled() {
        let mut config = GreeterConfig::default();
        config.security.enable_headers = false;
        let response = app(config)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(!response.headers().contains_key(header::X_CONTENT_TYPE_OPTIONS));
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = app(GreeterConfig::default())
            .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = GreeterConfig::default();
        config.security.max_body_size = 8;
        let body = "name=a-very-long-name";
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        let response = app(config).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_oversized_body_without_length_rejected() {
        let mut config = GreeterConfig::default();
        config.security.max_body_size = 8;
        let response = app(config)
            .oneshot(post("name=a-very-long-name"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
