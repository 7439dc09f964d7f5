//! HTTP server that binds the router to a TCP socket.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use krushi_mcp::ActionRegistry;
use krushi_protocol::{check_endpoint_path, MCP_PATH};

use crate::error::HttpTransportError;
use crate::router::{build_router_at, AppState};

/// Axum-based HTTP server for the action endpoint.
pub struct HttpServer {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) path: String,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a server listening on `host:port` with the endpoint at
    /// `/api/mcp` and no authentication.
    pub fn new(registry: Arc<ActionRegistry>, host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: MCP_PATH.to_string(),
            state: AppState::new(registry),
        }
    }

    /// Moves the endpoint to `path`.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Requires `Authorization: Bearer <token>` on the endpoint.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.state = self.state.with_token(token);
        self
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        self.run_until(std::future::pending()).await
    }

    /// Like [`run`](Self::run), but stops gracefully once `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint path is unusable, the TCP bind
    /// fails, or the server crashes.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), HttpTransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        check_endpoint_path(&self.path).map_err(HttpTransportError::InvalidPath)?;

        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| HttpTransportError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!(
            %addr,
            path = %self.path,
            actions = self.state.registry.len(),
            auth = self.state.token.is_some(),
            "KrushiMitra MCP HTTP server ready"
        );

        let router = build_router_at(&self.path, self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_registry() -> Arc<ActionRegistry> {
        Arc::new(ActionRegistry::builder().build().expect("empty registry"))
    }

    #[test]
    fn new_uses_default_path() {
        let server = HttpServer::new(empty_registry(), "127.0.0.1", 9002);
        assert_eq!(server.port, 9002);
        assert_eq!(server.path, "/api/mcp");
        assert!(server.state.token.is_none());
    }

    #[test]
    fn with_token_enables_auth() {
        let server =
            HttpServer::new(empty_registry(), "0.0.0.0", 8080).with_token(Some("s3cret".into()));
        assert_eq!(server.state.token.as_deref(), Some("s3cret"));
    }

    #[tokio::test]
    async fn relative_path_is_rejected_before_bind() {
        let err = HttpServer::new(empty_registry(), "127.0.0.1", 0)
            .with_path("api/mcp")
            .run_until(async {})
            .await
            .unwrap_err();
        assert!(matches!(err, HttpTransportError::InvalidPath(ref msg) if msg.contains("'/'")));
    }

    #[tokio::test]
    async fn health_paths_are_rejected() {
        for path in ["/health", "/health/ready"] {
            let err = HttpServer::new(empty_registry(), "127.0.0.1", 0)
                .with_path(path)
                .run_until(async {})
                .await
                .unwrap_err();
            assert!(
                matches!(err, HttpTransportError::InvalidPath(ref msg) if msg.contains("reserved")),
                "{path}: {err}"
            );
        }
    }

    #[tokio::test]
    async fn valid_custom_path_serves_until_shutdown() {
        HttpServer::new(empty_registry(), "127.0.0.1", 0)
            .with_path("/v2/mcp")
            .run_until(async {})
            .await
            .expect("clean shutdown");
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = taken.local_addr().expect("addr").port();
        let err = HttpServer::new(empty_registry(), "127.0.0.1", port)
            .run_until(async {})
            .await
            .unwrap_err();
        assert!(matches!(err, HttpTransportError::Bind { .. }));
    }
}
