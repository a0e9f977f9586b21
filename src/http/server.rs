//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics, headers)
//! - Bind server to listener and serve until shutdown

use axum::{
    extract::connect_info::Connected,
    http::{header, HeaderValue},
    middleware,
    routing::get,
    serve::IncomingStream,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EchoConfig;
use crate::describe::{ConnectionAddrs, RequestDescriber};
use crate::docs;
use crate::http::handlers::{hello_get, hello_post};
use crate::http::request::request_id_middleware;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub describer: Arc<RequestDescriber>,
    pub fallback_host: Arc<str>,
    pub openapi: Arc<Value>,
    pub docs_page: Arc<str>,
}

impl AppState {
    pub fn from_config(config: &EchoConfig) -> Self {
        let api = &config.api;
        Self {
            describer: Arc::new(RequestDescriber::from_config(&config.security)),
            fallback_host: Arc::from(config.listener.fallback_host.as_str()),
            openapi: Arc::new(docs::openapi_document(api)),
            docs_page: Arc::from(docs::swagger_page(&api.title, &api.path("/openapi.json"))),
        }
    }
}

impl Connected<IncomingStream<'_, TcpListener>> for ConnectionAddrs {
    fn connect_info(stream: IncomingStream<'_, TcpListener>) -> Self {
        Self {
            peer: *stream.remote_addr(),
            local: stream.io().local_addr().ok(),
        }
    }
}

/// HTTP server for the echo service.
pub struct HttpServer {
    router: Router,
    config: EchoConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EchoConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EchoConfig, state: AppState) -> Router {
        let api = &config.api;

        let mut routes = Router::new().route(&api.path("/hello"), get(hello_get).post(hello_post));
        if api.docs_enabled {
            routes = routes
                .route(&api.path("/docs"), get(docs::get_docs))
                .route(&api.path("/openapi.json"), get(docs::get_openapi));
        }

        let mut router = routes
            .route_layer(middleware::from_fn(metrics::track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware));

        if config.security.enable_headers {
            router = router.layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ));
        }

        router
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown is broadcast (or every sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.api.prefix,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<ConnectionAddrs>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EchoConfig {
        &self.config
    }
}
