//! HTTP server: routes, middleware and graceful shutdown.

use axum::{
    extract::{MatchedPath, State},
    http::{header, HeaderName, HeaderValue, Request},
    response::Html,
    routing::get,
    Form, Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use uuid::Uuid;

use super::form::SubmissionForm;
use super::render::render_page;
use super::session::GenerationSession;
use crate::{AppConfig, Error, ProviderRegistry, Result};

/// Request ID generator
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Shared state for the handlers.
#[derive(Clone)]
pub struct AppState {
    registry: ProviderRegistry,
    today: fn() -> NaiveDate,
}

impl AppState {
    /// State judging event dates against the local calendar date.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry,
            today: local_today,
        }
    }

    /// Replace the source of "today".
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Create the main application router
///
/// `request_timeout` bounds the page and health routes. Form submissions are
/// only bounded by the provider clients' own timeouts, so every platform
/// always gets a post or an error message.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let timeout = TimeoutLayer::new(request_timeout);

    Router::new()
        .route("/", get(index).layer(timeout.clone()).post(submit))
        .route("/healthz", get(health_check).layer(timeout))
        .with_state(state)
        // Pages may echo the API key back into the form.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path =
                        request.extensions().get::<MatchedPath>().map(MatchedPath::as_str);
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = ?request.method(),
                        matched_path,
                        request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let session = GenerationSession::initial((state.today)());
    Html(render_page(&session))
}

async fn submit(State(state): State<AppState>, Form(form): Form<SubmissionForm>) -> Html<String> {
    let provider = state.registry.get(form.provider);
    let session = GenerationSession::run(form, (state.today)(), provider.as_ref()).await;
    Html(render_page(&session))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Create and start the HTTP server
pub async fn create_server(config: Arc<AppConfig>, registry: ProviderRegistry) -> Result<()> {
    let app = create_router(AppState::new(registry), config.request_timeout());
    let addr: SocketAddr = config.bind_addr;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!(
        address = %addr,
        environment = %config.environment,
        "HTTP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(format!("Server error: {e}")))
}

/// Waits for CTRL+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingProvider;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn router() -> Router {
        let provider = Arc::new(RecordingProvider::replying("post"));
        let registry = ProviderRegistry::new(provider.clone(), provider);
        create_router(AppState::new(registry), Duration::from_secs(30))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = router()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_pages_are_not_cached() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("provider=gemini&api_key=sk-secret-123"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Generate Posts"));
        assert!(html.contains("Please enter your Gemini API key to continue"));
    }
}
