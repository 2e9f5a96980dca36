use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, get};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::proxy::error::ErrorResponse;
use crate::proxy::health::health;
use crate::proxy::upstream::UpstreamClient;

/// Shared handler state.
#[derive(Clone)]
pub struct ProxyState {
    pub upstream: Arc<UpstreamClient>,
}

impl ProxyState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }
}

/// Routes: `GET /health`, `ANY <prefix>` and `ANY <prefix>/*`, wrapped in
/// request logging and a permissive CORS layer.
pub fn build_router(state: ProxyState) -> Router {
    let prefix = state.upstream.prefix().to_string();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .route(&prefix, any(proxy_handler))
        .route(&format!("{}/{{*path}}", prefix), any(proxy_handler))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn(log_request)),
        )
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!("{} {}", req.method(), req.uri());
    next.run(req).await
}

async fn proxy_handler(State(state): State<ProxyState>, req: Request<Body>) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();

    match state.upstream.forward(req).await {
        Ok(response) => {
            tracing::info!(
                request_id = %request_id,
                "Proxied {} {} -> {}",
                method,
                uri,
                response.status().as_u16()
            );
            response
        }
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                error = %err,
                "Proxy error for {} {}",
                method,
                uri
            );
            ErrorResponse::from_error(&err, &request_id)
        }
    }
}
