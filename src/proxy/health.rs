use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::proxy::router::ProxyState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub target: String,
}

pub async fn health(State(state): State<ProxyState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "postboard-proxy",
        target: state.upstream.target().to_string(),
    })
}
