use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONNECTION, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderName, Request, Response};
use http_body_util::BodyExt;
use reqwest::Client;
use tokio::time::timeout;

use crate::config::Config;
use crate::proxy::error::ProxyError;
use crate::proxy::rewrite::strip_prefix;

/// Forwards relayed requests to the remote API.
pub struct UpstreamClient {
    client: Client,
    target: String,
    prefix: String,
    request_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_seconds as u64))
            .build()
            .map_err(ProxyError::Client)?;

        Ok(Self {
            client,
            target: config.proxy_target().trim_end_matches('/').to_string(),
            prefix: config.proxy.prefix.clone(),
            request_timeout: Duration::from_secs(config.api.timeout_seconds as u64),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub async fn forward(&self, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
        match timeout(self.request_timeout, self.do_forward(req)).await {
            Ok(response) => response,
            Err(_) => Err(ProxyError::RequestTimeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn do_forward(&self, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let method = req.method().clone();
        let uri = req.uri();
        let path_and_query = strip_prefix(uri.path(), uri.query(), &self.prefix).ok_or_else(|| {
            ProxyError::InvalidRequest(format!("{} is outside {}", uri.path(), self.prefix))
        })?;

        let upstream_uri = format!("{}{}", self.target, path_and_query);
        let mut builder = self.client.request(method, upstream_uri);

        // Host is dropped so the upstream sees its own origin; length is recomputed.
        for (name, value) in req.headers() {
            if name != HOST && name != CONTENT_LENGTH && !is_hop_by_hop(name) {
                builder = builder.header(name, value);
            }
        }

        let body_bytes = req
            .into_body()
            .collect()
            .await
            .map_err(|e| ProxyError::InvalidRequest(format!("Failed to read request body: {}", e)))?
            .to_bytes();

        let upstream_resp = builder
            .body(body_bytes)
            .send()
            .await
            .map_err(|e| ProxyError::ConnectionError {
                target: self.target.clone(),
                source: e,
            })?;

        let status = upstream_resp.status();
        let mut response_builder = Response::builder().status(status);

        // CORS headers are owned by the relay's CORS layer.
        for (name, value) in upstream_resp.headers() {
            if is_hop_by_hop(name) || name == CONTENT_LENGTH || is_cors_header(name) {
                continue;
            }
            response_builder = response_builder.header(name, value);
        }

        let body_bytes = upstream_resp
            .bytes()
            .await
            .map_err(|e| ProxyError::Internal(format!("Failed to read response body: {}", e)))?;
        Ok(response_builder.body(Body::from(body_bytes))?)
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    name == CONNECTION || name == TRANSFER_ENCODING || name.as_str() == "keep-alive"
}

fn is_cors_header(name: &HeaderName) -> bool {
    name.as_str().starts_with("access-control-")
}
