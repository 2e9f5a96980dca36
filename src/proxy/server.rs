use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::proxy::error::ProxyError;
use crate::proxy::router::{build_router, ProxyState};
use crate::proxy::shutdown::ShutdownManager;
use crate::proxy::upstream::UpstreamClient;

pub struct ProxyServer {
    bind_addr: String,
    /// Populated by bind(), consumed by run().
    listener: Option<TcpListener>,
    router: Router,
    shutdown: Arc<ShutdownManager>,
}

impl ProxyServer {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let upstream = UpstreamClient::new(config)?;
        tracing::debug!(
            target_url = upstream.target(),
            prefix = upstream.prefix(),
            "Relay configured"
        );
        Ok(Self {
            bind_addr: config.proxy.bind_addr.clone(),
            listener: None,
            router: build_router(ProxyState::new(upstream)),
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Bind the configured address. Port 0 picks a free port; the actual
    /// address is returned.
    ///
    /// The listener is kept until run() so the port cannot be claimed in
    /// between.
    pub async fn bind(&mut self) -> Result<SocketAddr, ProxyError> {
        let addr: SocketAddr =
            self.bind_addr
                .parse()
                .map_err(|e: std::net::AddrParseError| ProxyError::InvalidBindAddr {
                    addr: self.bind_addr.clone(),
                    reason: e.to_string(),
                })?;

        let listener = TcpListener::bind(addr).await.map_err(|e| ProxyError::Bind {
            addr: self.bind_addr.clone(),
            source: e,
        })?;
        let actual = listener.local_addr().map_err(|e| ProxyError::Bind {
            addr: self.bind_addr.clone(),
            source: e,
        })?;

        self.listener = Some(listener);
        Ok(actual)
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn handle(&self) -> ProxyHandle {
        ProxyHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until Ctrl-C, SIGTERM or [`ProxyHandle::shutdown`].
    ///
    /// Binds first if bind() was not called.
    pub async fn run(mut self) -> Result<(), ProxyError> {
        if self.listener.is_none() {
            self.bind().await?;
        }
        let listener = self
            .listener
            .take()
            .ok_or_else(|| ProxyError::Internal("listener missing after bind".to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ProxyError::Internal(e.to_string()))?;

        tracing::info!("Proxy server running on {}", addr);
        tracing::info!("Proxy URL: http://{}", addr);

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::error!(error = %e, "Failed to listen for shutdown signals");
                }
            })
            .into_future()
            .await
            .map_err(|e| ProxyError::Internal(e.to_string()))?;

        tracing::info!("Proxy server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProxyHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ProxyHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
