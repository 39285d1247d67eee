//! HTTP server startup logic.
//!
//! Binding is separate from serving so that a port conflict is reported
//! before the process claims to be up, and so tests can bind port 0 and read
//! back the port the OS picked.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::HttpServerConfig;

use super::shutdown::shutdown_signal;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A bound listener paired with the router it will serve.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    shutdown_grace: Duration,
}

impl Server {
    /// Bind the listener described by `config`.
    ///
    /// Fails if the address does not resolve, the port is already in use,
    /// or the process lacks permission for a privileged port.
    pub async fn bind(config: &HttpServerConfig, router: Router) -> Result<Self, ServerError> {
        let addr = config.bind_address();
        let bind_err = |source| ServerError::Bind {
            addr: addr.clone(),
            source,
        };

        let listener = TcpListener::bind(&addr).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        tracing::info!(%local_addr, "Listening");

        Ok(Self {
            listener,
            local_addr,
            router,
            shutdown_grace: Duration::from_secs(config.shutdown_grace_secs),
        })
    }

    /// Address actually bound, which differs from the configured one for port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> Result<(), ServerError> {
        self.run_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests for at
    /// most `shutdown_grace_secs`. Requests still running after that are
    /// abandoned and the call returns, so the process can exit.
    pub async fn run_with_shutdown<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (stopped_tx, mut stopped_rx) = watch::channel(false);

        let grace = self.shutdown_grace;
        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        let serve = axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                signal.await;
                let _ = stopped_tx.send(true);
            })
            .into_future();

        let grace_expired = async move {
            let signalled = stopped_rx.wait_for(|stopped| *stopped).await.is_ok();
            if !signalled {
                std::future::pending::<()>().await;
            }
            tracing::info!(
                grace_secs = grace.as_secs(),
                "Graceful shutdown initiated, waiting for connections to close"
            );
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = serve => {
                result?;
                tracing::info!("Server stopped");
            }
            _ = grace_expired => {
                tracing::warn!("Shutdown grace period elapsed, dropping remaining connections");
            }
        }

        Ok(())
    }
}
