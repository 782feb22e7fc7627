mod routes;
mod state;

pub use crate::state::{Fault, Route, ServiceState};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3001";

/// In-memory dashboard service on a background task. Stops on `shutdown` or drop.
pub struct MockService {
    addr: SocketAddr,
    state: Arc<ServiceState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockService {
    pub async fn spawn_with_addr(addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ServiceState::new());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = routes::router(Arc::clone(&state));
        tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                tracing::error!("mock service stopped: {e}");
            }
        });

        tracing::info!(%addr, "mock dashboard service listening");
        Ok(Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    pub async fn spawn() -> std::io::Result<Self> {
        Self::spawn_with_addr("127.0.0.1:0").await
    }

    /// A service pre-filled with the default launchers and welcome note.
    pub async fn seeded() -> std::io::Result<Self> {
        let service = Self::spawn().await?;
        service.state.seed_defaults();
        Ok(service)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    pub fn fail_next(&self, route: Route, status: u16, message: &str) {
        self.state.push_fault(
            route,
            Fault::Status {
                status,
                message: Some(message.to_string()),
            },
        );
    }

    pub fn fail_next_raw(&self, route: Route, status: u16, body: &str) {
        self.state.push_fault(
            route,
            Fault::RawBody {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn delay(&self, route: Route, delay: Duration) {
        self.state.set_delay(route, Some(delay));
    }

    pub fn hits(&self, route: Route) -> usize {
        self.state.hits(route)
    }

    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
