use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, info, info_span};

use crate::config::Config;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::http::connection::Connection;
use crate::http::parser::Limits;
use crate::server::admission::{Admission, Ticket};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and runs each one on its own task.
///
/// Workers are tracked in a [`JoinSet`], so the server knows how many are
/// live and can drain them when it stops.
pub struct Server {
    listener: TcpListener,
    admission: Admission,
    limits: Limits,
    diagnostics: Arc<dyn Diagnostics>,
    shutdown_grace: Duration,
    workers: JoinSet<()>,
}

impl Server {
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&cfg.server.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;

        Ok(Self {
            listener,
            admission: Admission::new(cfg.server.max_connections)?,
            limits: cfg.limits,
            diagnostics: Arc::new(TracingDiagnostics),
            shutdown_grace: Duration::from_millis(cfg.server.shutdown_grace_ms),
            workers: JoinSet::new(),
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accepts connections until `shutdown` resolves, then drains the workers.
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
        info!("Listening on {}", self.local_addr()?);

        tokio::pin!(shutdown);
        loop {
            let event = tokio::select! {
                _ = &mut shutdown => break,
                res = self.workers.join_next(), if !self.workers.is_empty() => Event::Finished(res),
                (ticket, res) = accept(&self.listener, &self.admission) => Event::Accepted(ticket, res),
            };

            match event {
                Event::Finished(Some(Err(e))) => self.diagnostics.worker_failed(&e),
                Event::Finished(_) => {}
                Event::Accepted(ticket, Ok((socket, peer))) => {
                    info!("Accepted connection from {}", peer);
                    self.spawn(socket, peer, ticket);
                }
                Event::Accepted(ticket, Err(e)) => {
                    self.accept_failed(ticket, e);
                    // usually descriptor exhaustion, give other workers time to finish
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(ACCEPT_BACKOFF) => {}
                    }
                }
            }
        }

        info!(live = self.workers.len(), "Shutting down");
        self.drain().await;
        Ok(())
    }

    /// Releases the admission slot of a connection that was never accepted.
    fn accept_failed(&self, ticket: Ticket, err: io::Error) {
        drop(ticket);
        tracing::error!("Failed to accept connection: {}", err);
    }

    fn spawn(&mut self, socket: TcpStream, peer: SocketAddr, ticket: Ticket) {
        let conn = Connection::new(socket, Arc::clone(&self.diagnostics)).with_limits(self.limits);

        self.workers.spawn(
            async move {
                conn.run().await;
                drop(ticket);
            }
            .instrument(info_span!("conn", %peer)),
        );
    }

    async fn drain(&mut self) {
        let grace = self.shutdown_grace;
        let diagnostics = Arc::clone(&self.diagnostics);
        let workers = &mut self.workers;

        let waited = tokio::time::timeout(grace, async {
            while let Some(res) = workers.join_next().await {
                if let Err(e) = res {
                    diagnostics.worker_failed(&e);
                }
            }
        })
        .await;

        if waited.is_err() {
            tracing::warn!(left = self.workers.len(), "Aborting connections after grace period");
            self.workers.shutdown().await;
        }
    }
}

enum Event {
    Accepted(Ticket, io::Result<(TcpStream, SocketAddr)>),
    Finished(Option<Result<(), JoinError>>),
}

/// Waits for admission first, so a full server leaves clients in the backlog.
async fn accept(
    listener: &TcpListener,
    admission: &Admission,
) -> (Ticket, io::Result<(TcpStream, SocketAddr)>) {
    let ticket = admission.admit().await;
    (ticket, listener.accept().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(limit: usize) -> Config {
        let mut cfg = Config::default();
        cfg.server.listen_addr = "127.0.0.1:0".to_string();
        cfg.server.max_connections = Some(limit);
        cfg
    }

    #[tokio::test]
    async fn failed_accept_returns_its_admission_slot() {
        let server = Server::bind(&bounded(1)).await.unwrap();

        let ticket = server.admission.admit().await;
        assert_eq!(server.admission.available(), Some(0));

        server.accept_failed(ticket, io::Error::other("too many open files"));
        assert_eq!(server.admission.available(), Some(1));
    }
}
