//! Diagnostic sink shared by connection workers.
//!
//! A single `Arc<dyn Diagnostics>` is handed to every worker. Workers call it
//! concurrently, so events from different connections interleave in no
//! particular order.

use crate::http::request::Request;

pub trait Diagnostics: Send + Sync + 'static {
    /// A request was read and is about to be dispatched.
    fn request(&self, req: &Request);

    /// A connection failed while reading or writing. The worker closes it next.
    fn connection_error(&self, err: &anyhow::Error);

    /// A connection ended normally after serving `served` requests.
    fn connection_closed(&self, served: usize) {
        let _ = served;
    }

    /// A worker task panicked or was cancelled.
    fn worker_failed(&self, err: &tokio::task::JoinError);
}

/// Default sink, emitting `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn request(&self, req: &Request) {
        tracing::info!("{} {}", req.method, req.path);
        for (name, value) in req.headers.iter() {
            tracing::debug!("  {name}: {value}");
        }
    }

    fn connection_error(&self, err: &anyhow::Error) {
        tracing::warn!("{err:#}");
    }

    fn connection_closed(&self, served: usize) {
        tracing::debug!(served, "connection closed");
    }

    fn worker_failed(&self, err: &tokio::task::JoinError) {
        tracing::error!(%err, "connection worker failed");
    }
}
