//! Shutdown of the view server.
//!
//! `main` owns one [`Shutdown`]. The HTTP server holds its receiver and stops
//! accepting once it fires, then drains in-flight view requests. The Ctrl+C
//! task (or a test) fires it.

use tokio::sync::broadcast;

/// One-shot stop request for the running view server.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to hand to [`HttpServer::run`](crate::HttpServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask the server to stop.
    ///
    /// Returns `false` when no server is listening any more.
    pub fn trigger(&self) -> bool {
        let delivered = self.tx.send(()).is_ok();
        if !delivered {
            tracing::debug!("Shutdown requested but no server is running");
        }
        delivered
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
