use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;

/// Errors that can stop the service from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Prometheus recorder rejected its configuration, typically an empty bucket list.
    #[error("failed to build the metrics recorder: {0}")]
    Recorder(#[from] BuildError),

    /// The listener could not be bound, e.g. because the port is already in use.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error after it started accepting connections.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
