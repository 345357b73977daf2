use std::net::{Ipv4Addr, SocketAddr};

use crate::{latency::SimulatedLatency, SECONDS_DURATION_BUCKETS};

/// The port the service listens on by default.
pub const DEFAULT_PORT: u16 = 8001;

/// Everything needed to start the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the listener binds to.
    pub addr: SocketAddr,
    /// Delay applied by the greeting handler.
    pub latency: SimulatedLatency,
    /// Buckets of the latency histogram, in seconds.
    pub latency_buckets: Vec<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            latency: SimulatedLatency::default(),
            latency_buckets: SECONDS_DURATION_BUCKETS.to_vec(),
        }
    }
}
