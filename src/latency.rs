use std::{sync::Arc, time::Duration};

use rand::seq::SliceRandom;

/// The artificial backend latency the greeting handler waits for before answering.
///
/// Every request draws one of the configured durations uniformly at random.
#[derive(Debug, Clone)]
pub struct SimulatedLatency {
    choices: Arc<[Duration]>,
}

impl SimulatedLatency {
    /// Draw from the given delays.
    pub fn new(choices: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    /// Always answer immediately.
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Always wait exactly `delay`.
    pub fn fixed(delay: Duration) -> Self {
        Self::new([delay])
    }

    /// The delays a request can be given.
    pub fn choices(&self) -> &[Duration] {
        &self.choices
    }

    /// Draw the delay for one request. With no choices configured this is zero.
    pub fn sample(&self) -> Duration {
        self.choices
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// Zero, one or two seconds.
impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new((0..3).map(Duration::from_secs))
    }
}
