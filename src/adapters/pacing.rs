use crate::domain::ports::Pacer;
use std::time::Duration;

/// Sleeps a fixed amount after every lookup. Does not adapt to rate-limit responses.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self) {
        tracing::debug!("Waiting {:?} before next request", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}
