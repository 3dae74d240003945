//! Health Use Case
//!
//! Probes the Core with progressively stronger checks.

use std::time::{Duration, Instant};

use crate::application::client::{CallOptions, CoreClient};
use crate::application::fallback::{Candidate, Outcome, attempt_in_order};
use crate::domain::transport::CoreTransport;

/// Deadline for each probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(8);

/// Health report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub up: bool,
    pub latency_ms: u64,
    pub error: Option<String>,
}

/// Health use case
pub struct HealthUseCase<T>
where
    T: CoreTransport,
{
    client: CoreClient<T>,
}

impl<T> HealthUseCase<T>
where
    T: CoreTransport,
{
    pub fn new(client: CoreClient<T>) -> Self {
        Self { client }
    }

    /// `/hello`, then `/`, then a one-user listing as a connectivity and
    /// auth check
    pub async fn check(&self) -> HealthReport {
        let probe = || CallOptions::get().timeout(PROBE_TIMEOUT);
        let candidates = vec![
            Candidate::new("/hello", probe()),
            Candidate::new("/", probe()),
            Candidate::new("/users", probe().query("limit", 1)),
        ];

        let started = Instant::now();
        let outcome = attempt_in_order(&self.client, candidates, |_| false).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Outcome::Success(_) => HealthReport {
                up: true,
                latency_ms,
                error: None,
            },
            Outcome::NotFound(e) | Outcome::Failed(e) => {
                tracing::warn!(error = %e, latency_ms, "Core health check failed");
                HealthReport {
                    up: false,
                    latency_ms,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
