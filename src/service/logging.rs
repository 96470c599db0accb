//! Latency-logging decorator.

use std::time::Instant;

use async_trait::async_trait;

use crate::fact::{Fact, FactResult};
use crate::service::{Context, FactService};

/// Wraps another [`FactService`] and logs how long each fetch took.
///
/// The wrapped result is returned exactly as produced. One event is emitted
/// per completed call, on success and on failure.
#[derive(Debug, Clone)]
pub struct LoggingService<S> {
    label: String,
    next: S,
}

impl<S: FactService> LoggingService<S> {
    pub fn new(label: impl Into<String>, next: S) -> Self {
        Self {
            label: label.into(),
            next,
        }
    }
}

#[async_trait]
impl<S: FactService> FactService for LoggingService<S> {
    async fn fetch(&self, ctx: &Context) -> FactResult<Fact> {
        let start = Instant::now();
        let result = self.next.fetch(ctx).await;
        let elapsed = start.elapsed();
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        match &result {
            Ok(_) => tracing::info!(
                service = %self.label,
                elapsed_us,
                ok = true,
                "get_cat_fact took {:?}",
                elapsed
            ),
            Err(e) => tracing::info!(
                service = %self.label,
                elapsed_us,
                ok = false,
                error = %e,
                "get_cat_fact took {:?}",
                elapsed
            ),
        }

        result
    }
}
