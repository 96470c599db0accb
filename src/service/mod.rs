//! Fact services and their decorators.
//!
//! # Data Flow
//! ```text
//! Request handler (console / HTTP)
//!     → LoggingService (times the call, logs, passes result through)
//!     → [any further decorators]
//!     → CatFactService (one GET to upstream, decode body)
//!     → upstream API
//! ```
//!
//! # Design Decisions
//! - Every stage implements [`FactService`]; decorators hold the next stage
//!   and are composed by constructor injection
//! - Results and errors travel back up the chain untouched
//! - No retries, caching or timeouts beyond what the caller's [`Context`] sets

pub mod builder;
pub mod catfact;
pub mod context;
pub mod logging;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::UpstreamConfig;
use crate::fact::{Fact, FactResult};

pub use builder::{BuildError, ServiceBuilder};
pub use catfact::CatFactService;
pub use context::{CancelHandle, Context};
pub use logging::LoggingService;

/// Anything that can produce a single fact.
#[async_trait]
pub trait FactService: Send + Sync {
    /// Fetch one fact. Either a fully decoded fact or an error, never both.
    async fn fetch(&self, ctx: &Context) -> FactResult<Fact>;
}

#[async_trait]
impl<T: FactService + ?Sized> FactService for Arc<T> {
    async fn fetch(&self, ctx: &Context) -> FactResult<Fact> {
        (**self).fetch(ctx).await
    }
}

#[async_trait]
impl<T: FactService + ?Sized> FactService for Box<T> {
    async fn fetch(&self, ctx: &Context) -> FactResult<Fact> {
        (**self).fetch(ctx).await
    }
}

/// Build the production chain: the upstream client wrapped in one logging
/// decorator.
pub fn from_config(config: &UpstreamConfig) -> Result<Arc<dyn FactService>, BuildError> {
    ServiceBuilder::new()
        .logging("catfact")
        .base(CatFactService::from_config(config)?)
        .build()
}
