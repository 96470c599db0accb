//! Assembly of decorator chains.

use std::sync::Arc;

use thiserror::Error;

use crate::service::{FactService, LoggingService};

type Layer = Box<dyn FnOnce(Arc<dyn FactService>) -> Arc<dyn FactService> + Send>;

/// Errors raised while constructing a service chain.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("service chain has no base service to wrap")]
    MissingBase,

    #[error("invalid upstream URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Builds a chain of decorators around a base service.
///
/// Layers are applied so that the first one added ends up outermost:
///
/// ```text
/// ServiceBuilder::new().logging("a").logging("b").base(svc)
///     → a(b(svc))
/// ```
#[derive(Default)]
pub struct ServiceBuilder {
    base: Option<Arc<dyn FactService>>,
    layers: Vec<Layer>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the innermost service.
    pub fn base<S: FactService + 'static>(mut self, service: S) -> Self {
        self.base = Some(Arc::new(service));
        self
    }

    /// Add a decorator.
    pub fn layer<F>(mut self, wrap: F) -> Self
    where
        F: FnOnce(Arc<dyn FactService>) -> Arc<dyn FactService> + Send + 'static,
    {
        self.layers.push(Box::new(wrap));
        self
    }

    /// Add a [`LoggingService`] decorator.
    pub fn logging(self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.layer(move |next| Arc::new(LoggingService::new(label, next)))
    }

    /// Assemble the chain. Fails if no base service was set.
    pub fn build(self) -> Result<Arc<dyn FactService>, BuildError> {
        let mut service = self.base.ok_or(BuildError::MissingBase)?;
        for wrap in self.layers.into_iter().rev() {
            service = wrap(service);
        }
        Ok(service)
    }
}
