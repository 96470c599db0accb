//! Base fact service: one HTTP GET against the upstream API.
//!
//! # Responsibilities
//! - Issue a single GET per fetch, no retries
//! - Treat transport failures and non-2xx statuses as upstream errors
//! - Decode the body with the configured field mapping
//! - Abort the in-flight request when the context is done

use async_trait::async_trait;
use url::Url;

use crate::config::UpstreamConfig;
use crate::fact::{Fact, FactError, FactResult, FieldMapping};
use crate::service::builder::BuildError;
use crate::service::{Context, FactService};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches facts from a fixed upstream endpoint.
#[derive(Debug, Clone)]
pub struct CatFactService {
    client: reqwest::Client,
    url: Url,
    fields: FieldMapping,
}

impl CatFactService {
    /// Create a service with a default HTTP client.
    pub fn new(url: Url, fields: FieldMapping) -> Result<Self, BuildError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(BuildError::Client)?;
        Ok(Self::with_client(client, url, fields))
    }

    /// Create a service around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, url: Url, fields: FieldMapping) -> Self {
        Self {
            client,
            url,
            fields,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, BuildError> {
        let url = Url::parse(&config.url).map_err(|source| BuildError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;
        Self::new(url, FieldMapping::from(config))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn request(&self) -> FactResult<Fact> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(FactError::Transport)?;

        let status = response.status();
        tracing::debug!(url = %self.url, status = %status, "Upstream responded");
        if !status.is_success() {
            return Err(FactError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FactError::Transport)?;
        self.fields.decode(&body)
    }
}

#[async_trait]
impl FactService for CatFactService {
    async fn fetch(&self, ctx: &Context) -> FactResult<Fact> {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        tokio::select! {
            biased;
            err = ctx.done() => Err(err),
            result = self.request() => result,
        }
    }
}
