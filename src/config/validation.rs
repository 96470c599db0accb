//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value formats (upstream URL, log level)
//! - Detect conflicting upstream field names
//! - Check the listener address, only when the server is started
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CatFactConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - The bind address is not part of [`validate_config`]; print mode never
//!   listens, so a bad listener section must not stop it

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::CatFactConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not of the form host:port")]
    InvalidBindAddress(String),

    #[error("upstream.url '{url}' is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("upstream.{0} must not be empty")]
    EmptyFieldName(&'static str),

    #[error("upstream.text_field and upstream.length_field are both '{0}'")]
    DuplicateFieldName(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &CatFactConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_upstream_url(&config.upstream.url) {
        errors.push(ValidationError::InvalidUpstreamUrl {
            url: config.upstream.url.clone(),
            reason,
        });
    }

    let upstream = &config.upstream;
    if upstream.text_field.is_empty() {
        errors.push(ValidationError::EmptyFieldName("text_field"));
    }
    if upstream.length_field.is_empty() {
        errors.push(ValidationError::EmptyFieldName("length_field"));
    }
    if !upstream.text_field.is_empty() && upstream.text_field == upstream.length_field {
        errors.push(ValidationError::DuplicateFieldName(upstream.text_field.clone()));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a listener address. Accepts a socket address (`0.0.0.0:3000`,
/// `[::1]:3000`) or a host name with a port (`localhost:3000`).
pub fn validate_bind_address(raw: &str) -> Result<(), ValidationError> {
    if raw.parse::<SocketAddr>().is_ok() {
        return Ok(());
    }
    let invalid = || ValidationError::InvalidBindAddress(raw.to_string());
    let (host, port) = raw.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() || host.contains(':') || port.parse::<u16>().is_err() {
        return Err(invalid());
    }
    Ok(())
}

fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
