//! catfact: fetch a random cat fact and print it or serve it over HTTP.

pub mod config;
pub mod console;
pub mod fact;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod service;

pub use config::schema::CatFactConfig;
pub use fact::{ErrorKind, Fact, FactError};
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use service::{Context, FactService, LoggingService, ServiceBuilder};
