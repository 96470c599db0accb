//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → handle_get_cat_fact (fresh Context per request)
//!     → FactService chain
//!     → response.rs (JSON envelope, 200 or 422)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{write_json, ErrorBody};
pub use server::{ApiServer, AppState, CATFACT_PATH};
