//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! service::LoggingService   → fetch latency events
//! http::server (TraceLayer) → request spans with x-request-id
//! console / lifecycle       → startup, shutdown and fatal errors
//!     → logging.rs subscriber → stderr (text or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
