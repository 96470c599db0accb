//! Domain model: the fact record, its decoding and its errors.

pub mod decode;
pub mod error;
pub mod types;

pub use decode::FieldMapping;
pub use error::{ErrorKind, FactError, FactResult};
pub use types::Fact;
