//! One-shot console output.
//!
//! Fetches a single fact and prints its text. Failure here is fatal for the
//! process; the HTTP path never goes through [`exit_with`].

use std::io::{self, Write};

use thiserror::Error;

use crate::fact::{Fact, FactError};
use crate::service::{Context, FactService};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Fetch(#[from] FactError),

    #[error("failed to write fact: {0}")]
    Io(#[from] io::Error),
}

/// Fetch one fact with an unbounded context and write its text to `out`.
pub async fn print_fact<W: Write>(
    service: &dyn FactService,
    out: &mut W,
) -> Result<Fact, ConsoleError> {
    let fact = service.fetch(&Context::background()).await?;
    writeln!(out, "{}", fact.text())?;
    out.flush()?;
    Ok(fact)
}

/// Report `err` and terminate the process.
pub fn exit_with(err: &ConsoleError) -> ! {
    tracing::error!(error = %err, "Failed to fetch cat fact");
    eprintln!("catfact: {err}");
    std::process::exit(1)
}
