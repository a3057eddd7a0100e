//! Failure accumulator for best-effort drain.

use flavor_spi::{Error, Result};
use std::fmt::Display;

/// Ordered accumulator of failures captured during a best-effort operation.
///
/// Drain must not short-circuit, so failures are threaded through the member
/// loop in this value and converted to a single combined error only after
/// every member has been attempted.
#[derive(Debug, Default)]
pub struct DrainFailures {
    failures: Vec<String>,
}

impl DrainFailures {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure, preserving encounter order
    pub fn record(&mut self, failure: impl Display) {
        self.failures.push(failure.to_string());
    }

    /// Whether any failure has been recorded
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Succeed if nothing was recorded, otherwise fail with a single error
    /// enumerating every recorded failure, comma-separated.
    pub fn into_result(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Aggregate(self.failures))
        }
    }
}
