// src/config/plan.rs

//! Matching the command-line duration list to the requested concurrency.
//!
//! The orchestrator requires exactly one duration per run. Short lists are
//! padded with the configured default duration; excess entries are dropped
//! from the end.

use tracing::warn;

use crate::errors::{Result, StressError};
use crate::types::DurationSpec;

/// One duration per run, plus a record of how the input was adjusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationPlan {
    pub durations: Vec<DurationSpec>,
    pub padded: usize,
    pub truncated: usize,
}

/// Parse `requested` and pad or truncate it to `concurrency` entries.
pub fn plan_durations<S: AsRef<str>>(
    requested: &[S],
    concurrency: usize,
    default: DurationSpec,
) -> Result<DurationPlan> {
    let mut durations = requested
        .iter()
        .map(|s| {
            s.as_ref()
                .parse::<DurationSpec>()
                .map_err(|e| StressError::Config(format!("invalid run duration: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut padded = 0;
    let mut truncated = 0;

    if durations.len() < concurrency {
        padded = concurrency - durations.len();
        warn!(
            given = durations.len(),
            concurrency,
            default = %default,
            "fewer durations than runs; padding missing values with the default duration"
        );
        durations.resize(concurrency, default);
    } else if durations.len() > concurrency {
        truncated = durations.len() - concurrency;
        warn!(
            given = durations.len(),
            concurrency,
            dropped = truncated,
            "more durations than runs; excess values are ignored"
        );
        durations.truncate(concurrency);
    }

    Ok(DurationPlan {
        durations,
        padded,
        truncated,
    })
}
