// src/engine/aggregator.rs

//! Summary statistics over a finished campaign.
//!
//! Every query first checks the readiness flag, so statistics are never
//! computed from a campaign that is still running or that failed.
//!
//! Values are summed in a fixed (sorted) order, which makes each result
//! bit-for-bit independent of the order the runs finished in.

use crate::errors::{Result, StressError};
use crate::extract::MetricField;

use super::run_set::RunRecord;

/// All four aggregates of one campaign, as shown in the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignSummary {
    pub runs: usize,
    pub total_op_rate: f64,
    pub mean_latency: f64,
    pub mean_p99_latency: f64,
    /// `None` when fewer than two runs were made.
    pub stdev_max_latency: Option<f64>,
}

/// Read-only statistics view over a campaign's runs.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    ready: bool,
    runs: &'a [RunRecord],
}

impl<'a> Aggregator<'a> {
    pub(crate) fn new(ready: bool, runs: &'a [RunRecord]) -> Self {
        Self { ready, runs }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Sum of the op rates of all runs.
    pub fn total_op_rate(&self) -> Result<f64> {
        let values = self.values("total_op_rate", MetricField::OpRate)?;
        Ok(sum(&values))
    }

    /// Mean of the per-run mean latencies.
    pub fn mean_latency(&self) -> Result<f64> {
        let query = "mean_latency";
        let values = self.values(query, MetricField::LatencyMean)?;
        mean(&values).ok_or_else(|| insufficient(query, 1, values.len()))
    }

    /// Mean of the per-run 99th percentile latencies.
    pub fn mean_p99_latency(&self) -> Result<f64> {
        let query = "mean_p99_latency";
        let values = self.values(query, MetricField::Latency99thPercentile)?;
        mean(&values).ok_or_else(|| insufficient(query, 1, values.len()))
    }

    /// Sample standard deviation (n - 1 divisor) of the per-run max latencies.
    pub fn stdev_max_latency(&self) -> Result<f64> {
        let query = "stdev_max_latency";
        let values = self.values(query, MetricField::LatencyMax)?;
        sample_stdev(&values).ok_or_else(|| insufficient(query, 2, values.len()))
    }

    /// All aggregates at once. The standard deviation is left out, rather
    /// than failing the summary, when there is only one run.
    pub fn summary(&self) -> Result<CampaignSummary> {
        let stdev_max_latency = match self.stdev_max_latency() {
            Ok(v) => Some(v),
            Err(StressError::InsufficientData { .. }) => None,
            Err(e) => return Err(e),
        };

        Ok(CampaignSummary {
            runs: self.runs.len(),
            total_op_rate: self.total_op_rate()?,
            mean_latency: self.mean_latency()?,
            mean_p99_latency: self.mean_p99_latency()?,
            stdev_max_latency,
        })
    }

    /// Values of `field` across all runs, sorted, after the readiness check.
    fn values(&self, query: &'static str, field: MetricField) -> Result<Vec<f64>> {
        if !self.ready {
            return Err(StressError::NotReady { query });
        }

        let mut values: Vec<f64> = self.runs.iter().map(|r| r.metrics().get(field)).collect();
        values.sort_by(f64::total_cmp);
        Ok(values)
    }
}

fn insufficient(query: &'static str, required: usize, found: usize) -> StressError {
    StressError::InsufficientData {
        query,
        required,
        found,
    }
}

fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let squares: Vec<f64> = values.iter().map(|v| (v - m).powi(2)).collect();
    let variance = sum(&squares) / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
