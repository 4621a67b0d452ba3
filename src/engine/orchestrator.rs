// src/engine/orchestrator.rs

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::errors::{CampaignFailure, Result, StressError, UnitError, UnitFailure};
use crate::exec::LoadExecutor;
use crate::extract::MetricExtractor;
use crate::types::DurationSpec;

use super::aggregator::Aggregator;
use super::run_set::{RunRecord, RunSet};

/// Runs one stress campaign: N concurrent runs against a single target.
///
/// Create a fresh instance per campaign. After [`Orchestrator::execute`]
/// succeeds the campaign is *ready*: the collected runs are frozen and the
/// [`Aggregator`] queries become available. If any run fails the campaign
/// never becomes ready.
pub struct Orchestrator<E: LoadExecutor> {
    executor: Arc<E>,
    extractor: Arc<MetricExtractor>,
    executed: bool,
    ready: bool,
    runs: Vec<RunRecord>,
}

impl<E: LoadExecutor> fmt::Debug for Orchestrator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("executed", &self.executed)
            .field("ready", &self.ready)
            .field("runs", &self.runs.len())
            .finish_non_exhaustive()
    }
}

impl<E: LoadExecutor> Orchestrator<E> {
    pub fn new(executor: E, extractor: MetricExtractor) -> Self {
        Self::with_shared(Arc::new(executor), Arc::new(extractor))
    }

    pub fn with_shared(executor: Arc<E>, extractor: Arc<MetricExtractor>) -> Self {
        Self {
            executor,
            extractor,
            executed: false,
            ready: false,
            runs: Vec::new(),
        }
    }

    /// True once every run finished successfully.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Finalized runs in completion order; empty until the campaign is ready.
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Statistics view over this campaign.
    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(self.ready, &self.runs)
    }

    /// Run `concurrency` load invocations against `target` in parallel, run
    /// `i` lasting `durations[i]`, and wait for all of them.
    ///
    /// Every run is joined before this returns, whatever the others did. If
    /// any failed, all failures are returned together as
    /// [`StressError::Campaign`] and the campaign stays not-ready.
    pub async fn execute(
        &mut self,
        target: &str,
        concurrency: usize,
        durations: &[DurationSpec],
    ) -> Result<()> {
        if self.executed {
            return Err(StressError::AlreadyExecuted);
        }
        if durations.len() != concurrency {
            return Err(StressError::Config(format!(
                "expected {concurrency} run durations, got {}",
                durations.len()
            )));
        }
        self.executed = true;

        info!(target = %target, concurrency, "starting stress campaign");

        let run_set = RunSet::new();
        let target: Arc<str> = Arc::from(target);

        let handles: Vec<_> = durations
            .iter()
            .enumerate()
            .map(|(index, &duration)| {
                let unit = RunUnit {
                    index,
                    duration,
                    target: Arc::clone(&target),
                    executor: Arc::clone(&self.executor),
                    extractor: Arc::clone(&self.extractor),
                    run_set: run_set.clone(),
                };
                (index, duration, tokio::spawn(unit.run()))
            })
            .collect();

        // Join barrier: every unit is awaited, failures are only collected.
        let mut failures = Vec::new();
        for (index, duration, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_err) => Err(UnitError::Panicked(join_err.to_string())),
            };

            if let Err(error) = outcome {
                warn!(run = index + 1, duration = %duration, error = %error, "stress run failed");
                failures.push(UnitFailure {
                    index,
                    duration,
                    error,
                });
            }
        }

        let succeeded = concurrency - failures.len();

        if !failures.is_empty() {
            warn!(
                failed = failures.len(),
                succeeded,
                "stress campaign failed; results will not be aggregated"
            );
            return Err(CampaignFailure {
                total: concurrency,
                succeeded,
                failures,
            }
            .into());
        }

        self.runs = run_set.into_records();
        self.ready = true;

        info!(runs = self.runs.len(), "stress campaign complete");
        Ok(())
    }
}

/// Everything one spawned run needs, owned so the task is `'static`.
struct RunUnit<E: LoadExecutor> {
    index: usize,
    duration: DurationSpec,
    target: Arc<str>,
    executor: Arc<E>,
    extractor: Arc<MetricExtractor>,
    run_set: RunSet,
}

impl<E: LoadExecutor> RunUnit<E> {
    async fn run(self) -> std::result::Result<(), UnitError> {
        let run = self.index + 1;
        debug!(run, duration = %self.duration, "stress run started");

        let start_time = Local::now();
        let raw = self.executor.run_load(&self.target, &self.duration).await?;
        let end_time = Local::now();

        let metrics = self.extractor.extract(&raw)?;
        let record = RunRecord::new(metrics, start_time, end_time);

        debug!(
            run,
            op_rate = metrics.op_rate,
            elapsed_secs = record.duration().as_secs_f64(),
            "stress run finished"
        );

        self.run_set.append(record);
        Ok(())
    }
}
