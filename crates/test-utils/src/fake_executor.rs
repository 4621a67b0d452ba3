use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use stressfan::errors::ExecutionError;
use stressfan::exec::{LoadExecutor, LoadFuture};
use stressfan::types::DurationSpec;

/// What a scripted run does.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Return this report text.
    Report(String),
    /// Fail as if the process exited with `code`.
    Fail { code: i32, stderr: String },
    /// Panic inside the run task.
    Panic,
}

/// A fake load executor that:
/// - returns a scripted outcome per run duration (or a fallback)
/// - records every call
/// - tracks how many runs were in flight at the same time.
#[derive(Debug)]
pub struct ScriptedExecutor {
    scripts: HashMap<DurationSpec, Scripted>,
    fallback: Scripted,
    delay: Duration,
    calls: Mutex<Vec<(String, DurationSpec)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedExecutor {
    /// Every run returns `report` unless scripted otherwise.
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: Scripted::Report(report.into()),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn on(mut self, duration: &str, outcome: Scripted) -> Self {
        let spec: DurationSpec = duration.parse().expect("valid test duration");
        self.scripts.insert(spec, outcome);
        self
    }

    pub fn report_for(self, duration: &str, report: impl Into<String>) -> Self {
        self.on(duration, Scripted::Report(report.into()))
    }

    pub fn fail_for(self, duration: &str, stderr: &str) -> Self {
        self.on(
            duration,
            Scripted::Fail {
                code: 1,
                stderr: stderr.to_string(),
            },
        )
    }

    /// Hold every run open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(String, DurationSpec)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl LoadExecutor for ScriptedExecutor {
    fn run_load<'a>(&'a self, target: &'a str, duration: &'a DurationSpec) -> LoadFuture<'a> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((target.to_string(), *duration));

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            debug!(target = %target, duration = %duration, "scripted load run answered");

            match self.scripts.get(duration).unwrap_or(&self.fallback) {
                Scripted::Report(report) => Ok(report.clone()),
                Scripted::Fail { code, stderr } => Err(ExecutionError::NonZeroExit {
                    code: Some(*code),
                    stderr: stderr.clone(),
                }),
                Scripted::Panic => panic!("scripted executor panic for duration {duration}"),
            }
        })
    }
}
