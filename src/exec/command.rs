// src/exec/command.rs

//! Production load executor: one containerised load tool process per run.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::StressSection;
use crate::errors::ExecutionError;
use crate::types::DurationSpec;

use super::backend::{LoadExecutor, LoadFuture};

/// Launches the load tool through a container runtime, e.g.
///
/// ```text
/// docker run --rm --entrypoint cassandra-stress scylladb/cassandra-stress \
///     write duration=10s -rate threads=10 -node 10.0.0.5
/// ```
#[derive(Debug, Clone)]
pub struct StressCommand {
    settings: StressSection,
}

impl StressCommand {
    pub fn new(settings: StressSection) -> Self {
        Self { settings }
    }

    /// Program that gets spawned (the container runtime).
    pub fn program(&self) -> &str {
        &self.settings.runtime
    }

    /// Arguments passed to [`Self::program`] for one run.
    pub fn args(&self, target: &str, duration: &DurationSpec) -> Vec<String> {
        let s = &self.settings;
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--entrypoint".to_string(),
            s.entrypoint.clone(),
            s.image.clone(),
            s.workload.clone(),
            format!("duration={duration}"),
            "-rate".to_string(),
            format!("threads={}", s.threads),
            "-node".to_string(),
            target.to_string(),
        ];
        args.extend(s.extra_args.iter().cloned());
        args
    }

    /// Full command line as a single string, for `--dry-run` output and logs.
    pub fn command_line(&self, target: &str, duration: &DurationSpec) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.args(target, duration));
        parts.join(" ")
    }

    async fn run(&self, target: &str, duration: &DurationSpec) -> Result<String, ExecutionError> {
        info!(
            target = %target,
            duration = %duration,
            cmd = %self.command_line(target, duration),
            "starting load process"
        );

        let mut child = Command::new(self.program())
            .args(self.args(target, duration))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: self.program().to_string(),
                source,
            })?;

        // Drain stderr concurrently so a chatty process can't block on a full
        // pipe while we are still reading stdout.
        let stderr_task = child.stderr.take().map(|stderr| {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                let mut captured = Vec::new();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("stderr: {}", line);
                    captured.push(line);
                }
                captured.join("\n")
            })
        });

        // Never extract from a partially read report.
        let mut stdout = Vec::new();
        if let Some(mut out) = child.stdout.take() {
            out.read_to_end(&mut stdout)
                .await
                .map_err(|source| ExecutionError::Read { source })?;
        }

        let status = child
            .wait()
            .await
            .map_err(|source| ExecutionError::Wait { source })?;

        let stderr = match stderr_task {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                warn!(error = %e, "stderr reader task failed; stderr not captured");
                String::new()
            }),
            None => String::new(),
        };

        info!(
            target = %target,
            duration = %duration,
            exit_code = status.code().unwrap_or(-1),
            success = status.success(),
            "load process exited"
        );

        if !status.success() {
            return Err(ExecutionError::NonZeroExit {
                code: status.code(),
                stderr,
            });
        }

        String::from_utf8(stdout).map_err(|_| ExecutionError::InvalidUtf8)
    }
}

impl LoadExecutor for StressCommand {
    fn run_load<'a>(&'a self, target: &'a str, duration: &'a DurationSpec) -> LoadFuture<'a> {
        Box::pin(self.run(target, duration))
    }
}
