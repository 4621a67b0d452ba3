// src/errors.rs

//! Crate-wide error types.
//!
//! - [`StressError`] is what the public API returns.
//! - [`ExecutionError`] and [`ExtractionError`] describe why a single run
//!   failed; the orchestrator captures them per unit as [`UnitFailure`]s and
//!   surfaces them together as a [`CampaignFailure`] after the join barrier.

use std::fmt;

use thiserror::Error;

use crate::types::DurationSpec;

#[derive(Error, Debug)]
pub enum StressError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("cannot compute {query}: campaign results are not available")]
    NotReady { query: &'static str },

    #[error("cannot compute {query}: needs at least {required} runs, got {found}")]
    InsufficientData {
        query: &'static str,
        required: usize,
        found: usize,
    },

    #[error(transparent)]
    Campaign(#[from] CampaignFailure),

    #[error("campaign already executed; create a new orchestrator per campaign")]
    AlreadyExecuted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StressError>;

/// Failure of the external load tool.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading load process output: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for load process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },

    #[error("load process exited with {status}: {stderr}", status = exit_code_label(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("load process wrote non UTF-8 output")]
    InvalidUtf8,
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// The report text did not match the expected `<label> : <number>` grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("field '{field}' not found (expected a line '{label} : <number>')")]
    MissingField {
        field: &'static str,
        label: &'static str,
    },

    #[error("field '{field}' has non-numeric value '{text}'")]
    InvalidNumber { field: &'static str, text: String },
}

/// Why a single unit of work failed.
#[derive(Error, Debug)]
pub enum UnitError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("run task panicked: {0}")]
    Panicked(String),
}

/// A failed unit, tagged with its position in the campaign.
#[derive(Debug)]
pub struct UnitFailure {
    pub index: usize,
    pub duration: DurationSpec,
    pub error: UnitError,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {} (duration={}): {}",
            self.index + 1,
            self.duration,
            self.error
        )
    }
}

/// All failures of one campaign, reported after every unit has joined.
#[derive(Debug)]
pub struct CampaignFailure {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<UnitFailure>,
}

impl fmt::Display for CampaignFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} stress runs failed",
            self.failures.len(),
            self.total
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CampaignFailure {}
