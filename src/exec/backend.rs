// src/exec/backend.rs

//! Pluggable load executor abstraction.
//!
//! Each unit of work calls [`LoadExecutor::run_load`] once and blocks (in the
//! async sense) for the whole run. Implementations must be shareable across
//! the campaign's concurrent units, hence `Send + Sync + 'static`.

use std::future::Future;
use std::pin::Pin;

use crate::errors::ExecutionError;
use crate::types::DurationSpec;

/// Boxed future returned by [`LoadExecutor::run_load`].
pub type LoadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, ExecutionError>> + Send + 'a>>;

/// Runs one invocation of the external load tool against `target` and
/// returns its captured report text.
///
/// Production code uses [`super::StressCommand`]; tests provide an
/// implementation that returns canned reports without spawning processes.
pub trait LoadExecutor: Send + Sync + 'static {
    fn run_load<'a>(&'a self, target: &'a str, duration: &'a DurationSpec) -> LoadFuture<'a>;
}
