// src/engine/mod.rs

//! Campaign engine: fan out N stress runs, fan their results back in, and
//! compute summary statistics once every run has finished.
//!
//! - [`run_set`] holds the per-run value type and the lock-protected
//!   collection the concurrent runs append to.
//! - [`orchestrator`] spawns the runs, joins them all, and owns the
//!   readiness flag.
//! - [`aggregator`] answers the statistics queries, refusing to do so until
//!   the campaign is ready.

pub mod aggregator;
pub mod orchestrator;
pub mod run_set;

pub use aggregator::{Aggregator, CampaignSummary};
pub use orchestrator::Orchestrator;
pub use run_set::{RunRecord, RunSet};
