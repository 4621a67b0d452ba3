// src/exec/mod.rs

//! External load execution.
//!
//! The orchestrator never launches processes itself; it asks a
//! [`LoadExecutor`] for the raw report text of one run.
//!
//! - [`backend`] defines the `LoadExecutor` trait, which tests replace with a
//!   scripted fake.
//! - [`command`] provides `StressCommand`, the production implementation that
//!   runs the load tool inside a container via `tokio::process::Command`.

pub mod backend;
pub mod command;

pub use backend::{LoadExecutor, LoadFuture};
pub use command::StressCommand;
