// src/config/mod.rs

//! Configuration for stressfan.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate raw values into a `ConfigFile` (`validate.rs`).
//! - Match the requested run durations to the concurrency level (`plan.rs`).

pub mod loader;
pub mod model;
pub mod plan;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{CampaignSection, ConfigFile, RawCampaignSection, RawConfigFile, StressSection};
pub use plan::{DurationPlan, plan_durations};
