// src/config/model.rs

use serde::Deserialize;

use crate::extract::DEFAULT_RESULTS_MARKER;
use crate::types::DurationSpec;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [stress]
/// runtime = "docker"
/// image = "scylladb/cassandra-stress"
/// entrypoint = "cassandra-stress"
/// workload = "write"
/// threads = 10
///
/// [campaign]
/// default_duration = "10s"
/// results_marker = "Results:"
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub stress: StressSection,

    #[serde(default)]
    pub campaign: RawCampaignSection,
}

/// `[stress]` section: how one run of the load tool is launched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StressSection {
    /// Container runtime binary.
    #[serde(default = "default_runtime")]
    pub runtime: String,

    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    /// Load tool command, e.g. `write`, `read` or `mixed`.
    #[serde(default = "default_workload")]
    pub workload: String,

    /// Client threads per run (`-rate threads=N`).
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Appended verbatim after the generated arguments.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_runtime() -> String {
    "docker".to_string()
}

fn default_image() -> String {
    "scylladb/cassandra-stress".to_string()
}

fn default_entrypoint() -> String {
    "cassandra-stress".to_string()
}

fn default_workload() -> String {
    "write".to_string()
}

fn default_threads() -> u32 {
    10
}

impl Default for StressSection {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            image: default_image(),
            entrypoint: default_entrypoint(),
            workload: default_workload(),
            threads: default_threads(),
            extra_args: Vec::new(),
        }
    }
}

/// `[campaign]` section as written in TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCampaignSection {
    /// Duration used for runs the command line did not give one.
    #[serde(default = "default_duration")]
    pub default_duration: String,

    #[serde(default = "default_results_marker")]
    pub results_marker: String,
}

fn default_duration() -> String {
    DurationSpec::default().to_string()
}

fn default_results_marker() -> String {
    DEFAULT_RESULTS_MARKER.to_string()
}

impl Default for RawCampaignSection {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            results_marker: default_results_marker(),
        }
    }
}

/// Validated `[campaign]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSection {
    pub default_duration: DurationSpec,
    pub results_marker: String,
}

impl Default for CampaignSection {
    fn default() -> Self {
        Self {
            default_duration: DurationSpec::default(),
            results_marker: default_results_marker(),
        }
    }
}

/// Validated configuration. Build one with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub stress: StressSection,
    pub campaign: CampaignSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(stress: StressSection, campaign: CampaignSection) -> Self {
        Self { stress, campaign }
    }
}
