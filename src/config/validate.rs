// src/config/validate.rs

use crate::config::model::{CampaignSection, ConfigFile, RawConfigFile, StressSection};
use crate::errors::{Result, StressError};
use crate::types::DurationSpec;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StressError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_stress_section(&raw.stress)?;
        let campaign = validate_campaign_section(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.stress, campaign))
    }
}

fn validate_stress_section(stress: &StressSection) -> Result<()> {
    let required = [
        ("runtime", &stress.runtime),
        ("image", &stress.image),
        ("entrypoint", &stress.entrypoint),
        ("workload", &stress.workload),
    ];

    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(StressError::Config(format!(
                "[stress].{key} must not be empty"
            )));
        }
    }

    if stress.threads == 0 {
        return Err(StressError::Config(
            "[stress].threads must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_campaign_section(raw: &RawConfigFile) -> Result<CampaignSection> {
    let default_duration: DurationSpec = raw
        .campaign
        .default_duration
        .parse()
        .map_err(|e| StressError::Config(format!("[campaign].default_duration: {e}")))?;

    if raw.campaign.results_marker.is_empty() {
        return Err(StressError::Config(
            "[campaign].results_marker must not be empty".to_string(),
        ));
    }

    Ok(CampaignSection {
        default_duration,
        results_marker: raw.campaign.results_marker.clone(),
    })
}
