// src/extract/mod.rs

//! Metric extraction from the load tool's text report.
//!
//! The report is semi-structured human-readable output such as:
//!
//! ```text
//! Results:
//! Op rate                   :   14,987 op/s  [WRITE: 14,987 op/s]
//! Latency mean              :    0.6 ms [WRITE: 0.6 ms]
//! Latency 99th percentile   :    1.4 ms [WRITE: 1.4 ms]
//! Latency max               :   49.2 ms [WRITE: 49.2 ms]
//! ```
//!
//! Everything before the results marker is discarded. Each field in
//! [`METRIC_FIELDS`] is then located independently (so field order does not
//! matter) by a case-insensitive `<label> : <number>` line match. Extraction
//! is all-or-nothing: the first field that is missing or malformed fails the
//! whole report.

pub mod fields;

use regex::Regex;
use tracing::{debug, trace};

use crate::errors::{ExtractionError, Result, StressError};

pub use fields::{FieldSpec, METRIC_FIELDS, MetricField};

/// Marker line that opens the summary section of a stress report.
pub const DEFAULT_RESULTS_MARKER: &str = "Results:";

/// Numbers extracted from one stress report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord {
    /// Operations per second.
    pub op_rate: f64,
    pub latency_mean: f64,
    pub latency_99th_percentile: f64,
    pub latency_max: f64,
}

impl MetricRecord {
    pub fn get(&self, field: MetricField) -> f64 {
        match field {
            MetricField::OpRate => self.op_rate,
            MetricField::LatencyMean => self.latency_mean,
            MetricField::Latency99thPercentile => self.latency_99th_percentile,
            MetricField::LatencyMax => self.latency_max,
        }
    }
}

/// Compiled line pattern for one field.
#[derive(Debug, Clone)]
struct FieldPattern {
    spec: &'static FieldSpec,
    regex: Regex,
}

/// Turns raw report text into a [`MetricRecord`].
///
/// Cheap to share: build once per campaign and hand an `Arc` to each run.
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    marker: String,
    patterns: Vec<FieldPattern>,
}

impl MetricExtractor {
    /// Build an extractor that starts reading at the first occurrence of
    /// `marker`.
    pub fn new(marker: impl Into<String>) -> Result<Self> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(StressError::Config(
                "results marker must not be empty".to_string(),
            ));
        }

        let patterns = METRIC_FIELDS
            .iter()
            .map(|spec| {
                // Capture the whole whitespace-delimited token: `5.5ms` and
                // `1e3` must fail, not parse as a numeric prefix.
                let pattern = format!(
                    r"(?im)^[ \t]*{}[ \t]*:[ \t]*(\S*)",
                    regex::escape(spec.label)
                );
                Regex::new(&pattern)
                    .map(|regex| FieldPattern { spec, regex })
                    .map_err(|e| {
                        StressError::Other(anyhow::anyhow!(
                            "building pattern for field '{}': {e}",
                            spec.name
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { marker, patterns })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Extract all metrics from `raw`.
    pub fn extract(&self, raw: &str) -> std::result::Result<MetricRecord, ExtractionError> {
        let section = self.results_section(raw);

        Ok(MetricRecord {
            op_rate: self.find(section, MetricField::OpRate)?,
            latency_mean: self.find(section, MetricField::LatencyMean)?,
            latency_99th_percentile: self.find(section, MetricField::Latency99thPercentile)?,
            latency_max: self.find(section, MetricField::LatencyMax)?,
        })
    }

    fn results_section<'a>(&self, raw: &'a str) -> &'a str {
        match raw.find(&self.marker) {
            Some(start) => &raw[start..],
            None => {
                debug!(marker = %self.marker, "results marker not found in report");
                ""
            }
        }
    }

    fn find(&self, section: &str, field: MetricField) -> std::result::Result<f64, ExtractionError> {
        let spec = field.spec();
        let pattern = self
            .patterns
            .iter()
            .find(|p| p.spec.field == field)
            .ok_or(ExtractionError::MissingField {
                field: spec.name,
                label: spec.label,
            })?;

        let text = pattern
            .regex
            .captures(section)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or(ExtractionError::MissingField {
                field: spec.name,
                label: spec.label,
            })?;

        let value = parse_number(text).ok_or_else(|| ExtractionError::InvalidNumber {
            field: spec.name,
            text: text.to_string(),
        })?;

        trace!(field = spec.name, value, "extracted metric");
        Ok(value)
    }
}

/// Parse `1,234.5`-style numbers: digits, optional thousands separators and at
/// most one decimal point. Values too large for an `f64` are rejected.
fn parse_number(text: &str) -> Option<f64> {
    let valid_chars = text.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.');
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let decimal_points = text.chars().filter(|&c| c == '.').count();

    if !valid_chars || !has_digit || decimal_points > 1 {
        return None;
    }

    text.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
