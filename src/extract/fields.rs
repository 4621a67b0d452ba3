// src/extract/fields.rs

//! Static table of the metrics pulled out of a stress report.
//!
//! Each entry pairs the canonical field name with the label text the load
//! tool prints for it. Labels are written out here rather than derived from
//! the record type so that renaming a struct field can never change what the
//! parser searches for.

use std::fmt;

/// One of the numbers extracted from a stress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    OpRate,
    LatencyMean,
    Latency99thPercentile,
    LatencyMax,
}

/// Canonical name and on-the-wire label for one [`MetricField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: MetricField,
    pub name: &'static str,
    pub label: &'static str,
}

pub static METRIC_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        field: MetricField::OpRate,
        name: "op_rate",
        label: "op rate",
    },
    FieldSpec {
        field: MetricField::LatencyMean,
        name: "latency_mean",
        label: "latency mean",
    },
    FieldSpec {
        field: MetricField::Latency99thPercentile,
        name: "latency_99th_percentile",
        label: "latency 99th percentile",
    },
    FieldSpec {
        field: MetricField::LatencyMax,
        name: "latency_max",
        label: "latency max",
    },
];

impl MetricField {
    pub fn spec(self) -> &'static FieldSpec {
        match self {
            MetricField::OpRate => &METRIC_FIELDS[0],
            MetricField::LatencyMean => &METRIC_FIELDS[1],
            MetricField::Latency99thPercentile => &METRIC_FIELDS[2],
            MetricField::LatencyMax => &METRIC_FIELDS[3],
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
