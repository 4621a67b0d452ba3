#![allow(dead_code)]

use std::collections::HashMap;

use stressfan::extract::{METRIC_FIELDS, MetricField};

/// Builder for cassandra-stress style report text.
///
/// Defaults to a complete, well-formed report. Individual fields can be
/// overridden with arbitrary text, removed, or relabelled to exercise the
/// extractor's failure paths.
pub struct ReportBuilder {
    values: HashMap<MetricField, String>,
    labels: HashMap<MetricField, String>,
    marker: String,
    preamble: Vec<String>,
    field_order: Vec<MetricField>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        let values = HashMap::from([
            (MetricField::OpRate, "14,987".to_string()),
            (MetricField::LatencyMean, "0.6".to_string()),
            (MetricField::Latency99thPercentile, "1.4".to_string()),
            (MetricField::LatencyMax, "49.2".to_string()),
        ]);
        let labels = METRIC_FIELDS
            .iter()
            .map(|spec| (spec.field, title_case(spec.label)))
            .collect();

        Self {
            values,
            labels,
            marker: "Results:".to_string(),
            preamble: vec![
                "******************** Stress Settings ********************".to_string(),
                "Command:".to_string(),
                "  Type: write".to_string(),
                "  Duration: 10 SECONDS".to_string(),
                String::new(),
                "type       total ops,    op/s,    pk/s,   row/s,    mean,     med,     .95,     .99,    .999,     max,   time".to_string(),
                "total,         14511,   14511,   14511,   14511,     0.6,     0.5,     1.0,     1.4,     3.1,    49.2,    1.0".to_string(),
            ],
            field_order: METRIC_FIELDS.iter().map(|s| s.field).collect(),
        }
    }

    /// Report with the given numbers, formatted the way the tool prints them.
    pub fn with_values(op_rate: f64, mean: f64, p99: f64, max: f64) -> Self {
        Self::new()
            .value(MetricField::OpRate, &format!("{op_rate}"))
            .value(MetricField::LatencyMean, &format!("{mean}"))
            .value(MetricField::Latency99thPercentile, &format!("{p99}"))
            .value(MetricField::LatencyMax, &format!("{max}"))
    }

    pub fn value(mut self, field: MetricField, text: &str) -> Self {
        self.values.insert(field, text.to_string());
        self
    }

    pub fn label(mut self, field: MetricField, label: &str) -> Self {
        self.labels.insert(field, label.to_string());
        self
    }

    pub fn without(mut self, field: MetricField) -> Self {
        self.field_order.retain(|f| *f != field);
        self
    }

    pub fn order(mut self, order: &[MetricField]) -> Self {
        self.field_order = order.to_vec();
        self
    }

    pub fn marker(mut self, marker: &str) -> Self {
        self.marker = marker.to_string();
        self
    }

    pub fn preamble_line(mut self, line: &str) -> Self {
        self.preamble.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.marker);
        out.push('\n');

        for field in &self.field_order {
            let label = &self.labels[field];
            let value = &self.values[field];
            let unit = if *field == MetricField::OpRate { "op/s" } else { "ms" };
            out.push_str(&format!(
                "{label:<26}: {value:>8} {unit} [WRITE: {value} {unit}]\n"
            ));
            if *field == MetricField::LatencyMean {
                out.push_str("Latency median            :      0.5 ms [WRITE: 0.5 ms]\n");
            }
        }

        out.push_str("Total partitions          :  149,870 [WRITE: 149,870]\n");
        out.push_str("Total errors              :        0 [WRITE: 0]\n");
        out.push_str("Total operation time      : 00:00:10\n");
        out.push_str("\nEND\n");
        out
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
