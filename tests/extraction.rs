// tests/extraction.rs

use std::error::Error;

use stressfan::errors::{ExtractionError, StressError};
use stressfan::extract::{
    DEFAULT_RESULTS_MARKER, METRIC_FIELDS, MetricExtractor, MetricField, MetricRecord,
};
use stressfan_test_utils::builders::ReportBuilder;

type TestResult = Result<(), Box<dyn Error>>;

fn extractor() -> MetricExtractor {
    MetricExtractor::new(DEFAULT_RESULTS_MARKER).unwrap()
}

#[test]
fn extracts_minimal_report() -> TestResult {
    let raw = "Results:\nOp rate : 1,234 op/s\nLatency mean : 5.5 ms\nLatency 99th percentile : 12.0 ms\nLatency max : 50.0 ms\n";

    let record = extractor().extract(raw)?;

    assert_eq!(
        record,
        MetricRecord {
            op_rate: 1234.0,
            latency_mean: 5.5,
            latency_99th_percentile: 12.0,
            latency_max: 50.0,
        }
    );
    Ok(())
}

#[test]
fn extracts_full_tool_report() -> TestResult {
    let raw = ReportBuilder::new().build();

    let record = extractor().extract(&raw)?;

    assert_eq!(record.op_rate, 14987.0);
    assert_eq!(record.latency_mean, 0.6);
    assert_eq!(record.latency_99th_percentile, 1.4);
    assert_eq!(record.latency_max, 49.2);
    Ok(())
}

#[test]
fn field_order_and_label_case_do_not_matter() -> TestResult {
    let raw = ReportBuilder::with_values(7.0, 1.5, 3.25, 99.0)
        .order(&[
            MetricField::LatencyMax,
            MetricField::Latency99thPercentile,
            MetricField::OpRate,
            MetricField::LatencyMean,
        ])
        .label(MetricField::OpRate, "OP RATE")
        .label(MetricField::LatencyMax, "latency MAX")
        .build();

    let record = extractor().extract(&raw)?;

    assert_eq!(record.op_rate, 7.0);
    assert_eq!(record.latency_mean, 1.5);
    assert_eq!(record.latency_99th_percentile, 3.25);
    assert_eq!(record.latency_max, 99.0);
    Ok(())
}

#[test]
fn each_missing_field_fails_extraction() {
    for spec in METRIC_FIELDS {
        let raw = ReportBuilder::new().without(spec.field).build();

        let err = extractor().extract(&raw).unwrap_err();

        assert_eq!(
            err,
            ExtractionError::MissingField {
                field: spec.name,
                label: spec.label,
            }
        );
    }
}

#[test]
fn non_numeric_value_fails_extraction() {
    let raw = ReportBuilder::new()
        .value(MetricField::LatencyMean, "NaN")
        .build();

    let err = extractor().extract(&raw).unwrap_err();

    assert_eq!(
        err,
        ExtractionError::InvalidNumber {
            field: "latency_mean",
            text: "NaN".to_string(),
        }
    );
}

#[test]
fn malformed_numbers_are_rejected_not_truncated() {
    for bad in ["1.2.3", "5.5ms", "1e3", ",", "-4.0", "12a"] {
        let raw = ReportBuilder::new().value(MetricField::LatencyMax, bad).build();

        match extractor().extract(&raw) {
            Err(ExtractionError::InvalidNumber { field, text }) => {
                assert_eq!(field, "latency_max");
                assert_eq!(text, bad);
            }
            other => panic!("expected InvalidNumber for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn value_overflowing_f64_is_invalid_number() {
    let huge = "9".repeat(400);
    let raw = ReportBuilder::new().value(MetricField::OpRate, &huge).build();

    match extractor().extract(&raw) {
        Err(ExtractionError::InvalidNumber { field, text }) => {
            assert_eq!(field, "op_rate");
            assert_eq!(text, huge);
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }
}

#[test]
fn largest_finite_values_still_parse() -> TestResult {
    let big = "9".repeat(300);
    let raw = ReportBuilder::new().value(MetricField::LatencyMax, &big).build();

    let record = extractor().extract(&raw)?;

    assert!(record.latency_max.is_finite());
    assert!(record.latency_max > 1e299);
    Ok(())
}

#[test]
fn empty_value_is_invalid_number() {
    let raw = "Results:\nOp rate :\nLatency mean : 1\nLatency 99th percentile : 2\nLatency max : 3\n";

    let err = extractor().extract(raw).unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::InvalidNumber { field: "op_rate", .. }
    ));
}

#[test]
fn missing_marker_fails_every_field_search() {
    let raw = ReportBuilder::new().marker("Summary:").build();

    let err = extractor().extract(&raw).unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::MissingField { field: "op_rate", .. }
    ));
}

#[test]
fn text_before_marker_is_ignored() -> TestResult {
    let raw = ReportBuilder::with_values(10.0, 1.0, 2.0, 3.0)
        .preamble_line("Op rate                   :        1 op/s")
        .build();

    let record = extractor().extract(&raw)?;

    assert_eq!(record.op_rate, 10.0);
    Ok(())
}

#[test]
fn latency_median_is_not_mistaken_for_mean() -> TestResult {
    let raw = "Results:\nOp rate : 1\nLatency median : 9.9 ms\nLatency mean : 0.7 ms\nLatency 99th percentile : 2\nLatency 99.9th percentile : 8\nLatency max : 3\n";

    let record = extractor().extract(raw)?;

    assert_eq!(record.latency_mean, 0.7);
    assert_eq!(record.latency_99th_percentile, 2.0);
    Ok(())
}

#[test]
fn custom_marker_is_honoured() -> TestResult {
    let raw = ReportBuilder::with_values(5.0, 1.0, 2.0, 3.0)
        .marker("=== SUMMARY ===")
        .build();

    let record = MetricExtractor::new("=== SUMMARY ===")?.extract(&raw)?;

    assert_eq!(record.op_rate, 5.0);
    Ok(())
}

#[test]
fn empty_marker_is_a_config_error() {
    let err = MetricExtractor::new("").unwrap_err();
    assert!(matches!(err, StressError::Config(_)));
}

#[test]
fn labels_are_field_names_with_spaces() {
    for spec in METRIC_FIELDS {
        assert_eq!(spec.label, spec.name.replace('_', " "));
        assert_eq!(spec.field.name(), spec.name);
        assert_eq!(spec.field.label(), spec.label);
    }
}
