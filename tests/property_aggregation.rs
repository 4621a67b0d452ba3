// tests/property_aggregation.rs

use proptest::prelude::*;

use stressfan::engine::{Aggregator, Orchestrator};
use stressfan::extract::{DEFAULT_RESULTS_MARKER, METRIC_FIELDS, MetricExtractor, MetricField, MetricRecord};
use stressfan::types::DurationSpec;
use stressfan_test_utils::builders::ReportBuilder;
use stressfan_test_utils::fake_executor::ScriptedExecutor;

fn metric_strategy() -> impl Strategy<Value = MetricRecord> {
    (0.0..1e6f64, 0.0..1e3f64, 0.0..1e4f64, 0.0..1e5f64).prop_map(
        |(op_rate, latency_mean, latency_99th_percentile, latency_max)| MetricRecord {
            op_rate,
            latency_mean,
            latency_99th_percentile,
            latency_max,
        },
    )
}

// A run list together with a shuffled copy of itself.
fn runs_and_permutation() -> impl Strategy<Value = (Vec<MetricRecord>, Vec<MetricRecord>)> {
    proptest::collection::vec(metric_strategy(), 0..16)
        .prop_flat_map(|runs| (Just(runs.clone()), Just(runs).prop_shuffle()))
}

/// Execute a campaign where run `i` (duration `i + 1` seconds) reports
/// `metrics[i]`, then hand its aggregator to `query`.
fn with_campaign<T>(metrics: &[MetricRecord], query: impl FnOnce(Aggregator<'_>) -> T) -> T {
    let mut executor = ScriptedExecutor::new("no report scripted for this run");
    let mut durations = Vec::with_capacity(metrics.len());
    for (i, m) in metrics.iter().enumerate() {
        let duration = DurationSpec::seconds(i as u64 + 1);
        let report = ReportBuilder::with_values(
            m.op_rate,
            m.latency_mean,
            m.latency_99th_percentile,
            m.latency_max,
        );
        executor = executor.report_for(&duration.to_string(), report.build());
        durations.push(duration);
    }

    let extractor = MetricExtractor::new(DEFAULT_RESULTS_MARKER).unwrap();
    let mut orch = Orchestrator::new(executor, extractor);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(orch.execute("node", durations.len(), &durations))
        .unwrap();

    query(orch.aggregator())
}

fn all_stats(metrics: &[MetricRecord]) -> [Option<f64>; 4] {
    with_campaign(metrics, |agg| {
        [
            agg.total_op_rate().ok(),
            agg.mean_latency().ok(),
            agg.mean_p99_latency().ok(),
            agg.stdev_max_latency().ok(),
        ]
    })
}

fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn aggregation_ignores_run_order((original, shuffled) in runs_and_permutation()) {
        let a = all_stats(&original);
        let b = all_stats(&shuffled);

        for (x, y) in a.iter().zip(b.iter()) {
            match (x, y) {
                (Some(x), Some(y)) => prop_assert_eq!(x.to_bits(), y.to_bits()),
                (None, None) => {}
                _ => prop_assert!(false, "query succeeded for one order only: {:?} vs {:?}", a, b),
            }
        }
    }

    #[test]
    fn stdev_needs_two_runs(runs in proptest::collection::vec(metric_strategy(), 0..5)) {
        let stdev = with_campaign(&runs, |agg| agg.stdev_max_latency());
        prop_assert_eq!(stdev.is_ok(), runs.len() >= 2);
        if let Ok(v) = stdev {
            prop_assert!(v >= 0.0);
        }
    }

    #[test]
    fn total_op_rate_is_sum_of_runs(runs in proptest::collection::vec(metric_strategy(), 1..10)) {
        let expected: f64 = runs.iter().map(|m| m.op_rate).sum();
        let total = with_campaign(&runs, |agg| agg.total_op_rate()).unwrap();
        prop_assert!((total - expected).abs() <= 1e-6 * expected.max(1.0));
    }

    #[test]
    fn extraction_reads_any_order_and_case(
        ints in proptest::array::uniform4(0u64..10_000_000),
        fracs in proptest::array::uniform4(0u32..1000),
        order in Just(METRIC_FIELDS.iter().map(|s| s.field).collect::<Vec<_>>()).prop_shuffle(),
        upper in proptest::array::uniform4(any::<bool>()),
    ) {
        let mut builder = ReportBuilder::new().order(&order);
        let mut expected = [0.0f64; 4];

        for (i, spec) in METRIC_FIELDS.iter().enumerate() {
            let text = format!("{}.{:03}", with_thousands(ints[i]), fracs[i]);
            expected[i] = format!("{}.{:03}", ints[i], fracs[i]).parse().unwrap();
            builder = builder.value(spec.field, &text);
            if upper[i] {
                builder = builder.label(spec.field, &spec.label.to_uppercase());
            }
        }

        let record = MetricExtractor::new(DEFAULT_RESULTS_MARKER)
            .unwrap()
            .extract(&builder.build())
            .unwrap();

        prop_assert_eq!(record.get(MetricField::OpRate), expected[0]);
        prop_assert_eq!(record.get(MetricField::LatencyMean), expected[1]);
        prop_assert_eq!(record.get(MetricField::Latency99thPercentile), expected[2]);
        prop_assert_eq!(record.get(MetricField::LatencyMax), expected[3]);
    }
}
