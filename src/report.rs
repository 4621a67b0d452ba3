// src/report.rs

//! Human-readable campaign report printed on stdout.

use std::fmt::Write;

use crate::engine::{CampaignSummary, RunRecord};

/// Render the per-run timings followed by the aggregate statistics.
pub fn render(runs: &[RunRecord], summary: &CampaignSummary) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Number of Cassandra Stress tests: {}", runs.len());
    for (i, run) in runs.iter().enumerate() {
        let _ = writeln!(
            out,
            "Cassandra Stress test {} started at: {}, ended at: {}, and total duration is: {:.3}s",
            i + 1,
            run.start_time().format("%H:%M:%S"),
            run.end_time().format("%H:%M:%S"),
            run.duration().as_secs_f64(),
        );
    }

    let _ = writeln!(out, "Aggregation of Op rate: {}", summary.total_op_rate);
    let _ = writeln!(out, "Average of Latency mean: {}", summary.mean_latency);
    let _ = writeln!(
        out,
        "Average of Latency 99th percentile: {}",
        summary.mean_p99_latency
    );
    match summary.stdev_max_latency {
        Some(stdev) => {
            let _ = writeln!(
                out,
                "Standard deviation calculation of all Latency max results: {stdev}"
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Standard deviation calculation of all Latency max results: n/a (needs at least 2 runs)"
            );
        }
    }

    out
}
