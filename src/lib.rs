// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod extract;
pub mod logging;
pub mod report;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, DurationPlan, load_or_default, plan_durations};
use crate::engine::Orchestrator;
use crate::exec::StressCommand;
use crate::extract::MetricExtractor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - duration planning (one duration per run)
/// - the container-backed load executor
/// - the campaign orchestrator and aggregation
/// - the stdout report
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let concurrency = args.concurrency as usize;

    let plan = plan_durations(
        args.durations.as_slice(),
        concurrency,
        cfg.campaign.default_duration,
    )?;
    let command = StressCommand::new(cfg.stress.clone());

    if args.dry_run {
        print_dry_run(&args.target, &cfg, &plan, &command);
        return Ok(());
    }

    let extractor = MetricExtractor::new(cfg.campaign.results_marker.clone())?;
    let mut orchestrator = Orchestrator::new(command, extractor);

    orchestrator
        .execute(&args.target, concurrency, &plan.durations)
        .await?;

    let summary = orchestrator.aggregator().summary()?;
    info!(
        runs = summary.runs,
        total_op_rate = summary.total_op_rate,
        "campaign aggregated"
    );

    print!("{}", report::render(orchestrator.runs(), &summary));
    Ok(())
}

/// Print the resolved plan and the exact command of every run.
fn print_dry_run(target: &str, cfg: &ConfigFile, plan: &DurationPlan, command: &StressCommand) {
    println!("stressfan dry-run");
    println!("  target = {target}");
    println!("  concurrency = {}", plan.durations.len());
    println!("  campaign.default_duration = {}", cfg.campaign.default_duration);
    println!("  campaign.results_marker = {:?}", cfg.campaign.results_marker);
    if plan.padded > 0 {
        println!("  padded {} run(s) with the default duration", plan.padded);
    }
    if plan.truncated > 0 {
        println!("  ignored {} extra duration(s)", plan.truncated);
    }
    println!();

    println!("runs ({}):", plan.durations.len());
    for (i, duration) in plan.durations.iter().enumerate() {
        println!("  {}. {}", i + 1, command.command_line(target, duration));
    }

    debug!("dry-run complete (no execution)");
}
