//! FeastGuard CLI
//!
//! Loads events and recipients from JSON, runs the workflow, prints the trace
//! and results, and writes the results export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::de::DeserializeOwned;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feastguard_core::config::Config;
use feastguard_core::domains::intake::utils::{parse_records, select_top_events};
use feastguard_core::domains::outreach::utils::format_message_for_display;
use feastguard_core::kernel::WorkflowDeps;
use feastguard_core::workflow::{Orchestrator, ResultsExport, WorkflowState, WorkflowSummary};

#[derive(Parser)]
#[command(name = "feastguard")]
#[command(about = "Predict event food surplus and route it to recipients")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the prediction, routing and outreach workflow
    Run {
        /// JSON array of events
        #[arg(long)]
        events: PathBuf,

        /// JSON array of recipient organizations
        #[arg(long)]
        recipients: PathBuf,

        /// Only process the N most interesting events
        #[arg(long)]
        top: Option<usize>,

        /// Where to write the results export
        #[arg(long, default_value = "feastguard_results.json")]
        output: PathBuf,

        /// Skip text generation and use template text throughout
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feastguard_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            events,
            recipients,
            top,
            output,
            offline,
        } => cmd_run(&events, &recipients, top, &output, offline).await,
    }
}

async fn cmd_run(
    events_path: &Path,
    recipients_path: &Path,
    top: Option<usize>,
    output: &Path,
    offline: bool,
) -> Result<()> {
    let config = Config::from_env()?;

    let mut events = load_records(events_path, "event")?;
    let recipients = load_records(recipients_path, "recipient")?;

    if let Some(limit) = top {
        events = select_top_events(events, limit);
    }

    println!("{}", "FeastGuard".bright_green().bold());
    println!(
        "Processing {} events against {} recipients\n",
        events.len(),
        recipients.len()
    );

    let deps = WorkflowDeps::from_config(&config, offline);
    let orchestrator =
        Orchestrator::new(deps).with_step_budget_multiplier(config.step_budget_multiplier);

    let state = match orchestrator.run(events, recipients).await {
        Ok(state) => state,
        Err(e) => {
            if let Some(partial) = e.partial_state() {
                print_trace(partial);
                write_export(partial, output)?;
            }
            return Err(e).context("workflow aborted");
        }
    };

    print_trace(&state);
    print_results(&state);
    write_export(&state, output)?;

    Ok(())
}

fn load_records<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<Vec<T>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {kind} file {}", path.display()))?;
    let parsed = parse_records::<T>(&json)
        .with_context(|| format!("Failed to parse {kind} file {}", path.display()))?;

    for skipped in &parsed.skipped {
        tracing::warn!(
            kind,
            index = skipped.index,
            error = %skipped.error,
            "Skipping unparsable record"
        );
    }
    tracing::info!(
        kind,
        loaded = parsed.records.len(),
        skipped = parsed.skipped.len(),
        "Loaded records"
    );

    Ok(parsed.records)
}

fn print_trace(state: &WorkflowState) {
    println!("{}", "Agent Trace".bright_cyan().bold());
    for line in &state.agent_logs {
        println!("{}", line);
    }
    println!();
}

fn print_results(state: &WorkflowState) {
    let summary = WorkflowSummary::from_state(state);

    println!("{}", "Predictions".bright_cyan().bold());
    for p in &state.predictions {
        let line = format!(
            "  {} {}: {}kg {} (urgency: {}, confidence: {:.0}%)",
            p.event_id,
            p.event_name,
            p.predicted_kg,
            p.category,
            p.urgency,
            p.confidence * 100.0
        );
        if p.has_surplus {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!("\n{}", "Routes".bright_cyan().bold());
    for r in &state.routes {
        if r.is_match() {
            println!(
                "  {} -> {} ({:.1}km, cost {})",
                r.event_name,
                r.recipient_name.green(),
                r.distance_km,
                r.cost_score.unwrap_or_default()
            );
            for alt in &r.alternatives {
                println!(
                    "      alt: {} ({:.1}km, cost {})",
                    alt.name, alt.distance_km, alt.cost_score
                );
            }
        } else {
            println!("  {} -> {}", r.event_name, r.reasoning.red());
        }
    }

    println!("\n{}", "Outreach Messages".bright_cyan().bold());
    for message in &state.messages {
        println!("{}\n", format_message_for_display(message));
    }

    println!(
        "{} {} routes, {:.0}kg rescued, {} messages",
        "Done:".bright_green().bold(),
        summary.successful_routes,
        summary.total_kg_rescued,
        summary.messages_generated
    );
}

fn write_export(state: &WorkflowState, output: &Path) -> Result<()> {
    let json = ResultsExport::from_state(state)
        .to_json_pretty()
        .context("Failed to serialize results")?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Results written to {}", output.display());
    Ok(())
}
