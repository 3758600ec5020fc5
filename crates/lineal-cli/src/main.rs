//! Lineal CLI - run a problem through the thought-lineage workflows.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lineal_llm::{gemini, GeminiProvider};
use lineal_orchestrator::{ForkSpec, Orchestrator, RunOutcome};
use tracing::info;

/// Process a problem through the reasoning workflows and print the result.
#[derive(Debug, Parser)]
#[command(name = "lineal")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Problem statement to process
    problem: String,

    /// Workflow mode
    #[arg(short, long, value_enum, default_value_t = Mode::Sequential)]
    mode: Mode,

    /// Constraint to consider (repeatable; sequential mode only)
    #[arg(short, long = "constraint")]
    constraints: Vec<String>,

    /// Reasoning service endpoint
    #[arg(long, default_value = gemini::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model to use
    #[arg(long, default_value = gemini::DEFAULT_MODEL)]
    model: String,

    /// API key for the reasoning service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Write the graph export to this file as JSON
    #[arg(long)]
    save_graph: Option<std::path::PathBuf>,
}

/// Workflow mode options.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// analysis -> plan -> execution
    Sequential,
    /// analysis -> competing plans -> contradiction check -> synthesis
    Parallel,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let provider = GeminiProvider::new(&cli.endpoint, &cli.model, &cli.api_key);
    let mut orchestrator = Orchestrator::new(provider);

    let outcome = match cli.mode {
        Mode::Sequential => orchestrator.run_sequential(&cli.problem, cli.constraints.clone())?,
        Mode::Parallel => orchestrator.run_parallel(&cli.problem, ForkSpec::default())?,
    };

    print_outcome(&outcome)?;

    if let Some(path) = &cli.save_graph {
        let json = serde_json::to_string_pretty(&outcome.graph)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write graph export to {}", path.display()))?;
        info!(path = %path.display(), "Saved graph export");
    }

    Ok(())
}

fn print_outcome(outcome: &RunOutcome) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{}", json);
    Ok(())
}
