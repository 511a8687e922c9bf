//! warden Document Reference Runtime: Demo CLI
//!
//! Runs the document-management scenarios and exposes a few read-only views
//! of the runtime (agents, settings, single evaluations).
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- supervised-edit
//!   cargo run -p demo -- evaluate --agent ai-editor-1 --action update --resource-id 1
//!   cargo run -p demo -- --config crates/warden-ref-documents/config/warden.toml settings
//!
//! With `GROQ_API_KEY` set, scenarios 1-3 call the chat-completion endpoint;
//! pass `--offline` to always use the canned generator.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use warden_contracts::{agent::AgentId, error::WardenResult};
use warden_core::traits::{ContentGenerator, SettingRepository};
use warden_policy::WardenConfig;
use warden_ref_documents::{
    offline_generator,
    scenarios::{denials, generation_failure, supervised_edit, unsupervised_reads},
    DocumentRuntime, REFERENCE_CONFIG,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// warden: permission runtime for AI agents acting on documents.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "warden document reference runtime demo",
    long_about = "Runs warden demo scenarios showing capability checks, permission levels,\n\
                  human approval, generation failures, and audit chain integrity."
)]
struct Cli {
    /// Settings file to load instead of the bundled reference config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Never call the remote generator, even if an API key is set.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four scenarios in sequence.
    RunAll,
    /// Scenario 1: Supervised Edit (pending, refused reviewer, approve, reject).
    SupervisedEdit,
    /// Scenario 2: Unsupervised Reads (auto-completed actions).
    UnsupervisedReads,
    /// Scenario 3: Denials (unknown, inactive, capability, level).
    Denials,
    /// Scenario 4: Generation Failure (error and timeout).
    GenerationFailure,
    /// Evaluate one request without executing it.
    Evaluate {
        #[arg(long)]
        agent: String,
        #[arg(long)]
        action: String,
        #[arg(long, default_value = "document")]
        resource_type: String,
        #[arg(long)]
        resource_id: Option<String>,
    },
    /// List the registered agents.
    Agents,
    /// List the active permission settings.
    Settings,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match &cli.command {
        Command::RunAll => run_all(&cli).await,
        Command::SupervisedEdit => supervised_edit::run_scenario(generator(&cli)).await,
        Command::UnsupervisedReads => unsupervised_reads::run_scenario(generator(&cli)).await,
        Command::Denials => denials::run_scenario(generator(&cli)).await,
        Command::GenerationFailure => generation_failure::run_scenario().await,
        Command::Evaluate {
            agent,
            action,
            resource_type,
            resource_id,
        } => evaluate(&cli, agent, action, resource_type, resource_id.as_deref()),
        Command::Agents => list_agents(&cli),
        Command::Settings => list_settings(&cli),
    };

    match result {
        Ok(()) => {
            println!("Done.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn generator(cli: &Cli) -> Arc<dyn ContentGenerator> {
    if cli.offline {
        offline_generator()
    } else {
        warden_generate::default_generator()
    }
}

fn load_config(cli: &Cli) -> WardenResult<WardenConfig> {
    match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            WardenConfig::from_file(path)
        }
        None => WardenConfig::from_toml_str(REFERENCE_CONFIG),
    }
}

fn build_runtime(cli: &Cli) -> WardenResult<DocumentRuntime> {
    DocumentRuntime::new(&load_config(cli)?, offline_generator())
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn run_all(cli: &Cli) -> WardenResult<()> {
    supervised_edit::run_scenario(generator(cli)).await?;
    unsupervised_reads::run_scenario(generator(cli)).await?;
    denials::run_scenario(generator(cli)).await?;
    generation_failure::run_scenario().await?;
    Ok(())
}

// ── Views ─────────────────────────────────────────────────────────────────────

fn evaluate(
    cli: &Cli,
    agent: &str,
    action: &str,
    resource_type: &str,
    resource_id: Option<&str>,
) -> WardenResult<()> {
    let runtime = build_runtime(cli)?;
    let decision = runtime
        .lifecycle
        .evaluate(&AgentId::new(agent), action, resource_type, resource_id);

    println!(
        "  {agent} -> {action} on {resource_type}/{}",
        resource_id.unwrap_or("*")
    );
    println!("  Permitted:              {}", decision.permitted);
    println!("  Requires approval:      {}", decision.requires_approval);
    println!("  Permission level:       {}", decision.permission_level);
    if let Some(reason) = decision.reason() {
        println!("  Reason:                 {}", reason);
    }
    println!();
    Ok(())
}

fn list_agents(cli: &Cli) -> WardenResult<()> {
    let runtime = build_runtime(cli)?;
    for agent in runtime.lifecycle.list_agents()? {
        let caps: Vec<&str> = agent.capabilities.all().map(|c| c.as_str()).collect();
        println!(
            "  {:<16} {:<20} {:<9} {}",
            agent.id.as_str(),
            agent.name,
            agent.role.as_str(),
            if agent.is_active { "active" } else { "inactive" }
        );
        println!("  {:<16} [{}]", "", caps.join(", "));
    }
    println!();
    Ok(())
}

fn list_settings(cli: &Cli) -> WardenResult<()> {
    let runtime = build_runtime(cli)?;
    for setting in runtime.settings.list()? {
        let target = match (&setting.resource_id, &setting.resource_name) {
            (None, _) => format!("{} (default)", setting.resource_type),
            (Some(id), Some(name)) => format!("{}/{} \"{}\"", setting.resource_type, id, name),
            (Some(id), None) => format!("{}/{}", setting.resource_type, id),
        };
        println!(
            "  {:<40} {:<12} approval={:<5} reviewers=[{}]",
            target,
            setting.permission_level.as_str(),
            setting.requires_approval,
            setting.approver_roles.join(", ")
        );
    }
    println!();
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("warden: Permission Runtime for AI Agents");
    println!("Document Reference Demo");
    println!("========================================");
    println!();
    println!("Evaluation pipeline per request:");
    println!("  [1] Agent must be registered and active");
    println!("  [2] A setting must cover the resource (specific, else type default)");
    println!("  [3] Agent must hold one of the capabilities the action accepts");
    println!("  [4] Permission level decides permitted and approval-required");
    println!("  [5] Record created, content generated under a timeout, hash-chained audit");
    println!();
}
