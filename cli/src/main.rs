//! CLI entrypoint for agora
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agora_application::{
    BehaviorConfig, DebateOrchestrator, DebateObserver, NoObserver, RunDebateInput,
    RunDebateUseCase,
};
use agora_domain::{Agent, AgentRegistry, RosterRepository};
use agora_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, JsonRosterRepository, OpenRouterConfig,
    OpenRouterGateway,
};
use agora_presentation::{
    AgentsCommand, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, RunArgs,
};
use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting agora");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        let details: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
        bail!("Invalid configuration:\n{}", details.join("\n"));
    }

    ConsoleFormatter::set_color_enabled(config.output.color && !cli.no_color);

    // === Dependency Injection ===
    let roster_path = cli
        .roster
        .clone()
        .unwrap_or_else(|| config.registry.roster.clone());
    let roster = JsonRosterRepository::new(roster_path);

    let mut registry = AgentRegistry::new(config.registry.duplicate_names);
    if roster.exists() {
        let count = registry
            .load_from(&roster)
            .with_context(|| format!("Failed to load roster {}", roster.path().display()))?;
        info!("Loaded {} agents from {}", count, roster.path().display());
    }

    match cli.command {
        Command::Agents(command) => manage_agents(command, &mut registry, &roster),
        Command::Run(args) => run_debate(args, cli.quiet, &config, &mut registry, &roster).await,
    }
}

fn manage_agents(
    command: AgentsCommand,
    registry: &mut AgentRegistry,
    roster: &dyn RosterRepository,
) -> Result<()> {
    match command {
        AgentsCommand::List => {
            print!("{}", ConsoleFormatter::format_agents(registry.agents()));
            report_moderator_issues(registry);
        }
        AgentsCommand::Add {
            name,
            model,
            system_prompt,
            api_key,
            moderator,
        } => {
            registry.create(name.as_str(), api_key, model, system_prompt, moderator)?;
            registry.save_to(roster)?;
            println!("Added agent '{}' ({} agents registered)", name, registry.len());
            report_moderator_issues(registry);
        }
        AgentsCommand::Remove { name } => {
            let removed = registry.remove(&name);
            if removed == 0 {
                println!("No agent named '{}'", name);
                return Ok(());
            }
            registry.save_to(roster)?;
            println!("Removed {} agent(s) named '{}'", removed, name);
        }
    }
    Ok(())
}

async fn run_debate(
    args: RunArgs,
    quiet: bool,
    config: &FileConfig,
    registry: &mut AgentRegistry,
    roster: &dyn RosterRepository,
) -> Result<()> {
    let agents = select_agents(registry, &args.agents)?;

    let turns = args.turns.unwrap_or(config.debate.turns);
    let behavior = match args.timeout {
        Some(seconds) => BehaviorConfig::from_timeout_seconds(Some(seconds)),
        None => config.gateway.behavior(),
    };

    let format = args.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });

    // Create infrastructure adapter (OpenRouter gateway)
    let gateway = Arc::new(OpenRouterGateway::new(OpenRouterConfig::from_file_config(
        &config.gateway,
    ))?);
    let orchestrator = DebateOrchestrator::new(gateway)
        .with_pricing(Arc::new(config.pricing.to_pricing()))
        .with_behavior(behavior);

    // Create use case with injected orchestrator
    let use_case = RunDebateUseCase::new(Arc::new(orchestrator));
    let input = RunDebateInput::new(args.topic, agents, turns)
        .with_prompts(config.debate.to_prompts());

    let observer: Box<dyn DebateObserver> = if quiet {
        Box::new(NoObserver)
    } else {
        Box::new(ProgressReporter::new())
    };
    let output = use_case
        .execute_with_observer(input, observer.as_ref())
        .await?;

    let rendered = match format {
        OutputFormat::Text => ConsoleFormatter::format(&output.debate, &output.ledger),
        OutputFormat::Json => ConsoleFormatter::format_json(&output.debate, &output.ledger),
    };
    println!("{}", rendered);

    if !args.no_save {
        registry.absorb_usage(output.debate.agents());
        registry.save_to(roster)?;
    }

    Ok(())
}

/// Participants for a run: the whole roster, or the named agents in roster order
fn select_agents(registry: &AgentRegistry, names: &[String]) -> Result<Vec<Agent>> {
    if registry.is_empty() {
        bail!("No agents registered. Add some with `agora agents add`.");
    }

    if let Some(missing) = names.iter().find(|n| !registry.contains(n.as_str())) {
        bail!("Unknown agent '{}'", missing);
    }

    Ok(registry
        .iter()
        .filter(|a| names.is_empty() || names.iter().any(|n| n == a.name()))
        .cloned()
        .collect())
}

fn report_moderator_issues(registry: &AgentRegistry) {
    for issue in registry.moderator_issues() {
        if issue.is_ambiguous() {
            warn!("{}", issue.message);
        } else {
            info!("{}", issue.message);
        }
    }
}
