//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for debate transcripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored transcript with per-turn summaries and a cost table
    Text,
    /// JSON document (API keys are never included)
    Json,
}

/// CLI arguments for agora
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(author, version, about = "Multi-agent debates between LLMs with cost tracking")]
#[command(long_about = r#"
Agora runs a moderated debate between several LLM agents.

Each agent is bound to a model and a system prompt. On every turn each
debater answers in roster order, seeing everything said so far, and the
moderator summarizes. Token usage and cost are tracked per message, per
turn, per debate and per model.

Agents live in a JSON roster file (see `agora agents --help`).

Configuration files are loaded from (in priority order):
1. AGORA_* environment variables (e.g. AGORA_DEBATE__TURNS=5)
2. --config <path>     Explicit config file
3. ./agora.toml        Project-level config
4. ~/.config/agora/config.toml   Global config

Example:
  agora agents add Ada -m openai/gpt-4o-mini -p "Argue for the motion."
  agora agents add Bob -m anthropic/claude-3-haiku -p "Argue against."
  agora agents add Mod -m openai/gpt-4o --moderator -p "Keep it civil."
  agora run "Should remote work be the default?" --turns 2
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Roster file (overrides registry.roster)
    #[arg(long, global = true, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a debate between the agents in the roster
    Run(RunArgs),

    /// Manage the agent roster
    #[command(subcommand)]
    Agents(AgentsCommand),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// The debate topic
    pub topic: String,

    /// Number of turns (overrides debate.turns)
    #[arg(short, long)]
    pub turns: Option<u32>,

    /// Only include these agents, in roster order (can be specified multiple times)
    #[arg(short, long = "agent", value_name = "NAME")]
    pub agents: Vec<String>,

    /// Per-call timeout in seconds, 0 for none (overrides gateway.timeout_seconds)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output format (overrides output.format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not write accumulated usage back to the roster
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommand {
    /// List registered agents with their accumulated usage
    List,

    /// Register a new agent
    Add {
        /// Agent name
        name: String,

        /// Model id, e.g. openai/gpt-4o-mini
        #[arg(short, long)]
        model: String,

        /// System prompt
        #[arg(short = 'p', long, default_value = "")]
        system_prompt: String,

        /// API key for this agent (falls back to the configured key when empty)
        #[arg(short = 'k', long, default_value = "")]
        api_key: String,

        /// Make this agent the moderator
        #[arg(long)]
        moderator: bool,
    },

    /// Remove every agent with the given name
    Remove {
        /// Agent name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "agora", "-vv", "run", "AI ethics", "--turns", "2", "-a", "Ada", "-a", "Mod", "-o",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.topic, "AI ethics");
        assert_eq!(args.turns, Some(2));
        assert_eq!(args.agents, vec!["Ada", "Mod"]);
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert!(!args.no_save);
    }

    #[test]
    fn test_parse_agents_add() {
        let cli = Cli::parse_from([
            "agora",
            "agents",
            "add",
            "Mod",
            "-m",
            "openai/gpt-4o",
            "--moderator",
            "--roster",
            "panel.json",
        ]);
        assert_eq!(cli.roster, Some(PathBuf::from("panel.json")));
        match cli.command {
            Command::Agents(AgentsCommand::Add {
                name,
                model,
                system_prompt,
                api_key,
                moderator,
            }) => {
                assert_eq!(name, "Mod");
                assert_eq!(model, "openai/gpt-4o");
                assert!(system_prompt.is_empty());
                assert!(api_key.is_empty());
                assert!(moderator);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
