//! Console output formatter for debate transcripts

use crate::output::view::{DebateView, ParticipantView};
use agora_domain::{Agent, CostLedger, Debate, Message, Turn};
use colored::Colorize;

/// Formats debates, ledgers and rosters for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn colored output on or off for the whole process
    pub fn set_color_enabled(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete debate transcript
    pub fn format(debate: &Debate, ledger: &CostLedger) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Debate Transcript"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Topic:".cyan().bold(), debate.topic()));

        let debaters: Vec<_> = debate.debaters().map(|a| a.name()).collect();
        output.push_str(&format!(
            "{} {}\n",
            "Debaters:".cyan().bold(),
            debaters.join(", ")
        ));
        output.push_str(&format!(
            "{} {} ({})\n",
            "Moderator:".cyan().bold(),
            debate.moderator().name(),
            debate.moderator().model()
        ));

        for turn in Self::spoken_turns(debate) {
            output.push_str(&Self::format_turn(turn));
        }

        output.push_str(&Self::section_header("Usage"));
        output.push_str(&format!(
            "\n{} {} prompt + {} completion = {} tokens\n",
            "Debate:".bold(),
            debate.total_prompt_tokens(),
            debate.total_completion_tokens(),
            debate.total_usage().total()
        ));
        output.push_str(&format!(
            "{} ${:.6}\n",
            "Cost:".bold(),
            debate.total_cost()
        ));

        if !ledger.is_empty() {
            output.push('\n');
            output.push_str(&Self::format_ledger(ledger));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON (never includes API keys)
    pub fn format_json(debate: &Debate, ledger: &CostLedger) -> String {
        serde_json::to_string_pretty(&DebateView::new(debate).with_ledger(ledger))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one turn with its messages and the moderator summary
    pub fn format_turn(turn: &Turn) -> String {
        let mut output = String::new();

        let title = if turn.is_last_turn() {
            format!("Turn {} (final)", turn.turn_number())
        } else {
            format!("Turn {}", turn.turn_number())
        };
        output.push_str(&Self::section_header(&title));

        for message in turn.messages() {
            output.push_str(&Self::format_message(message));
        }

        if let Some(summary) = turn.summary() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── Summary by {} ──", summary.speaker()).green().bold(),
                Self::indent(summary.content(), "  ")
            ));
        }

        output.push_str(&format!(
            "\n{}\n",
            format!(
                "turn usage: {} tokens, ${:.6}",
                turn.usage().total(),
                turn.cost()
            )
            .dimmed()
        ));

        output
    }

    fn format_message(message: &Message) -> String {
        if message.is_failed() {
            format!(
                "\n{}\nError: {}\n",
                format!("── {} ({}) ──", message.speaker(), message.model())
                    .red()
                    .bold(),
                message.content()
            )
        } else {
            format!(
                "\n{}\n{}\n",
                format!("── {} ({}) ──", message.speaker(), message.model())
                    .yellow()
                    .bold(),
                message.content()
            )
        }
    }

    /// Per-model usage table
    pub fn format_ledger(ledger: &CostLedger) -> String {
        let mut output = format!("{}\n", "By model:".cyan().bold());
        let costs = ledger.cost_by_model();
        for (model, tokens) in ledger.usage_by_model() {
            let cost = costs.get(&model).copied().unwrap_or_default();
            output.push_str(&format!("  {:<40} {:>10} tokens  ${:.6}\n", model, tokens, cost));
        }
        output.push_str(&format!(
            "  {:<40} {:>10} tokens  ${:.6}\n",
            "total".bold(),
            ledger.total_usage(),
            ledger.total_cost()
        ));
        output
    }

    /// Roster listing for `agora agents list`
    pub fn format_agents(agents: &[Agent]) -> String {
        if agents.is_empty() {
            return format!("{}\n", "No agents registered.".dimmed());
        }

        let mut output = String::new();
        for agent in agents {
            let view = ParticipantView::from(agent);
            let role = if view.is_moderator {
                " [moderator]".green().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "{}{}  {}\n    {} prompt / {} completion tokens, ${:.6}\n",
                view.name.bold(),
                role,
                view.model.dimmed(),
                view.prompt_tokens,
                view.completion_tokens,
                view.cost
            ));
        }
        output
    }

    /// Agents listing as JSON
    pub fn format_agents_json(agents: &[Agent]) -> String {
        let views: Vec<ParticipantView<'_>> = agents.iter().map(ParticipantView::from).collect();
        serde_json::to_string_pretty(&views).unwrap_or_else(|_| "[]".to_string())
    }

    /// Sealed turns plus the open one if anything was said in it
    fn spoken_turns(debate: &Debate) -> impl Iterator<Item = &Turn> {
        debate
            .turns()
            .iter()
            .chain((!debate.current_turn().is_empty()).then(|| debate.current_turn()))
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::TokenUsage;

    fn concluded_debate() -> Debate {
        let ada = Agent::new("Ada", "sk-secret-ada", "openai/gpt-4o-mini", "");
        let moderator = Agent::new("Mod", "sk-secret-mod", "openai/gpt-4o", "").with_moderator(true);
        let mut debate = Debate::start("Remote work", vec![ada.clone(), moderator.clone()]).unwrap();

        debate
            .record_message(
                Message::completed(&ada, "Focus time matters.")
                    .with_usage(TokenUsage::new(10, 5), 0.00015),
            )
            .unwrap();
        debate
            .record_summary(Message::completed(&moderator, "Ada argued for focus."))
            .unwrap();
        debate.mark_last_turn().unwrap();
        debate.conclude().unwrap();
        debate
    }

    #[test]
    fn test_format_contains_transcript() {
        colored::control::set_override(false);
        let debate = concluded_debate();
        let mut ledger = CostLedger::new();
        ledger.add_usage("openai/gpt-4o-mini", 10, 5, 0.00015);

        let text = ConsoleFormatter::format(&debate, &ledger);
        assert!(text.contains("Topic: Remote work"));
        assert!(text.contains("Turn 1 (final)"));
        assert!(text.contains("── Ada (openai/gpt-4o-mini) ──"));
        assert!(text.contains("Focus time matters."));
        assert!(text.contains("Summary by Mod"));
        assert!(text.contains("15 tokens"));
        assert!(text.contains("openai/gpt-4o-mini"));
    }

    #[test]
    fn test_json_omits_api_keys() {
        let debate = concluded_debate();
        let json = ConsoleFormatter::format_json(&debate, &CostLedger::new());

        assert!(!json.contains("sk-secret"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["topic"], "Remote work");
        assert_eq!(value["status"], "concluded");
        assert_eq!(value["moderator"], "Mod");
        assert_eq!(value["turns"].as_array().unwrap().len(), 1);
        assert_eq!(value["total_prompt_tokens"], 10);
        assert_eq!(value["participants"][0]["prompt_tokens"], 10);
    }

    #[test]
    fn test_format_agents() {
        colored::control::set_override(false);
        assert!(ConsoleFormatter::format_agents(&[]).contains("No agents"));

        let agents = vec![
            Agent::new("Ada", "sk-1", "openai/gpt-4o-mini", ""),
            Agent::new("Mod", "sk-2", "openai/gpt-4o", "").with_moderator(true),
        ];
        let text = ConsoleFormatter::format_agents(&agents);
        assert!(text.contains("Mod [moderator]"));
        assert!(!text.contains("sk-1"));

        let json = ConsoleFormatter::format_agents_json(&agents);
        assert!(!json.contains("sk-2"));
        assert!(json.contains("\"is_moderator\": true"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
