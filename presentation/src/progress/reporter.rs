//! Progress reporting for debate execution

use agora_application::DebateObserver;
use agora_domain::util::preview;
use agora_domain::{Debate, Message};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

const PREVIEW_CHARS: usize = 60;

/// Reports progress during a debate with one progress bar per turn
pub struct ProgressReporter {
    multi: MultiProgress,
    turn_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            turn_bar: Mutex::new(None),
        }
    }

    fn turn_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.turn_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateObserver for ProgressReporter {
    fn on_turn_start(&self, turn_number: u32, speakers: usize) {
        let pb = self.multi.add(ProgressBar::new(speakers as u64));
        pb.set_style(Self::turn_style());
        pb.set_prefix(format!("Turn {}", turn_number));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.turn_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_agent_start(&self, _turn_number: u32, agent: &str) {
        self.with_bar(|pb| pb.set_message(format!("{} is speaking...", agent)));
    }

    fn on_message(&self, _turn_number: u32, message: &Message) {
        self.with_bar(|pb| {
            let status = if message.is_failed() {
                format!("{} {}", "x".red(), message.speaker())
            } else {
                format!("{} {}", "v".green(), message.speaker())
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_turn_end(&self, turn_number: u32) {
        if let Ok(mut slot) = self.turn_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("Turn {} complete!", turn_number).green().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DebateObserver for SimpleProgress {
    fn on_debate_start(&self, topic: &str, moderator: &str, participants: usize) {
        println!(
            "{} {} ({} agents, moderated by {})",
            "->".cyan(),
            topic.bold(),
            participants,
            moderator
        );
    }

    fn on_turn_start(&self, turn_number: u32, speakers: usize) {
        println!(
            "{} {} ({} speakers)",
            "->".cyan(),
            format!("Turn {}", turn_number).bold(),
            speakers
        );
    }

    fn on_message(&self, _turn_number: u32, message: &Message) {
        if message.is_failed() {
            println!("  {} {} (failed: {})", "x".red(), message.speaker(), message.content());
        } else {
            println!(
                "  {} {}: {}",
                "v".green(),
                message.speaker(),
                preview(message.content(), PREVIEW_CHARS).as_str().dimmed()
            );
        }
    }

    fn on_turn_end(&self, _turn_number: u32) {
        println!();
    }

    fn on_debate_concluded(&self, debate: &Debate) {
        println!(
            "{} {} turns, {} tokens",
            "Done:".green().bold(),
            debate.turns().len(),
            debate.total_usage().total()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::Agent;

    #[test]
    fn test_reporter_tracks_turn_bar() {
        let reporter = ProgressReporter::new();
        let agent = Agent::new("Ada", "k", "gpt", "");

        reporter.on_turn_start(1, 2);
        reporter.on_agent_start(1, "Ada");
        reporter.on_message(1, &Message::completed(&agent, "hi"));
        {
            let guard = reporter.turn_bar.lock().unwrap();
            assert_eq!(guard.as_ref().unwrap().position(), 1);
        }

        reporter.on_turn_end(1);
        assert!(reporter.turn_bar.lock().unwrap().is_none());
    }
}
