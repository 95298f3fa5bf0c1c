use colored::{ColoredString, Colorize};
use thirteenth_core::{Event, EventSink, GameResult};
use thirteenth_sim::BatchSummary;

/// Prints each event as it happens, colored by what it means for the players.
#[derive(Debug, Default)]
pub struct StdoutNarrator {
    lines: usize,
}

impl EventSink for StdoutNarrator {
    fn emit(&mut self, event: Event) {
        if matches!(event, Event::RoundStarted { .. }) && self.lines > 0 {
            println!();
        }
        println!("{}", paint(&event));
        self.lines += 1;
    }
}

fn paint(event: &Event) -> ColoredString {
    let text = event.to_string();
    match event {
        Event::RoundStarted { .. } => text.cyan().bold(),
        Event::TestResolved { success: true, .. }
        | Event::SuitDefeated { .. }
        | Event::FaceCardBanished { .. } => text.green(),
        Event::TestResolved { success: false, .. } | Event::FaceCardDrawn { .. } => text.yellow(),
        Event::StrikeGained { .. } | Event::RedJokerReturned => text.red(),
        Event::EndgameStarted { .. } | Event::JokerTriggered { .. } => text.magenta().bold(),
        Event::GameEnded { reason, .. } if reason.is_victory() => text.bright_green().bold(),
        Event::GameEnded { .. } => text.bright_red().bold(),
        Event::TurnStatus { .. } | Event::Shuffled { .. } => text.dimmed(),
        _ => text.normal(),
    }
}

pub fn result_line(result: &GameResult) -> ColoredString {
    let line = format!(
        "{} after {} rounds, {} tests",
        result.end_reason, result.rounds, result.tests
    );
    if result.win {
        line.bright_green().bold()
    } else {
        line.bright_red().bold()
    }
}

pub fn summary_block(summary: &BatchSummary) -> String {
    let mut lines = vec![summary.headline().bold().to_string()];
    if summary.cancelled {
        lines.push("cancelled: partial results".yellow().to_string());
    }
    lines.push("End Reasons:".cyan().bold().to_string());
    let reasons = summary.reasons_by_count();
    if reasons.is_empty() {
        lines.push("  (none)".dimmed().to_string());
    }
    for (reason, count) in reasons {
        let share = count as f64 / summary.runs.max(1) as f64 * 100.0;
        let line = format!("  {count:>6}  {reason} ({share:.1}%)");
        lines.push(if reason.is_victory() {
            line.green().to_string()
        } else {
            line
        });
    }
    lines.join("\n")
}
