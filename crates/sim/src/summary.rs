use crate::TextReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thirteenth_core::{EndReason, GameResult};

/// Aggregate over many runs. `record` and `merge` commute, so worker order
/// never changes the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: u64,
    pub wins: u64,
    pub total_rounds: u64,
    pub total_tests: u64,
    pub end_reasons: BTreeMap<EndReason, u64>,
    #[serde(default)]
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn record(&mut self, result: &GameResult) {
        self.runs += 1;
        self.wins += u64::from(result.win);
        self.total_rounds += u64::from(result.rounds);
        self.total_tests += u64::from(result.tests);
        *self.end_reasons.entry(result.end_reason).or_default() += 1;
    }

    pub fn merge(&mut self, other: &BatchSummary) {
        self.runs += other.runs;
        self.wins += other.wins;
        self.total_rounds += other.total_rounds;
        self.total_tests += other.total_tests;
        for (reason, count) in &other.end_reasons {
            *self.end_reasons.entry(*reason).or_default() += count;
        }
        self.cancelled |= other.cancelled;
    }

    fn per_run(&self, total: u64) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            total as f64 / self.runs as f64
        }
    }

    /// Percentage in 0..=100.
    pub fn win_rate(&self) -> f64 {
        self.per_run(self.wins) * 100.0
    }

    pub fn avg_rounds(&self) -> f64 {
        self.per_run(self.total_rounds)
    }

    pub fn avg_tests(&self) -> f64 {
        self.per_run(self.total_tests)
    }

    /// Most frequent first; ties broken by the reason text.
    pub fn reasons_by_count(&self) -> Vec<(EndReason, u64)> {
        let mut reasons: Vec<(EndReason, u64)> = self
            .end_reasons
            .iter()
            .map(|(reason, count)| (*reason, *count))
            .collect();
        reasons.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
        });
        reasons
    }

    pub fn headline(&self) -> String {
        format!(
            "{}/{} wins ({:.1}%), avg rounds: {:.2}, avg tests: {:.1}",
            self.wins,
            self.runs,
            self.win_rate(),
            self.avg_rounds(),
            self.avg_tests()
        )
    }
}

impl TextReport for BatchSummary {
    fn to_text_report(&self) -> String {
        let mut lines = vec![self.headline()];
        if self.cancelled {
            lines.push("cancelled: partial results".to_string());
        }
        lines.push(String::new());
        lines.push("End Reasons:".to_string());
        if self.end_reasons.is_empty() {
            lines.push("  (none)".to_string());
        }
        for (reason, count) in self.reasons_by_count() {
            let share = count as f64 / self.runs as f64 * 100.0;
            lines.push(format!("  {count:>6}  {reason} ({share:.1}%)"));
        }
        lines.join("\n")
    }
}
