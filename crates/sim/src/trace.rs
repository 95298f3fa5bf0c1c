use crate::SimError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thirteenth_core::{Event, GameConfig, GameResult};

/// Everything needed to reproduce and read back one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTrace {
    pub seed: u64,
    pub config: GameConfig,
    pub result: GameResult,
    pub events: Vec<Event>,
}

pub trait TextReport {
    fn to_text_report(&self) -> String;
}

impl TextReport for GameTrace {
    fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("seed: {:#x}", self.seed),
            format!(
                "result: {} after {} rounds, {} tests",
                self.result.end_reason, self.result.rounds, self.result.tests
            ),
            String::new(),
        ];
        lines.extend(self.events.iter().map(Event::to_string));
        lines.join("\n")
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SimError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text<T: TextReport>(path: &Path, value: &T) -> Result<(), SimError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, value.to_text_report())?;
    Ok(())
}
